//! Display formatting for the result panel.

/// Insert thousands separators into an already-rounded decimal string.
fn group_thousands(rounded: &str) -> String {
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rounded),
    };
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    format!("{sign}{out}")
}

fn whole(value: f64) -> String {
    let rounded = format!("{:.0}", value);
    // "-0" after rounding a tiny negative
    if rounded == "-0" {
        return "0".to_string();
    }
    group_thousands(&rounded)
}

pub fn format_cny(amount: f64) -> String {
    format!("¥{}", whole(amount))
}

pub fn format_tons(tons: f64) -> String {
    format!("{} t CO₂e", whole(tons))
}

pub fn format_percent(fraction: f64) -> String {
    format!("{:.0}%", fraction * 100.0)
}

pub fn format_years(years: f64) -> String {
    format!("{:.1} years", years)
}
