use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use carbonos_calculator::{
    industry_options, region_options, CalculatorSession, ResultPanel, SelectOption,
};
use carbonos_estimator::{EstimatorAssumptions, ValidatedAssumptions};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Exit status when the usage figure cannot be estimated.
const EXIT_INVALID_INPUT: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "carbonos-roi", about = "Estimate carbon liability and ROI for CarbonOS")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Industry code (see `list-industries`)
    #[arg(long, default_value = "manufacturing")]
    industry: String,

    /// Annual electricity usage in 10,000 kWh
    #[arg(long, allow_hyphen_values = true)]
    usage: Option<String>,

    /// Export destination code (see `list-regions`)
    #[arg(long, default_value = "none")]
    region: String,

    /// JSON file overriding the estimate assumptions
    #[arg(long)]
    assumptions: Option<PathBuf>,

    /// Print the raw estimate as JSON
    #[arg(long)]
    json: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List industry codes and labels
    ListIndustries,
    /// List export region codes and labels
    ListRegions,
}

fn init_tracing(log_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);
    if log_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn print_options(out: &mut impl Write, options: &[SelectOption]) -> std::io::Result<()> {
    for o in options {
        writeln!(out, "{:<16}{}", o.code, o.label)?;
    }
    Ok(())
}

fn print_panel(out: &mut impl Write, panel: &ResultPanel) -> std::io::Result<()> {
    writeln!(out, "Annual emissions       {}", panel.annual_emissions)?;
    writeln!(out, "Carbon-tax exposure    {}", panel.tax_exposure)?;
    writeln!(out, "Projected tax savings  {}", panel.tax_savings)?;
    writeln!(out, "Green-power revenue    {}", panel.green_power_revenue)?;
    writeln!(out, "Payback period         {}", panel.payback_period)?;
    writeln!(out, "Recommended tier       {}", panel.recommended_tier)?;
    Ok(())
}

/// Execute one invocation, returning the process exit status.
fn run(cli: Cli, out: &mut impl Write, err: &mut impl Write) -> anyhow::Result<u8> {
    match cli.command {
        Some(Command::ListIndustries) => {
            print_options(out, &industry_options())?;
            return Ok(0);
        }
        Some(Command::ListRegions) => {
            print_options(out, &region_options())?;
            return Ok(0);
        }
        None => {}
    }

    let assumptions = match &cli.assumptions {
        Some(path) => EstimatorAssumptions::load(path)
            .with_context(|| format!("loading assumptions from {}", path.display()))?,
        None => ValidatedAssumptions::default(),
    };

    let mut session = CalculatorSession::with_assumptions(assumptions);
    session.set_industry(cli.industry);
    session.set_usage_text(cli.usage.unwrap_or_default());
    session.set_export_region(cli.region);

    let panel = match session.calculate() {
        Ok(panel) => panel,
        Err(e) => {
            writeln!(err, "no estimate: {e}")?;
            return Ok(EXIT_INVALID_INPUT);
        }
    };

    if cli.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&panel.estimate)?)?;
    } else {
        print_panel(out, panel)?;
    }
    Ok(0)
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);
    let code = run(cli, &mut std::io::stdout().lock(), &mut std::io::stderr().lock())?;
    Ok(ExitCode::from(code))
}
