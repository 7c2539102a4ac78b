#![forbid(unsafe_code)]
//! Carbon-liability and ROI estimator behind the CarbonOS calculator.
//!
//! [`estimate`] turns an industry, an annual electricity usage (in 10,000 kWh)
//! and an export destination into emissions, projected carbon-tax savings,
//! green-power trading revenue, a payback period and a recommended product
//! tier. The figures are advisory, not audited.

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod assumptions;
pub mod error;
pub mod profiles;

pub use assumptions::{EstimatorAssumptions, ValidatedAssumptions};
pub use error::{parse_usage, AssumptionsError, InvalidInputError};
pub use profiles::{
    emission_factor_for, tax_rate_for, ExportRegion, ExportRegionProfile, Industry,
    IndustryProfile, DEFAULT_EMISSION_FACTOR, DEFAULT_TAX_APPLICABILITY_RATE,
};

/// Product tier recommended for the customer, ordered smallest to largest.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductTier {
    Essential,
    Pro,
    Enterprise,
}

impl ProductTier {
    pub fn as_str(self) -> &'static str {
        match self {
            ProductTier::Essential => "essential",
            ProductTier::Pro => "pro",
            ProductTier::Enterprise => "enterprise",
        }
    }
}

impl fmt::Display for ProductTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One calculation request. Codes are free-form; unknown codes fall back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationInput {
    pub industry_code: String,
    /// Annual consumption in units of 10,000 kWh.
    pub annual_electricity_usage: f64,
    pub export_region_code: String,
}

impl EstimationInput {
    pub fn new(
        industry_code: impl Into<String>,
        annual_electricity_usage: f64,
        export_region_code: impl Into<String>,
    ) -> Self {
        EstimationInput {
            industry_code: industry_code.into(),
            annual_electricity_usage,
            export_region_code: export_region_code.into(),
        }
    }

    /// Build an input from raw form text, rejecting unusable usage figures.
    pub fn parse(
        industry_code: &str,
        usage_text: &str,
        export_region_code: &str,
    ) -> Result<Self, InvalidInputError> {
        let usage = parse_usage(usage_text)?;
        Ok(Self::new(industry_code, usage, export_region_code))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationResult {
    pub annual_emission_tons: f64,
    pub projected_tax_savings_cny: f64,
    pub projected_green_power_revenue_cny: f64,
    /// Payback period as displayed, capped at the display limit.
    pub payback_period_years: f64,
    /// Uncapped payback period; `None` when annual savings are zero.
    pub raw_payback_period_years: Option<f64>,
    pub recommended_tier: ProductTier,
    /// Resolved industry factor (t CO₂e per 10,000 kWh).
    pub emission_factor: f64,
    /// Resolved export-region tax applicability rate.
    pub tax_applicability_rate: f64,
}

impl EstimationResult {
    /// True when the displayed payback differs from the computed one.
    pub fn payback_is_capped(&self) -> bool {
        match self.raw_payback_period_years {
            Some(raw) => raw > self.payback_period_years,
            None => true,
        }
    }
}

/// Estimate with the default assumptions.
pub fn estimate(input: &EstimationInput) -> Result<EstimationResult, InvalidInputError> {
    estimate_with(input, &ValidatedAssumptions::default())
}

pub fn estimate_with(
    input: &EstimationInput,
    assumptions: &ValidatedAssumptions,
) -> Result<EstimationResult, InvalidInputError> {
    let usage = input.annual_electricity_usage;
    error::check_usage(usage)?;

    let emission_factor = emission_factor_for(&input.industry_code);
    let annual_emission_tons = usage * emission_factor;

    let tax_applicability_rate = tax_rate_for(&input.export_region_code);
    let projected_tax_savings_cny = annual_emission_tons
        * assumptions.reference_carbon_price
        * assumptions.fx_rate
        * tax_applicability_rate
        * assumptions.assumed_abatement_rate;

    let projected_green_power_revenue_cny =
        usage * assumptions.green_power_premium * assumptions.assumed_tradable_fraction;

    let annual_saving = projected_tax_savings_cny + projected_green_power_revenue_cny;
    if !annual_emission_tons.is_finite() || !annual_saving.is_finite() {
        return Err(InvalidInputError::OutOfRange(usage));
    }

    let raw_payback_period_years = if annual_saving > 0.0 {
        Some(assumptions.assumed_product_cost / annual_saving).filter(|y| y.is_finite())
    } else {
        None
    };
    let cap = assumptions.payback_display_cap_years;
    let payback_period_years = raw_payback_period_years.map_or(cap, |y| y.min(cap));

    let recommended_tier = recommend_tier(usage, tax_applicability_rate, assumptions);

    tracing::debug!(
        industry = %input.industry_code,
        region = %input.export_region_code,
        usage,
        emission_factor,
        tax_applicability_rate,
        tier = %recommended_tier,
        "estimate computed"
    );

    Ok(EstimationResult {
        annual_emission_tons,
        projected_tax_savings_cny,
        projected_green_power_revenue_cny,
        payback_period_years,
        raw_payback_period_years,
        recommended_tier,
        emission_factor,
        tax_applicability_rate,
    })
}

/// Tier rules, later rules overriding earlier ones:
/// essential by default, pro from the usage threshold or any tax exposure,
/// enterprise from the enterprise usage threshold.
pub fn recommend_tier(
    usage: f64,
    tax_applicability_rate: f64,
    assumptions: &EstimatorAssumptions,
) -> ProductTier {
    let mut tier = ProductTier::Essential;
    if usage >= assumptions.pro_usage_threshold || tax_applicability_rate > 0.0 {
        tier = ProductTier::Pro;
    }
    if usage >= assumptions.enterprise_usage_threshold {
        tier = ProductTier::Enterprise;
    }
    tier
}
