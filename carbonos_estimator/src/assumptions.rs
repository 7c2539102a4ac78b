use std::fs;
use std::ops::Deref;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AssumptionsError;

/// Constants feeding the estimate formulas.
///
/// The defaults are the published calculator figures. A deployment may load a
/// partial JSON document to override individual constants; anything omitted
/// keeps its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EstimatorAssumptions {
    /// Reference carbon price per ton, in the reference market currency.
    pub reference_carbon_price: f64,
    /// Conversion from reference currency to CNY.
    pub fx_rate: f64,
    /// Fraction of emissions assumed reducible through the product.
    pub assumed_abatement_rate: f64,
    /// CNY premium per 10,000 kWh of traded green power.
    pub green_power_premium: f64,
    /// Fraction of consumption assumed tradable as green power.
    pub assumed_tradable_fraction: f64,
    /// Product cost in CNY used for the payback period.
    pub assumed_product_cost: f64,
    /// Largest payback period shown to the user.
    pub payback_display_cap_years: f64,
    /// Usage (10,000 kWh) from which the Pro tier is recommended.
    pub pro_usage_threshold: f64,
    /// Usage (10,000 kWh) from which the Enterprise tier is recommended.
    pub enterprise_usage_threshold: f64,
}

impl Default for EstimatorAssumptions {
    fn default() -> Self {
        EstimatorAssumptions {
            reference_carbon_price: 85.0,
            fx_rate: 7.8,
            assumed_abatement_rate: 0.15,
            green_power_premium: 150.0,
            assumed_tradable_fraction: 0.30,
            assumed_product_cost: 50_000.0,
            payback_display_cap_years: 10.0,
            pro_usage_threshold: 1_000.0,
            enterprise_usage_threshold: 5_000.0,
        }
    }
}

impl EstimatorAssumptions {
    pub fn from_json_str(json: &str) -> Result<ValidatedAssumptions, AssumptionsError> {
        let assumptions: EstimatorAssumptions = serde_json::from_str(json)?;
        ValidatedAssumptions::try_from(assumptions)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<ValidatedAssumptions, AssumptionsError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), AssumptionsError> {
        let all = [
            self.reference_carbon_price,
            self.fx_rate,
            self.assumed_abatement_rate,
            self.green_power_premium,
            self.assumed_tradable_fraction,
            self.assumed_product_cost,
            self.payback_display_cap_years,
            self.pro_usage_threshold,
            self.enterprise_usage_threshold,
        ];
        if all.iter().any(|v| !v.is_finite()) {
            return Err(AssumptionsError::Invalid("values must be finite"));
        }
        if all.iter().any(|v| *v < 0.0) {
            return Err(AssumptionsError::Invalid("values must not be negative"));
        }
        if self.assumed_abatement_rate > 1.0 || self.assumed_tradable_fraction > 1.0 {
            return Err(AssumptionsError::Invalid(
                "abatement rate and tradable fraction must be within [0,1]",
            ));
        }
        if self.assumed_product_cost <= 0.0 {
            return Err(AssumptionsError::Invalid("product cost must be positive"));
        }
        if self.payback_display_cap_years <= 0.0 {
            return Err(AssumptionsError::Invalid("payback display cap must be positive"));
        }
        if self.pro_usage_threshold > self.enterprise_usage_threshold {
            return Err(AssumptionsError::Invalid(
                "pro threshold must not exceed enterprise threshold",
            ));
        }
        Ok(())
    }
}

/// Assumptions that passed [`EstimatorAssumptions::validate`].
///
/// The only form the formulas accept. Deserializing runs the same validation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "EstimatorAssumptions", into = "EstimatorAssumptions")]
pub struct ValidatedAssumptions(EstimatorAssumptions);

impl TryFrom<EstimatorAssumptions> for ValidatedAssumptions {
    type Error = AssumptionsError;

    fn try_from(assumptions: EstimatorAssumptions) -> Result<Self, Self::Error> {
        assumptions.validate()?;
        Ok(ValidatedAssumptions(assumptions))
    }
}

impl From<ValidatedAssumptions> for EstimatorAssumptions {
    fn from(validated: ValidatedAssumptions) -> Self {
        validated.0
    }
}

impl Deref for ValidatedAssumptions {
    type Target = EstimatorAssumptions;

    fn deref(&self) -> &EstimatorAssumptions {
        &self.0
    }
}
