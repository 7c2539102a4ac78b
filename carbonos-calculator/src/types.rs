use carbonos_estimator::{EstimationResult, ExportRegionProfile, IndustryProfile};
use serde::{Deserialize, Serialize};

/// Raw calculator field state, exactly as typed or selected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculatorForm {
    pub industry_code: String,
    pub usage_text: String,
    pub export_region_code: String,
}

impl CalculatorForm {
    pub fn new(
        industry_code: impl Into<String>,
        usage_text: impl Into<String>,
        export_region_code: impl Into<String>,
    ) -> Self {
        CalculatorForm {
            industry_code: industry_code.into(),
            usage_text: usage_text.into(),
            export_region_code: export_region_code.into(),
        }
    }
}

/// Step-by-step reveal of the calculator page.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculatorStep {
    #[default]
    Input,
    Result,
    LeadCapture,
    Submitted,
}

/// Display strings for one estimate, plus the estimate they came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultPanel {
    pub annual_emissions: String,
    pub tax_savings: String,
    pub green_power_revenue: String,
    pub payback_period: String,
    pub tax_exposure: String,
    pub recommended_tier: String,
    pub estimate: EstimationResult,
}

/// One entry of an enumerated selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub code: String,
    pub label: String,
}

pub fn industry_options() -> Vec<SelectOption> {
    IndustryProfile::all()
        .iter()
        .map(|p| SelectOption {
            code: p.code.to_string(),
            label: p.label.to_string(),
        })
        .collect()
}

pub fn region_options() -> Vec<SelectOption> {
    ExportRegionProfile::all()
        .iter()
        .map(|p| SelectOption {
            code: p.code.to_string(),
            label: p.label.to_string(),
        })
        .collect()
}

/// Follow-up contact form shown after a result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadCaptureForm {
    pub name: String,
    pub company: String,
    pub phone: String,
    pub email: String,
}
