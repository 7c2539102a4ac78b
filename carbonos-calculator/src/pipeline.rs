#![forbid(unsafe_code)]

use carbonos_estimator::{
    estimate_with, EstimationInput, EstimationResult, InvalidInputError, ValidatedAssumptions,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::format::{format_cny, format_percent, format_tons, format_years};
use crate::guards::{InputGuard, LeadFormError};
use crate::lead::{LeadSink, LeadSinkError, LeadSubmission};
use crate::types::{CalculatorForm, CalculatorStep, LeadCaptureForm, ResultPanel};

#[derive(Debug, Error)]
pub enum LeadError {
    #[error("no estimate to attach; calculate first")]
    NoEstimate,
    #[error("lead form is not open (calculator is at {0:?})")]
    NotOpen(CalculatorStep),
    #[error(transparent)]
    Form(#[from] LeadFormError),
    #[error(transparent)]
    Sink(#[from] LeadSinkError),
}

/// Render an estimate into display strings.
pub fn render_panel(estimate: EstimationResult) -> ResultPanel {
    ResultPanel {
        annual_emissions: format_tons(estimate.annual_emission_tons),
        tax_savings: format_cny(estimate.projected_tax_savings_cny),
        green_power_revenue: format_cny(estimate.projected_green_power_revenue_cny),
        payback_period: format_years(estimate.payback_period_years),
        tax_exposure: format_percent(estimate.tax_applicability_rate),
        recommended_tier: estimate.recommended_tier.to_string(),
        estimate,
    }
}

/// One visitor's pass through the calculator page.
///
/// Owns the form fields, the current step and the rendered panel, and is
/// serializable so a front end can persist or ship it as-is. The estimator
/// stays a plain function underneath.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculatorSession {
    pub form: CalculatorForm,
    pub step: CalculatorStep,
    pub panel: Option<ResultPanel>,
    #[serde(skip)]
    input: Option<EstimationInput>,
    #[serde(default)]
    pub assumptions: ValidatedAssumptions,
}

impl CalculatorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_assumptions(assumptions: ValidatedAssumptions) -> Self {
        CalculatorSession {
            assumptions,
            ..Self::default()
        }
    }

    pub fn set_industry(&mut self, code: impl Into<String>) {
        self.form.industry_code = code.into();
        self.invalidate();
    }

    pub fn set_usage_text(&mut self, text: impl Into<String>) {
        self.form.usage_text = text.into();
        self.invalidate();
    }

    pub fn set_export_region(&mut self, code: impl Into<String>) {
        self.form.export_region_code = code.into();
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.panel = None;
        self.input = None;
        self.step = CalculatorStep::Input;
    }

    /// Run the estimate for the current form. Invalid usage leaves no panel.
    pub fn calculate(&mut self) -> Result<&ResultPanel, InvalidInputError> {
        let outcome = InputGuard::parse_form(&self.form)
            .and_then(|input| estimate_with(&input, &self.assumptions).map(|r| (input, r)));
        match outcome {
            Ok((input, estimate)) => {
                self.input = Some(input);
                self.step = CalculatorStep::Result;
                Ok(&*self.panel.insert(render_panel(estimate)))
            }
            Err(e) => {
                self.invalidate();
                Err(e)
            }
        }
    }

    /// Reveal the contact form. Only meaningful once a result is shown.
    pub fn open_lead_capture(&mut self) -> bool {
        if self.step == CalculatorStep::Result && self.panel.is_some() {
            self.step = CalculatorStep::LeadCapture;
            true
        } else {
            false
        }
    }

    pub fn submit_lead(
        &mut self,
        form: &LeadCaptureForm,
        sink: &mut dyn LeadSink,
    ) -> Result<LeadSubmission, LeadError> {
        if self.step != CalculatorStep::LeadCapture {
            return Err(match self.panel {
                None => LeadError::NoEstimate,
                Some(_) => LeadError::NotOpen(self.step),
            });
        }
        let panel = self.panel.as_ref().ok_or(LeadError::NoEstimate)?;
        let input = match &self.input {
            Some(input) => input.clone(),
            None => InputGuard::parse_form(&self.form).map_err(|_| LeadError::NoEstimate)?,
        };
        InputGuard::validate_lead(form)?;

        let lead = LeadSubmission::new(form, input, panel.estimate.clone(), Utc::now());
        sink.submit(&lead)?;
        tracing::info!(
            company = %lead.company,
            tier = %lead.estimate.recommended_tier,
            "lead submitted"
        );
        self.step = CalculatorStep::Submitted;
        Ok(lead)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lead::MemorySink;
    use carbonos_estimator::ProductTier;

    fn session(industry: &str, usage: &str, region: &str) -> CalculatorSession {
        let mut s = CalculatorSession::new();
        s.set_industry(industry);
        s.set_usage_text(usage);
        s.set_export_region(region);
        s
    }

    #[test]
    fn test_calculate_renders_panel() {
        let mut s = session("manufacturing", "500", "eu");
        let panel = s.calculate().unwrap().clone();
        assert_eq!(panel.annual_emissions, "2,600 t CO₂e");
        assert_eq!(panel.tax_savings, "¥258,570");
        assert_eq!(panel.green_power_revenue, "¥22,500");
        assert_eq!(panel.tax_exposure, "100%");
        assert_eq!(panel.recommended_tier, "pro");
        assert_eq!(s.step, CalculatorStep::Result);
    }

    #[test]
    fn test_invalid_usage_shows_no_panel() {
        let mut s = session("manufacturing", "500", "eu");
        s.calculate().unwrap();
        s.form.usage_text = "abc".into();
        assert!(s.calculate().is_err());
        assert!(s.panel.is_none());
        assert_eq!(s.step, CalculatorStep::Input);
    }

    #[test]
    fn test_editing_a_field_hides_stale_panel() {
        let mut s = session("chemical", "5000", "us");
        assert_eq!(
            s.calculate().unwrap().estimate.recommended_tier,
            ProductTier::Enterprise
        );
        s.set_usage_text("100");
        assert!(s.panel.is_none());
        assert!(!s.open_lead_capture());
    }

    #[test]
    fn test_lead_flow() {
        let mut s = session("steel", "2000", "uk");
        s.calculate().unwrap();
        assert!(s.open_lead_capture());

        let form = LeadCaptureForm {
            name: "Zhang Min".into(),
            company: "Hebei Steelworks".into(),
            phone: "13912345678".into(),
            email: "zhang.min@example.com".into(),
        };
        let mut sink = MemorySink::default();
        let lead = s.submit_lead(&form, &mut sink).unwrap();

        assert_eq!(s.step, CalculatorStep::Submitted);
        assert_eq!(sink.submissions, vec![lead.clone()]);
        assert_eq!(lead.input.industry_code, "steel");
        assert_eq!(lead.estimate.recommended_tier, ProductTier::Pro);
    }

    #[test]
    fn test_lead_requires_estimate_and_valid_form() {
        let mut s = CalculatorSession::new();
        let mut sink = MemorySink::default();
        let form = LeadCaptureForm::default();
        assert!(matches!(
            s.submit_lead(&form, &mut sink),
            Err(LeadError::NoEstimate)
        ));

        let mut s = session("textile", "300", "japan");
        s.calculate().unwrap();
        assert!(s.open_lead_capture());
        assert!(matches!(
            s.submit_lead(&form, &mut sink),
            Err(LeadError::Form(LeadFormError::MissingField("name")))
        ));
        assert!(sink.submissions.is_empty());
        assert_eq!(s.step, CalculatorStep::LeadCapture);
    }

    #[test]
    fn test_lead_needs_open_form_and_submits_once() {
        let form = LeadCaptureForm {
            name: "Wang Fang".into(),
            company: "Suzhou Textiles".into(),
            phone: "13700001111".into(),
            email: "wang.fang@example.cn".into(),
        };
        let mut sink = MemorySink::default();
        let mut s = session("textile", "800", "eu");
        s.calculate().unwrap();

        assert!(matches!(
            s.submit_lead(&form, &mut sink),
            Err(LeadError::NotOpen(CalculatorStep::Result))
        ));
        assert!(sink.submissions.is_empty());

        assert!(s.open_lead_capture());
        s.submit_lead(&form, &mut sink).unwrap();
        assert!(matches!(
            s.submit_lead(&form, &mut sink),
            Err(LeadError::NotOpen(CalculatorStep::Submitted))
        ));
        assert!(!s.open_lead_capture());
        assert_eq!(sink.submissions.len(), 1);
    }

    #[test]
    fn test_tampered_session_assumptions_rejected() {
        let mut s = session("manufacturing", "500", "eu");
        s.calculate().unwrap();
        let mut value = serde_json::to_value(&s).unwrap();
        value["assumptions"]["assumed_product_cost"] = serde_json::json!(-50000.0);
        value["assumptions"]["fx_rate"] = serde_json::json!(-7.8);
        assert!(serde_json::from_value::<CalculatorSession>(value).is_err());
    }

    #[test]
    fn test_session_state_serializes() {
        let mut s = session("electronics", "120", "none");
        s.calculate().unwrap();
        let json = serde_json::to_string(&s).unwrap();
        let back: CalculatorSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back.form, s.form);
        assert_eq!(back.step, CalculatorStep::Result);
        assert_eq!(
            back.panel.as_ref().map(|p| p.tax_savings.as_str()),
            s.panel.as_ref().map(|p| p.tax_savings.as_str())
        );
    }
}
