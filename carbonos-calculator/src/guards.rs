#![forbid(unsafe_code)]

use carbonos_estimator::{EstimationInput, InvalidInputError};
use thiserror::Error;

use crate::types::{CalculatorForm, LeadCaptureForm};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeadFormError {
    #[error("{0} must not be empty")]
    MissingField(&'static str),
    #[error("phone number must contain 7 to 20 digits")]
    InvalidPhone,
    #[error("email address is not valid")]
    InvalidEmail,
}

/// InputGuard: the only path from raw form fields to estimator input.
pub struct InputGuard;

impl InputGuard {
    pub fn parse_form(form: &CalculatorForm) -> Result<EstimationInput, InvalidInputError> {
        EstimationInput::parse(
            form.industry_code.trim(),
            &form.usage_text,
            form.export_region_code.trim(),
        )
    }

    pub fn validate_lead(lead: &LeadCaptureForm) -> Result<(), LeadFormError> {
        if lead.name.trim().is_empty() {
            return Err(LeadFormError::MissingField("name"));
        }
        if lead.company.trim().is_empty() {
            return Err(LeadFormError::MissingField("company"));
        }
        if lead.phone.trim().is_empty() {
            return Err(LeadFormError::MissingField("phone"));
        }
        if lead.email.trim().is_empty() {
            return Err(LeadFormError::MissingField("email"));
        }
        if !valid_phone(lead.phone.trim()) {
            return Err(LeadFormError::InvalidPhone);
        }
        if !valid_email(lead.email.trim()) {
            return Err(LeadFormError::InvalidEmail);
        }
        Ok(())
    }
}

fn valid_phone(phone: &str) -> bool {
    let body = phone.strip_prefix('+').unwrap_or(phone);
    if !body.chars().all(|c| c.is_ascii_digit() || c == ' ' || c == '-') {
        return false;
    }
    let digits = body.chars().filter(char::is_ascii_digit).count();
    (7..=20).contains(&digits)
}

fn valid_email(email: &str) -> bool {
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|l| !l.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead() -> LeadCaptureForm {
        LeadCaptureForm {
            name: "Li Wei".into(),
            company: "Shenzhen Precision Parts".into(),
            phone: "+86 138-0013-8000".into(),
            email: "li.wei@example.cn".into(),
        }
    }

    #[test]
    fn test_parse_form_trims_codes() {
        let form = CalculatorForm::new(" chemical ", "5000", " us");
        let input = InputGuard::parse_form(&form).unwrap();
        assert_eq!(input.industry_code, "chemical");
        assert_eq!(input.export_region_code, "us");
        assert_eq!(input.annual_electricity_usage, 5000.0);
    }

    #[test]
    fn test_parse_form_rejects_bad_usage() {
        let form = CalculatorForm::new("chemical", "abc", "us");
        assert!(InputGuard::parse_form(&form).is_err());
    }

    #[test]
    fn test_valid_lead_passes() {
        assert_eq!(InputGuard::validate_lead(&lead()), Ok(()));
    }

    #[test]
    fn test_lead_missing_fields() {
        let mut l = lead();
        l.company = "  ".into();
        assert_eq!(
            InputGuard::validate_lead(&l),
            Err(LeadFormError::MissingField("company"))
        );
    }

    #[test]
    fn test_lead_bad_phone_and_email() {
        let mut l = lead();
        l.phone = "12345".into();
        assert_eq!(InputGuard::validate_lead(&l), Err(LeadFormError::InvalidPhone));

        let mut l = lead();
        l.phone = "138x0013".into();
        assert_eq!(InputGuard::validate_lead(&l), Err(LeadFormError::InvalidPhone));

        for email in ["li.wei", "li@wei", "a@@b.cn", "@example.cn", "li wei@example.cn", "li@example."] {
            let mut l = lead();
            l.email = email.into();
            assert_eq!(InputGuard::validate_lead(&l), Err(LeadFormError::InvalidEmail), "{email}");
        }
    }
}
