use thiserror::Error;

/// The only way an estimate can fail: the usage figure is unusable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInputError {
    #[error("annual electricity usage is missing")]
    MissingUsage,
    #[error("annual electricity usage is not a number: {0:?}")]
    NotANumber(String),
    #[error("annual electricity usage must be finite")]
    NotFinite,
    #[error("annual electricity usage must be positive, got {0}")]
    NonPositive(f64),
    #[error("annual electricity usage {0} is too large to estimate")]
    OutOfRange(f64),
}

/// Errors loading or validating [`crate::EstimatorAssumptions`].
#[derive(Debug, Error)]
pub enum AssumptionsError {
    #[error("cannot read assumptions file: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse assumptions: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid assumption: {0}")]
    Invalid(&'static str),
}

/// Parse free-text usage (10,000 kWh units) into a finite positive number.
pub fn parse_usage(text: &str) -> Result<f64, InvalidInputError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(InvalidInputError::MissingUsage);
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| InvalidInputError::NotANumber(trimmed.to_string()))?;
    check_usage(value)?;
    Ok(value)
}

pub(crate) fn check_usage(value: f64) -> Result<(), InvalidInputError> {
    if !value.is_finite() {
        return Err(InvalidInputError::NotFinite);
    }
    if value <= 0.0 {
        return Err(InvalidInputError::NonPositive(value));
    }
    Ok(())
}
