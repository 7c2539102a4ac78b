//! Lead capture: the hand-off from a calculator result to the CRM.
//!
//! The CRM endpoint itself is external; [`LeadSink`] is the seam a deployment
//! plugs its transport into.

use std::io::Write;

use carbonos_estimator::{EstimationInput, EstimationResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::LeadCaptureForm;

/// Payload forwarded to the CRM: contact details plus the estimate that prompted them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadSubmission {
    pub name: String,
    pub company: String,
    pub phone: String,
    pub email: String,
    pub input: EstimationInput,
    pub estimate: EstimationResult,
    pub submitted_at: DateTime<Utc>,
}

impl LeadSubmission {
    pub fn new(
        form: &LeadCaptureForm,
        input: EstimationInput,
        estimate: EstimationResult,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        LeadSubmission {
            name: form.name.trim().to_string(),
            company: form.company.trim().to_string(),
            phone: form.phone.trim().to_string(),
            email: form.email.trim().to_string(),
            input,
            estimate,
            submitted_at,
        }
    }
}

#[derive(Debug, Error)]
pub enum LeadSinkError {
    #[error("failed to write lead: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode lead: {0}")]
    Encode(#[from] serde_json::Error),
}

pub trait LeadSink {
    fn submit(&mut self, lead: &LeadSubmission) -> Result<(), LeadSinkError>;
}

/// Writes each lead as one JSON line.
#[derive(Debug)]
pub struct JsonLineSink<W: Write> {
    out: W,
}

impl<W: Write> JsonLineSink<W> {
    pub fn new(out: W) -> Self {
        JsonLineSink { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> LeadSink for JsonLineSink<W> {
    fn submit(&mut self, lead: &LeadSubmission) -> Result<(), LeadSinkError> {
        serde_json::to_writer(&mut self.out, lead)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}

/// Keeps submissions in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub submissions: Vec<LeadSubmission>,
}

impl LeadSink for MemorySink {
    fn submit(&mut self, lead: &LeadSubmission) -> Result<(), LeadSinkError> {
        self.submissions.push(lead.clone());
        Ok(())
    }
}
