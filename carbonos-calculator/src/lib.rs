#![forbid(unsafe_code)]
//! Presentation layer for the CarbonOS ROI calculator: form and step state,
//! result-panel formatting, and the lead-capture hand-off.

pub mod format;
pub mod guards;
pub mod lead;
pub mod pipeline;
pub mod types;

pub use guards::{InputGuard, LeadFormError};
pub use lead::{JsonLineSink, LeadSink, LeadSinkError, LeadSubmission, MemorySink};
pub use pipeline::{render_panel, CalculatorSession, LeadError};
pub use types::{
    industry_options, region_options, CalculatorForm, CalculatorStep, LeadCaptureForm,
    ResultPanel, SelectOption,
};
