//! Adapters between the outside world and the estimator: text parsing,
//! currency formatting, reports, CSV batches and the interactive session.

pub mod csv;
pub mod form;
pub mod format;
pub mod report;
pub mod session;
