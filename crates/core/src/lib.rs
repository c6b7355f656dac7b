#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Shared models and logic for the SonarQube quality gate waiter.
//!
//! Everything here is synchronous and free of network code: configuration,
//! the error taxonomy, the `report-task.txt` parser, wire models of the two
//! SonarQube endpoints and the CI output sink.

pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod report;
pub mod sink;

pub use config::{Config, GateLookup, PollPolicy};
pub use error::GateError;
pub use model::{GateVerdict, OutcomeStatus, RunOutcome, TaskStatus};
pub use report::ReportArtifact;
pub use sink::OutputSink;
