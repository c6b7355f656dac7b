#![forbid(unsafe_code)]

//! Waits for a SonarQube analysis to be processed and reports its quality
//! gate verdict as an exit code and optional CI output.

pub mod cli;
pub mod client;
pub mod gate;
pub mod pipeline;
pub mod poller;
pub mod reporter;

pub use client::SonarClient;
pub use gate::GateReport;
pub use pipeline::{execute, run};
pub use poller::{wait_for_task, PollSummary};
pub use reporter::Reporter;
