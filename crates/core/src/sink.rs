//! Append-only `key=value` output file read by the CI platform
//! (e.g. the file named by `GITHUB_OUTPUT`).

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::GateError;
use crate::model::RunOutcome;

/// Output key carrying `OK` / `ERROR`.
pub const STATUS_KEY: &str = "gate_status";
/// Output key carrying the human-readable message.
pub const MESSAGE_KEY: &str = "gate_message";

/// CI output file. Writes always append; earlier steps' output is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSink {
    path: PathBuf,
}

impl OutputSink {
    /// Sink appending to `path`; the file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File the sink appends to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends newline-terminated `key=value` pairs in order.
    ///
    /// Line breaks inside values are folded into spaces so each pair stays on
    /// one line.
    pub fn append(&self, pairs: &[(&str, &str)]) -> Result<(), GateError> {
        let mut buf = String::new();
        for (key, value) in pairs {
            buf.push_str(key);
            buf.push('=');
            buf.push_str(&single_line(value));
            buf.push('\n');
        }

        let write = || -> std::io::Result<()> {
            let mut f = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)?;
            f.write_all(buf.as_bytes())?;
            f.flush()
        };
        write().map_err(|source| GateError::SinkWriteFailed {
            path: self.path.clone(),
            source,
        })
    }

    /// Writes `gate_status` and `gate_message` for the outcome.
    pub fn write_outcome(&self, outcome: &RunOutcome) -> Result<(), GateError> {
        self.append(&[
            (STATUS_KEY, outcome.status.as_str()),
            (MESSAGE_KEY, &outcome.message),
        ])
    }
}

fn single_line(value: &str) -> String {
    value
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
