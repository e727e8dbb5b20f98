//! Run report returned to the caller.
//!
//! The report is built up while an action runs and serialized to JSON once
//! the action is done. Its layout matches what the automation framework
//! expects from a module: `changed`, `failed`, `msg`, `stdout`, `stderr` and
//! `meta.messages`.

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::error::SumaError;

/// Ordered informational messages collected during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    pub messages: Vec<String>,
}

/// Result of one module invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub changed: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub failed: bool,
    pub msg: String,
    pub stdout: String,
    pub stderr: String,
    pub meta: Meta,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one message.
    pub fn push_message(&mut self, msg: impl Into<String>) {
        self.meta.messages.push(msg.into());
    }

    /// Append every line of a command's output, trailing blank lines dropped.
    pub fn push_output_lines(&mut self, output: &str) {
        self.meta
            .messages
            .extend(output.trim_end().lines().map(str::to_string));
    }

    /// Record the output of the last external command.
    pub fn capture(&mut self, stdout: &str, stderr: &str) {
        self.stdout = stdout.to_string();
        self.stderr = stderr.to_string();
    }

    pub fn messages(&self) -> &[String] {
        &self.meta.messages
    }

    /// Close the report after a successful run.
    pub fn succeed(mut self, msg: impl Into<String>) -> Self {
        self.msg = msg.into();
        self.failed = false;
        self
    }

    /// Close the report after a fatal error.
    pub fn fail(mut self, err: &SumaError) -> Self {
        error!("{}", err);
        self.failed = true;
        self.msg = err.to_string();
        if let Some((stdout, stderr)) = err.captured_output() {
            self.capture(stdout, stderr);
        }
        self
    }

    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
