// Run result wrapping raw tool output
#![allow(dead_code)]

use crate::model::types::{ExecutionResult, ExecutionStatus};
use std::fmt::Display;
use tracing::debug;

/// Glyph the tool prints for a passing step
pub const PASSED_TEST_ICON: &str = "✔";
/// Glyph the tool prints for a failing step
pub const FAILED_TEST_ICON: &str = "✘";

/// Output captured from one tool invocation.
///
/// Status is always derived from the output, so the two can never disagree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunResult {
    output: String,
    server_endpoint: String,
    output_endpoint: String,
}

impl RunResult {
    pub fn new(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            ..Default::default()
        }
    }

    /// Result whose links to `server_endpoint` are rewritten to `output_endpoint`
    pub fn with_endpoints(
        output: impl Into<String>,
        server_endpoint: impl Into<String>,
        output_endpoint: impl Into<String>,
    ) -> Self {
        Self {
            output: output.into(),
            server_endpoint: server_endpoint.into(),
            output_endpoint: output_endpoint.into(),
        }
    }

    /// Output as reported to the user
    pub fn output(&self) -> String {
        if !self.output_endpoint.is_empty() && !self.server_endpoint.is_empty() {
            return self
                .output
                .replace(&self.server_endpoint, &self.output_endpoint);
        }
        self.output.clone()
    }

    /// Raw output exactly as the tool printed it
    pub fn raw_output(&self) -> &str {
        &self.output
    }

    pub fn server_endpoint(&self) -> &str {
        &self.server_endpoint
    }

    pub fn output_endpoint(&self) -> &str {
        &self.output_endpoint
    }

    /// Only the failure glyph counts. Output with no glyph at all is a success.
    pub fn is_successful(&self) -> bool {
        !self.output.contains(FAILED_TEST_ICON)
    }

    pub fn status(&self) -> ExecutionStatus {
        if self.is_successful() {
            ExecutionStatus::Passed
        } else {
            ExecutionStatus::Failed
        }
    }

    pub fn to_successful_execution_result(&self) -> ExecutionResult {
        ExecutionResult {
            status: self.status(),
            output: self.output(),
            error_message: None,
        }
    }

    /// Always failed, whatever the glyphs say. The tool output doubles as
    /// the error message; `err` is only logged.
    pub fn to_failed_execution_result(&self, err: &impl Display) -> ExecutionResult {
        debug!(error = %err, "discarding executor error in favour of tool output");
        let output = self.output();
        ExecutionResult {
            status: ExecutionStatus::Failed,
            error_message: Some(output.clone()),
            output,
        }
    }
}
