// Error types for Executor module
#![allow(dead_code)]

use crate::model::RunResult;
use thiserror::Error;

/// Executor error types
#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("{0} variable was not found")]
    MissingVariable(String),

    #[error("Failed to spawn '{0}': {1}")]
    SpawnFailed(String, String),

    #[error("Failed to configure tracetest CLI: {0}")]
    ConfigureFailed(String),

    #[error("'{command}' exited with {}", exit_label(.code))]
    NonZeroExit { command: String, code: Option<i32> },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {code}"),
        None => "no exit status (terminated by signal)".to_string(),
    }
}

impl ExecutorError {
    /// Errors raised before the tool could run at all
    pub fn is_transport(&self) -> bool {
        matches!(self, ExecutorError::SpawnFailed(..) | ExecutorError::Io(_))
    }
}

/// Failed backend execution along with whatever output was captured
#[derive(Debug, Error)]
#[error("{source}")]
pub struct ExecuteError {
    pub result: RunResult,
    #[source]
    pub source: ExecutorError,
}

impl ExecuteError {
    pub fn new(result: RunResult, source: ExecutorError) -> Self {
        Self { result, source }
    }

    /// Failure that happened before any output was captured
    pub fn empty(source: ExecutorError) -> Self {
        Self::new(RunResult::default(), source)
    }
}

pub type Result<T> = std::result::Result<T, ExecutorError>;
