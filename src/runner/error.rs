// Error types for Runner module
#![allow(dead_code)]

use crate::executor::ExecutorError;
use crate::model::ContentType;
use std::path::PathBuf;
use thiserror::Error;

/// Runner errors. A failing test is never one of these; it is a result status.
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("Data directory not found: {}", .0.display())]
    DataDirNotFound(PathBuf),

    #[error("Test content type is not a file: {0:?}")]
    ContentNotFile(ContentType),

    #[error("Unsupported test content type: {0:?}")]
    UnsupportedContent(ContentType),

    #[error("Failed to fetch test content: {0}")]
    FetchFailed(String),

    #[error(
        "No tracetest backend configured: cloud requires [{}], core requires [{}]",
        .cloud.join(", "),
        .core.join(", ")
    )]
    NoBackend {
        cloud: Vec<&'static str>,
        core: Vec<&'static str>,
    },

    #[error(transparent)]
    Executor(#[from] ExecutorError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, RunnerError>;
