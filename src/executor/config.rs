// Executor configuration

use std::path::PathBuf;

/// Default tracetest CLI binary
pub const DEFAULT_BINARY: &str = "tracetest";
/// Default output format passed to `tracetest run`
pub const DEFAULT_OUTPUT_FORMAT: &str = "pretty";

/// Executor configuration
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Path or name of the tracetest CLI binary
    pub binary: String,
    /// Value of the `--output` flag
    pub output_format: String,
    /// Working directory for the tool (None = current directory)
    pub working_dir: Option<PathBuf>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            binary: DEFAULT_BINARY.to_string(),
            output_format: DEFAULT_OUTPUT_FORMAT.to_string(),
            working_dir: None,
        }
    }
}
