// Runner configuration

use crate::executor::ExecutorConfig;
use crate::executor::config::{DEFAULT_BINARY, DEFAULT_OUTPUT_FORMAT};
use std::path::PathBuf;
use tracing::warn;

/// Default directory test content is fetched into
pub const DEFAULT_DATA_DIR: &str = "/data";

/// Runner configuration, loaded once at startup
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Directory test content is fetched into (must exist)
    pub data_dir: PathBuf,
    /// Settings handed to the backends
    pub executor: ExecutorConfig,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            executor: ExecutorConfig::default(),
        }
    }
}

/// Read a string variable, warning and falling back to `default` when set but empty.
fn string_var(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: &str) -> String {
    match lookup(name) {
        Some(v) if v.trim().is_empty() => {
            warn!(var = name, "Empty env var value, using default");
            default.to_string()
        }
        Some(v) => v,
        None => default.to_string(),
    }
}

impl RunnerConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any name to value source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = RunnerConfig::default();

        config.data_dir = PathBuf::from(string_var(&lookup, "RUNNER_DATADIR", DEFAULT_DATA_DIR));
        config.executor.working_dir = lookup("RUNNER_WORKDIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        config.executor.binary = string_var(&lookup, "TRACETEST_BINARY", DEFAULT_BINARY);
        config.executor.output_format =
            string_var(&lookup, "TRACETEST_OUTPUT_FORMAT", DEFAULT_OUTPUT_FORMAT);

        config
    }
}
