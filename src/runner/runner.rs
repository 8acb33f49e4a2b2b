// Tracetest runner: content, backend selection, result conversion
#![allow(dead_code)]

use crate::executor::{
    Backend, BackendKind, CliExecutor, CommandRunner, ExecuteError, ProcessRunner, Variables,
};
use crate::model::{ExecutionRequest, ExecutionResult};
use crate::runner::config::RunnerConfig;
use crate::runner::content::{ContentFetcher, LocalFetcher};
use crate::runner::error::{Result, RunnerError};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Runs one execution request at a time against the selected backend
pub struct TracetestRunner {
    config: RunnerConfig,
    fetcher: Arc<dyn ContentFetcher>,
    backends: [Backend; 2],
}

impl TracetestRunner {
    /// Runner using the real CLI and a fetcher writing into the data directory
    pub fn new(config: RunnerConfig) -> Self {
        let fetcher = Arc::new(LocalFetcher::new(config.data_dir.clone()));
        Self::with_parts(config, fetcher, Arc::new(CommandRunner))
    }

    pub fn with_parts(
        config: RunnerConfig,
        fetcher: Arc<dyn ContentFetcher>,
        process: Arc<dyn ProcessRunner>,
    ) -> Self {
        let backends = Backend::all(process, &config.executor);
        Self {
            config,
            fetcher,
            backends,
        }
    }

    /// Run the request.
    ///
    /// A test that fails is reported as `Ok` with a failed status. `Err` is
    /// reserved for configuration, selection and transport problems.
    pub async fn run(&self, request: &ExecutionRequest) -> Result<ExecutionResult> {
        info!(execution_id = %request.id, name = %request.name, "preparing test run");

        let vars = Variables::from_request(&request.variables);
        debug!(count = vars.len(), "variables resolved");

        let test_file = self.content_path(request).await.inspect_err(|e| {
            error!(error = %e, "error fetching the content file");
        })?;

        let backend = Backend::select(&self.backends, &vars).ok_or_else(|| {
            let err = self.no_backend_error();
            error!(error = %err, "no backend variables defined");
            err
        })?;
        info!(backend = %backend.kind(), file = %test_file.display(), "backend selected");

        let result = match backend.execute(&vars, request, &test_file).await {
            Ok(run) => run.to_successful_execution_result(),
            Err(ExecuteError { source, .. }) if source.is_transport() => {
                error!(error = %source, "failed to start tracetest");
                return Err(source.into());
            }
            Err(ExecuteError { result, source }) => {
                warn!(error = %source, "tracetest execution failed");
                result.to_failed_execution_result(&source)
            }
        };

        info!(status = ?result.status, output_bytes = result.output.len(), "test run finished");
        Ok(mask_secrets(result, &vars))
    }

    async fn content_path(&self, request: &ExecutionRequest) -> Result<PathBuf> {
        let data_dir = &self.config.data_dir;
        if !tokio::fs::try_exists(data_dir).await.unwrap_or(false) {
            return Err(RunnerError::DataDirNotFound(data_dir.clone()));
        }

        if !self.fetcher.is_file(&request.content) {
            return Err(RunnerError::ContentNotFile(request.content.content_type));
        }

        self.fetcher.fetch(&request.content).await
    }

    fn no_backend_error(&self) -> RunnerError {
        let required = |kind: BackendKind| {
            self.backends
                .iter()
                .find(|b| b.kind() == kind)
                .map(|b| b.required_env_vars().to_vec())
                .unwrap_or_default()
        };
        RunnerError::NoBackend {
            cloud: required(BackendKind::Cloud),
            core: required(BackendKind::Core),
        }
    }
}

fn mask_secrets(mut result: ExecutionResult, vars: &Variables) -> ExecutionResult {
    result.output = vars.obfuscate(&result.output);
    result.error_message = result.error_message.map(|m| vars.obfuscate(&m));
    result
}
