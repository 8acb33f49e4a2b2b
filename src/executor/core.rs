// Self-hosted Tracetest core backend

use crate::executor::backend::{CliExecutor, log_ignored_args, required_var, run_invocation};
use crate::executor::config::ExecutorConfig;
use crate::executor::error::ExecuteError;
use crate::executor::process::ProcessRunner;
use crate::executor::vars::Variables;
use crate::model::{ExecutionRequest, RunResult};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Core server URL
pub const TRACETEST_ENDPOINT_VAR: &str = "TRACETEST_ENDPOINT";
/// Externally reachable URL substituted for the server URL in output
pub const TRACETEST_OUTPUT_ENDPOINT_VAR: &str = "TRACETEST_OUTPUT_ENDPOINT";

const REQUIRED: &[&str] = &[TRACETEST_ENDPOINT_VAR];

/// Runs tests against a self-hosted core server.
///
/// There is no configure step; the endpoint goes straight on the run command line.
pub struct CoreExecutor {
    process: Arc<dyn ProcessRunner>,
    config: ExecutorConfig,
}

impl CoreExecutor {
    pub fn new(process: Arc<dyn ProcessRunner>, config: ExecutorConfig) -> Self {
        Self { process, config }
    }
}

#[async_trait]
impl CliExecutor for CoreExecutor {
    fn required_env_vars(&self) -> &'static [&'static str] {
        REQUIRED
    }

    async fn execute(
        &self,
        vars: &Variables,
        request: &ExecutionRequest,
        test_file: &Path,
    ) -> Result<RunResult, ExecuteError> {
        let endpoint = required_var(vars, TRACETEST_ENDPOINT_VAR)?;

        let output_endpoint = match vars.get(TRACETEST_OUTPUT_ENDPOINT_VAR) {
            Some(value) => value.to_string(),
            None => {
                warn!(
                    var = TRACETEST_OUTPUT_ENDPOINT_VAR,
                    "variable not found, assuming empty value"
                );
                String::new()
            }
        };

        log_ignored_args(request);

        let invocation = run_invocation(&self.config, vars, Some(&endpoint), test_file);
        info!(endpoint = %endpoint, file = %test_file.display(), "running test on tracetest core");

        let output = self
            .process
            .run(&invocation)
            .await
            .map_err(ExecuteError::empty)?;

        let result = RunResult::with_endpoints(output.stdout_text(), endpoint, output_endpoint);
        match output.exit_error(&invocation) {
            Some(err) => Err(ExecuteError::new(result, err)),
            None => Ok(result),
        }
    }
}
