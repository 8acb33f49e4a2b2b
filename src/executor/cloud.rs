// Managed Tracetest cloud backend

use crate::executor::backend::{CliExecutor, log_ignored_args, required_var, run_invocation};
use crate::executor::config::ExecutorConfig;
use crate::executor::error::{ExecuteError, ExecutorError};
use crate::executor::process::{Invocation, ProcessRunner};
use crate::executor::vars::Variables;
use crate::model::{ExecutionRequest, RunResult};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

pub const TRACETEST_TOKEN_VAR: &str = "TRACETEST_TOKEN";
pub const TRACETEST_ORGANIZATION_VAR: &str = "TRACETEST_ORGANIZATION";
pub const TRACETEST_ENVIRONMENT_VAR: &str = "TRACETEST_ENVIRONMENT";

/// Public cloud URL, used only to rewrite links in output
pub const TRACETEST_CLOUD_URL: &str = "https://app.tracetest.io";

const REQUIRED: &[&str] = &[
    TRACETEST_TOKEN_VAR,
    TRACETEST_ORGANIZATION_VAR,
    TRACETEST_ENVIRONMENT_VAR,
];

/// Runs tests through the managed cloud service.
///
/// The CLI is authenticated with a `configure` call before the run; the run
/// itself carries no endpoint.
pub struct CloudExecutor {
    process: Arc<dyn ProcessRunner>,
    config: ExecutorConfig,
}

impl CloudExecutor {
    pub fn new(process: Arc<dyn ProcessRunner>, config: ExecutorConfig) -> Self {
        Self { process, config }
    }

    async fn configure(
        &self,
        vars: &Variables,
        token: &str,
        organization: &str,
        environment: &str,
    ) -> Result<(), ExecuteError> {
        info!(organization = %organization, environment = %environment, "configuring tracetest CLI with token");

        let invocation = Invocation::new(&self.config.binary)
            .working_dir(self.config.working_dir.clone())
            .envs(vars.env())
            .args([
                "configure",
                "--token",
                token,
                "--organization",
                organization,
                "--environment",
                environment,
            ]);

        let output = self
            .process
            .run(&invocation)
            .await
            .map_err(ExecuteError::empty)?;

        if let Some(err) = output.exit_error(&invocation) {
            error!(error = %err, "failed to configure tracetest CLI");
            let mut text = output.stdout_text();
            text.push_str(&String::from_utf8_lossy(&output.stderr));
            let result = RunResult::with_endpoints(text, TRACETEST_CLOUD_URL, "");
            return Err(ExecuteError::new(
                result,
                ExecutorError::ConfigureFailed(err.to_string()),
            ));
        }

        Ok(())
    }
}

#[async_trait]
impl CliExecutor for CloudExecutor {
    fn required_env_vars(&self) -> &'static [&'static str] {
        REQUIRED
    }

    async fn execute(
        &self,
        vars: &Variables,
        request: &ExecutionRequest,
        test_file: &Path,
    ) -> Result<RunResult, ExecuteError> {
        let token = required_var(vars, TRACETEST_TOKEN_VAR)?;
        let organization = required_var(vars, TRACETEST_ORGANIZATION_VAR)?;
        let environment = required_var(vars, TRACETEST_ENVIRONMENT_VAR)?;

        self.configure(vars, &token, &organization, &environment)
            .await?;

        log_ignored_args(request);

        let invocation = run_invocation(&self.config, vars, None, test_file);
        info!(file = %test_file.display(), "running test on tracetest cloud");

        let output = self
            .process
            .run(&invocation)
            .await
            .map_err(ExecuteError::empty)?;

        let result = RunResult::with_endpoints(output.stdout_text(), TRACETEST_CLOUD_URL, "");
        match output.exit_error(&invocation) {
            Some(err) => Err(ExecuteError::new(result, err)),
            None => Ok(result),
        }
    }
}
