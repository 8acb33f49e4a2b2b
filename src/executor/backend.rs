// Backend executors and selection policy

use crate::executor::cloud::CloudExecutor;
use crate::executor::config::ExecutorConfig;
use crate::executor::core::CoreExecutor;
use crate::executor::error::{ExecuteError, ExecutorError};
use crate::executor::process::{Invocation, ProcessRunner};
use crate::executor::vars::Variables;
use crate::model::{ExecutionRequest, RunResult};
use async_trait::async_trait;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Capability shared by the backends that drive the tracetest CLI
#[async_trait]
pub trait CliExecutor: Send + Sync {
    /// Variables that must all be present for this backend to be usable
    fn required_env_vars(&self) -> &'static [&'static str];

    /// Presence by key only; empty values count
    fn has_env_vars_defined(&self, vars: &Variables) -> bool {
        self.required_env_vars()
            .iter()
            .all(|name| vars.contains(name))
    }

    /// Configure the CLI if needed, then run the test in `test_file`
    async fn execute(
        &self,
        vars: &Variables,
        request: &ExecutionRequest,
        test_file: &Path,
    ) -> Result<RunResult, ExecuteError>;
}

/// Read a required variable, failing with the variable name
pub(crate) fn required_var(vars: &Variables, name: &str) -> Result<String, ExecuteError> {
    vars.get(name)
        .map(str::to_string)
        .ok_or_else(|| ExecuteError::empty(ExecutorError::MissingVariable(name.to_string())))
}

/// `tracetest run test` invocation shared by both backends
pub(crate) fn run_invocation(
    config: &ExecutorConfig,
    vars: &Variables,
    server_url: Option<&str>,
    test_file: &Path,
) -> Invocation {
    let mut invocation = Invocation::new(&config.binary)
        .working_dir(config.working_dir.clone())
        .envs(vars.env())
        .args(["run", "test"]);
    if let Some(url) = server_url {
        invocation = invocation.args(["--server-url", url]);
    }
    invocation
        .arg("--file")
        .arg(test_file.display().to_string())
        .args(["--output", config.output_format.as_str()])
}

/// Extra request arguments are accepted but never reach the tool
pub(crate) fn log_ignored_args(request: &ExecutionRequest) {
    if !request.args.is_empty() {
        debug!(
            execution_id = %request.id,
            args = ?request.args,
            "execution args are not forwarded to tracetest"
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Cloud,
    Core,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Cloud => write!(f, "cloud"),
            BackendKind::Core => write!(f, "core"),
        }
    }
}

/// The two supported backends
pub enum Backend {
    Cloud(CloudExecutor),
    Core(CoreExecutor),
}

impl Backend {
    /// All backends in selection priority order
    pub fn all(process: Arc<dyn ProcessRunner>, config: &ExecutorConfig) -> [Backend; 2] {
        [
            Backend::Cloud(CloudExecutor::new(process.clone(), config.clone())),
            Backend::Core(CoreExecutor::new(process, config.clone())),
        ]
    }

    pub fn kind(&self) -> BackendKind {
        match self {
            Backend::Cloud(_) => BackendKind::Cloud,
            Backend::Core(_) => BackendKind::Core,
        }
    }

    fn executor(&self) -> &dyn CliExecutor {
        match self {
            Backend::Cloud(e) => e as &dyn CliExecutor,
            Backend::Core(e) => e,
        }
    }

    /// First backend whose variables are all present
    pub fn select<'a>(backends: &'a [Backend], vars: &Variables) -> Option<&'a Backend> {
        backends.iter().find(|b| b.has_env_vars_defined(vars))
    }
}

impl fmt::Debug for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Backend").field(&self.kind()).finish()
    }
}

#[async_trait]
impl CliExecutor for Backend {
    fn required_env_vars(&self) -> &'static [&'static str] {
        self.executor().required_env_vars()
    }

    fn has_env_vars_defined(&self, vars: &Variables) -> bool {
        self.executor().has_env_vars_defined(vars)
    }

    async fn execute(
        &self,
        vars: &Variables,
        request: &ExecutionRequest,
        test_file: &Path,
    ) -> Result<RunResult, ExecuteError> {
        self.executor().execute(vars, request, test_file).await
    }
}
