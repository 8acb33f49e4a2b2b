// Process runner used to invoke the tracetest CLI
#![allow(dead_code)]

use crate::executor::{ExecutorError, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Instant;
use tokio::process::Command;
use tracing::{debug, info};

/// A single command to run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    pub working_dir: Option<PathBuf>,
    pub program: String,
    /// Extra environment on top of the inherited one
    pub env: Vec<(String, String)>,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Default::default()
        }
    }

    pub fn working_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.working_dir = dir;
        self
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn envs<'a, I>(mut self, env: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        self.env
            .extend(env.into_iter().map(|(k, v)| (k.to_string(), v.to_string())));
        self
    }

    /// Program and first argument, for logs and error messages
    pub fn label(&self) -> String {
        match self.args.first() {
            Some(sub) => format!("{} {}", self.program, sub),
            None => self.program.clone(),
        }
    }
}

/// Captured process output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    /// None when the process was killed by a signal
    pub exit_code: Option<i32>,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    /// Error for a non-zero exit, if any
    pub fn exit_error(&self, invocation: &Invocation) -> Option<ExecutorError> {
        (!self.success()).then(|| ExecutorError::NonZeroExit {
            command: invocation.label(),
            code: self.exit_code,
        })
    }
}

/// Runs external commands.
///
/// A non-zero exit is not an error here; only failing to start the process is.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run(&self, invocation: &Invocation) -> Result<ProcessOutput>;
}

/// [`ProcessRunner`] backed by `tokio::process`
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandRunner;

#[async_trait]
impl ProcessRunner for CommandRunner {
    async fn run(&self, invocation: &Invocation) -> Result<ProcessOutput> {
        let start = Instant::now();

        debug!(
            program = %invocation.program,
            subcommand = %invocation.label(),
            working_dir = ?invocation.working_dir,
            env_count = invocation.env.len(),
            "spawning process"
        );

        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args);
        command.envs(invocation.env.iter().map(|(k, v)| (k, v)));
        if let Some(dir) = &invocation.working_dir {
            command.current_dir(dir);
        }

        let output = command
            .output()
            .await
            .map_err(|e| ExecutorError::SpawnFailed(invocation.program.clone(), e.to_string()))?;

        let duration_ms = start.elapsed().as_millis() as u64;

        if !output.stderr.is_empty() {
            debug!(stderr = %String::from_utf8_lossy(&output.stderr), "process stderr");
        }

        info!(
            command = %invocation.label(),
            duration_ms = duration_ms,
            exit_code = output.status.code().unwrap_or(-1),
            stdout_bytes = output.stdout.len(),
            "process finished"
        );

        Ok(ProcessOutput {
            stdout: output.stdout,
            stderr: output.stderr,
            exit_code: output.status.code(),
        })
    }
}
