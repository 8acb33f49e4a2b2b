// Executor module - Backends driving the tracetest CLI
#![allow(unused_imports)]

pub mod backend;
pub mod cloud;
pub mod config;
pub mod core;
pub mod error;
pub mod process;
pub mod vars;

pub use backend::{Backend, BackendKind, CliExecutor};
pub use cloud::CloudExecutor;
pub use config::ExecutorConfig;
pub use self::core::CoreExecutor;
pub use error::{ExecuteError, ExecutorError, Result};
pub use process::{CommandRunner, Invocation, ProcessOutput, ProcessRunner};
pub use vars::Variables;
