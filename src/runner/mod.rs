// Runner module - Orchestrates one execution request
#![allow(unused_imports)]

pub mod config;
pub mod content;
pub mod error;
pub mod runner;

pub use config::RunnerConfig;
pub use content::{ContentFetcher, LocalFetcher};
pub use error::{Result, RunnerError};
pub use runner::TracetestRunner;
