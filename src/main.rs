mod executor;
mod model;
mod runner;

use clap::Parser;
use model::ExecutionRequest;
use runner::{RunnerConfig, TracetestRunner};
use std::path::PathBuf;
use std::process;
use tracing::{Level, error, info};
use tracing_subscriber::fmt;

/// CLI arguments
#[derive(Debug, Parser)]
#[command(name = "tracetest-executor")]
#[command(about = "Runs a Tracetest test definition and reports a normalized result")]
struct Args {
    /// Execution request as inline JSON
    #[arg(conflicts_with = "file", required_unless_present = "file")]
    execution: Option<String>,

    /// Read the execution request JSON from a file
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: Level,
}

fn load_request(args: &Args) -> Result<ExecutionRequest, Box<dyn std::error::Error>> {
    let raw = match (&args.execution, &args.file) {
        (Some(json), _) => json.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => return Err("no execution request given".into()),
    };
    Ok(serde_json::from_str(&raw)?)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Logs go to stderr, stdout carries the result
    fmt()
        .with_max_level(args.log_level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!("Preparing tracetest executor...");

    let config = RunnerConfig::from_env();
    info!(
        data_dir = %config.data_dir.display(),
        binary = %config.executor.binary,
        "Configuration loaded"
    );

    let request = match load_request(&args) {
        Ok(request) => request,
        Err(e) => {
            error!(error = %e, "Invalid execution request");
            process::exit(1);
        }
    };

    let runner = TracetestRunner::new(config);

    match runner.run(&request).await {
        Ok(result) => {
            info!(status = ?result.status, "Execution finished");
            println!("{}", serde_json::to_string(&result)?);
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Execution could not be completed");
            process::exit(1);
        }
    }
}
