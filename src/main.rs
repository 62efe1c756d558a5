//! validate-models - Main entry point

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use validate_models::{DEFAULT_MANIFEST_PATH, validate_file};

#[derive(Parser, Debug)]
#[command(name = "validate-models")]
#[command(about = "Validate the supported models JSON manifest", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the manifest file
    #[arg(default_value = DEFAULT_MANIFEST_PATH)]
    path: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Log format (json or pretty)
    #[arg(long, default_value = "pretty")]
    log_format: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging; the report owns stdout, so logs go to stderr
    match cli.log_format.as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(&cli.log_level)
                .with_writer(std::io::stderr)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(&cli.log_level)
                .with_writer(std::io::stderr)
                .init();
        }
    }

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<bool> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    validate_file(&cli.path, &mut out)
}
