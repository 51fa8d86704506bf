//! deccalc: decimal calculator with pluggable operations and history.

use std::process::ExitCode;

use anyhow::Result;
use deccalc_lib::{app, config};

fn main() -> Result<ExitCode> {
    // Variables from .env feed the clap `env` fallbacks
    dotenvy::dotenv().ok();
    let config = config::AppConfig::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_new(&config.log_level)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let code = app::run(&config)?;
    Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)))
}
