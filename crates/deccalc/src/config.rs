//! Application configuration from CLI flags and environment.

use std::time::Duration;

use clap::Parser;

use deccalc_orchestration::dispatcher::DispatchRequest;
use deccalc_orchestration::executor::ExecutionMode;

/// Usage line shown when the positional arguments match no invocation form.
pub const USAGE: &str = "deccalc <num1> <num2> <operation> [mp] | deccalc repl";

/// deccalc: decimal calculator with pluggable operations and history.
#[derive(Parser, Debug)]
#[command(name = "deccalc", version, about, allow_negative_numbers = true)]
pub struct AppConfig {
    /// `<num1> <num2> <operation> [mp]` for one calculation, or `repl`.
    #[arg(value_name = "ARGS", num_args = 0..=4)]
    pub args: Vec<String>,

    /// Quiet mode (only output the result).
    #[arg(short, long)]
    pub quiet: bool,

    /// Upper bound on the wait for an isolated worker (e.g., "5s", "500ms").
    #[arg(long, env = "DECCALC_WORKER_TIMEOUT")]
    pub worker_timeout: Option<String>,

    /// Log filter directive (e.g., "info", "deccalc_core=debug").
    #[arg(long, env = "LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Deployment environment name, recorded in the startup log.
    #[arg(long, env = "ENVIRONMENT", default_value = "development")]
    pub environment: String,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,
}

/// What the positional arguments ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation<'a> {
    /// Compute once and exit.
    OneShot(DispatchRequest<'a>),
    /// Start the interactive loop.
    Repl,
    /// Arguments match no form.
    Usage,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Classify the positional arguments.
    #[must_use]
    pub fn invocation(&self) -> Invocation<'_> {
        match self.args.as_slice() {
            [cmd] if cmd == "repl" => Invocation::Repl,
            [a, b, op] => Invocation::OneShot(DispatchRequest::new(a, b, op)),
            [a, b, op, flag] => Invocation::OneShot(
                DispatchRequest::new(a, b, op).with_mode(ExecutionMode::from_flag(Some(flag.as_str()))),
            ),
            _ => Invocation::Usage,
        }
    }

    /// Parsed worker timeout; `None` waits without bound.
    pub fn worker_timeout(&self) -> anyhow::Result<Option<Duration>> {
        self.worker_timeout
            .as_deref()
            .map(|s| {
                parse_duration(s).ok_or_else(|| anyhow::anyhow!("invalid worker timeout: {s:?}"))
            })
            .transpose()
    }
}

/// Parse a duration string like "500ms", "30s", "2m".
fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if let Some(ms) = s.strip_suffix("ms") {
        let n: u64 = ms.parse().ok()?;
        Some(Duration::from_millis(n))
    } else if let Some(mins) = s.strip_suffix('m') {
        let n: u64 = mins.parse().ok()?;
        Some(Duration::from_secs(n.checked_mul(60)?))
    } else if let Some(secs) = s.strip_suffix('s') {
        let n: u64 = secs.parse().ok()?;
        Some(Duration::from_secs(n))
    } else {
        let n: u64 = s.parse().ok()?;
        Some(Duration::from_secs(n))
    }
}
