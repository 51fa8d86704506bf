//! Execution modes and the isolated worker executor.
//!
//! Isolated execution runs an operation on a dedicated OS thread and receives
//! its single outcome over a `crossbeam_channel::bounded(1)` channel. The
//! caller blocks until the worker terminates. A worker that terminates
//! without sending (panic, early return) is reported as
//! [`CalcError::IsolatedExecution`].

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::RecvTimeoutError;
use rust_decimal::Decimal;

use deccalc_core::calculation::CalcError;
use deccalc_core::constants::{ISOLATED_FLAG, ISOLATED_WORKER_NAME};
use deccalc_core::operation::Operation;

/// Where an operation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// On the calling thread.
    #[default]
    Inline,
    /// On a separate worker thread.
    Isolated,
}

impl ExecutionMode {
    /// Mode selected by an optional trailing command token.
    ///
    /// Only the exact isolation flag selects `Isolated`; anything else runs
    /// inline.
    #[must_use]
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some(ISOLATED_FLAG) => Self::Isolated,
            _ => Self::Inline,
        }
    }

    #[must_use]
    pub fn is_isolated(self) -> bool {
        self == Self::Isolated
    }
}

/// Runs operations on short-lived worker threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsolatedExecutor {
    timeout: Option<Duration>,
}

impl IsolatedExecutor {
    /// Executor that waits for the worker without a time bound.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Executor that stops waiting after `timeout`.
    ///
    /// A worker that misses the deadline is detached; its late value is
    /// dropped with the channel.
    #[must_use]
    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    /// Execute `op` on a worker thread and return its single outcome.
    pub fn run(
        &self,
        op: &Arc<dyn Operation>,
        a: Decimal,
        b: Decimal,
    ) -> Result<Decimal, CalcError> {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let worker_op = Arc::clone(op);
        let handle = thread::Builder::new()
            .name(ISOLATED_WORKER_NAME.to_string())
            .spawn(move || worker_op.execute_isolated(a, b, &tx))
            .map_err(|e| CalcError::IsolatedExecution(format!("failed to spawn worker: {e}")))?;
        tracing::debug!(operation = op.name(), "isolated worker spawned");

        let Some(limit) = self.timeout else {
            let joined = handle.join();
            return rx
                .try_recv()
                .unwrap_or_else(|_| Err(no_result(op.name(), joined.is_err())));
        };

        match rx.recv_timeout(limit) {
            Ok(outcome) => {
                // The worker exits right after sending.
                let _ = handle.join();
                outcome
            }
            Err(RecvTimeoutError::Timeout) => {
                tracing::warn!(operation = op.name(), ?limit, "isolated worker timed out, detaching");
                Err(CalcError::IsolatedTimeout(limit))
            }
            Err(RecvTimeoutError::Disconnected) => {
                let panicked = handle.join().is_err();
                Err(no_result(op.name(), panicked))
            }
        }
    }
}

fn no_result(operation: &str, panicked: bool) -> CalcError {
    tracing::error!(operation, panicked, "isolated worker produced no result");
    let reason = if panicked {
        "worker panicked"
    } else {
        "worker exited without a result"
    };
    CalcError::IsolatedExecution(format!("{operation}: {reason}"))
}
