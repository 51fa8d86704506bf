//! Operation dispatch: parse, resolve, execute, record.

use std::time::Duration;

use rust_decimal::Decimal;

use deccalc_core::calculation::{CalcError, Calculation};
use deccalc_core::exact::{parse_literal, LiteralError};
use deccalc_core::history::HistoryStore;
use deccalc_core::registry::OperationSource;

use crate::executor::{ExecutionMode, IsolatedExecutor};

/// One computation request as typed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchRequest<'a> {
    pub operand1: &'a str,
    pub operand2: &'a str,
    pub operation: &'a str,
    pub mode: ExecutionMode,
}

impl<'a> DispatchRequest<'a> {
    #[must_use]
    pub fn new(operand1: &'a str, operand2: &'a str, operation: &'a str) -> Self {
        Self {
            operand1,
            operand2,
            operation,
            mode: ExecutionMode::Inline,
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Parse operand text as an exact decimal.
///
/// Accepts plain literals (`-12.50`) and scientific notation (`1.5e3`). A
/// literal that would have to be rounded to fit is out of range, not invalid.
pub fn parse_operand(text: &str) -> Result<Decimal, CalcError> {
    parse_literal(text.trim()).map_err(|e| match e {
        LiteralError::NotANumber => CalcError::InvalidOperand(text.to_string()),
        LiteralError::Unrepresentable(_) => CalcError::OperandOutOfRange(text.to_string()),
    })
}

/// Resolves operations by name, runs them, and records the outcome.
pub struct Dispatcher<'r> {
    source: &'r dyn OperationSource,
    isolated: IsolatedExecutor,
}

impl<'r> Dispatcher<'r> {
    /// Create a dispatcher over `source` with an unbounded worker wait.
    #[must_use]
    pub fn new(source: &'r dyn OperationSource) -> Self {
        Self {
            source,
            isolated: IsolatedExecutor::new(),
        }
    }

    /// Bound the wait for isolated workers.
    #[must_use]
    pub fn with_worker_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.isolated = IsolatedExecutor::with_timeout(timeout);
        self
    }

    /// Names of the operations this dispatcher can run.
    #[must_use]
    pub fn operation_names(&self) -> Vec<&str> {
        self.source.names()
    }

    /// Run one request and append it to `history`.
    ///
    /// On any error nothing is appended.
    pub fn dispatch(
        &self,
        request: &DispatchRequest<'_>,
        history: &mut HistoryStore,
    ) -> Result<Decimal, CalcError> {
        tracing::debug!(
            operation = request.operation,
            operand1 = request.operand1,
            operand2 = request.operand2,
            mode = ?request.mode,
            "dispatching"
        );

        let a = parse_operand(request.operand1)?;
        let b = parse_operand(request.operand2)?;

        let op = self.source.lookup(request.operation).ok_or_else(|| {
            tracing::warn!(operation = request.operation, "operation not recognized");
            CalcError::UnknownOperation(request.operation.to_string())
        })?;

        let mut calculation = Calculation::new(a, b, op);
        let result = calculation.operate_with(|op, a, b| match request.mode {
            ExecutionMode::Inline => op.execute(a, b),
            ExecutionMode::Isolated => self.isolated.run(op, a, b),
        })?;

        if let Some(record) = calculation.record() {
            history.append(record);
        }
        tracing::info!(operation = request.operation, %result, "calculation recorded");
        Ok(result)
    }
}
