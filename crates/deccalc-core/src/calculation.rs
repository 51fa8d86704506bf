//! The `Calculation` record and the crate-wide `CalcError`.
//!
//! A `Calculation` pairs two operands with a shared `Operation` and holds the
//! result once it has been computed. It is operated at most once: later calls
//! return the stored value without invoking the operation again.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;

use crate::history::HistoryRecord;
use crate::operation::Operation;

/// Error type for dispatch, execution, and history management.
#[derive(Debug, thiserror::Error)]
pub enum CalcError {
    /// Operand text is not a decimal literal.
    #[error("invalid operand: '{0}' is not a valid number")]
    InvalidOperand(String),

    /// Operand is a decimal literal that a 96-bit decimal cannot hold exactly.
    #[error("operand out of range: '{0}' cannot be represented exactly")]
    OperandOutOfRange(String),

    /// No operation is registered under the requested name.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// The isolated worker terminated without producing a value.
    #[error("isolated execution failed: {0}")]
    IsolatedExecution(String),

    /// The isolated worker did not answer within the configured bound.
    #[error("isolated execution timed out after {0:?}")]
    IsolatedTimeout(Duration),

    /// Arithmetic exceeded the range of `Decimal`.
    #[error("arithmetic overflow in {0}")]
    Overflow(String),

    /// The result needs more than 28 fractional digits.
    #[error("inexact result in {0}: more than 28 decimal places")]
    InexactResult(String),

    /// History index outside `[0, len)`.
    #[error("index {index} is out of range for {len} history records")]
    IndexOutOfRange { index: i64, len: usize },

    /// History index text is not an integer.
    #[error("invalid history index: '{0}'")]
    InvalidIndex(String),

    /// History file does not exist.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// History file does not have the expected shape.
    #[error("malformed history file: {0}")]
    MalformedHistoryFile(String),

    /// Underlying I/O failure while persisting history.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// One invocation of an operation on two operands.
#[derive(Clone)]
pub struct Calculation {
    operand1: Decimal,
    operand2: Decimal,
    operation: Arc<dyn Operation>,
    result: Option<Decimal>,
}

impl Calculation {
    /// Create a calculation that has not been operated yet.
    #[must_use]
    pub fn new(operand1: Decimal, operand2: Decimal, operation: Arc<dyn Operation>) -> Self {
        Self {
            operand1,
            operand2,
            operation,
            result: None,
        }
    }

    /// Compute the result inline on the calling thread.
    pub fn operate(&mut self) -> Result<Decimal, CalcError> {
        self.operate_with(|op, a, b| op.execute(a, b))
    }

    /// Compute the result through `run`, which receives the shared operation
    /// and both operands. `run` is called at most once over the lifetime of
    /// the calculation; a failed run leaves the result unset.
    pub fn operate_with<F>(&mut self, run: F) -> Result<Decimal, CalcError>
    where
        F: FnOnce(&Arc<dyn Operation>, Decimal, Decimal) -> Result<Decimal, CalcError>,
    {
        if let Some(result) = self.result {
            return Ok(result);
        }
        let result = run(&self.operation, self.operand1, self.operand2)?;
        self.result = Some(result);
        Ok(result)
    }

    #[must_use]
    pub fn operand1(&self) -> Decimal {
        self.operand1
    }

    #[must_use]
    pub fn operand2(&self) -> Decimal {
        self.operand2
    }

    #[must_use]
    pub fn operation(&self) -> &Arc<dyn Operation> {
        &self.operation
    }

    /// The result, if the calculation has been operated.
    #[must_use]
    pub fn result(&self) -> Option<Decimal> {
        self.result
    }

    /// History record for this calculation; `None` until operated.
    #[must_use]
    pub fn record(&self) -> Option<HistoryRecord> {
        self.result.map(|result| HistoryRecord {
            operation: self.operation.name().to_string(),
            num1: self.operand1,
            num2: self.operand2,
            result,
        })
    }
}

impl fmt::Debug for Calculation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Calculation")
            .field("operand1", &self.operand1)
            .field("operand2", &self.operand2)
            .field("operation", &self.operation.name())
            .field("result", &self.result)
            .finish()
    }
}

impl fmt::Display for Calculation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Calculation({}, {}, {})",
            self.operand1,
            self.operand2,
            self.operation.name()
        )
    }
}
