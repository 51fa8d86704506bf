//! The `Operation` trait and the built-in binary operations.
//!
//! Every operation is a stateless, pure function of two `Decimal` operands.
//! Results are computed exactly and converted back without rounding: a
//! result too wide for 96 bits is [`CalcError::Overflow`], one that needs
//! more than 28 fractional digits is [`CalcError::InexactResult`].

use crossbeam_channel::Sender;
use rust_decimal::Decimal;

use crate::calculation::CalcError;
use crate::exact::{ExactDecimal, Unrepresentable};

/// One-shot channel end an isolated worker reports its outcome through.
pub type ResultSink = Sender<Result<Decimal, CalcError>>;

/// A named binary operation over exact decimals.
pub trait Operation: Send + Sync {
    /// Registry key of this operation (`"add"`, `"mean"`, ...).
    fn name(&self) -> &str;

    /// Compute the result on the calling thread.
    fn execute(&self, a: Decimal, b: Decimal) -> Result<Decimal, CalcError>;

    /// Entry point for isolated workers: compute, then send exactly one
    /// outcome into `sink`.
    fn execute_isolated(&self, a: Decimal, b: Decimal, sink: &ResultSink) {
        // A full or disconnected sink means the caller has stopped waiting.
        let _ = sink.try_send(self.execute(a, b));
    }
}

/// Convert an exact result back to `Decimal`, naming the failed call.
fn represent(op: &str, a: Decimal, b: Decimal, value: &ExactDecimal) -> Result<Decimal, CalcError> {
    value.to_decimal().map_err(|reason| {
        let call = format!("{op}({a}, {b})");
        match reason {
            Unrepresentable::Overflow => CalcError::Overflow(call),
            Unrepresentable::Precision => CalcError::InexactResult(call),
        }
    })
}

/// `(a + b) / 2`, exact.
fn halve_sum(op: &str, a: Decimal, b: Decimal) -> Result<Decimal, CalcError> {
    let sum = ExactDecimal::from(a).sum(&ExactDecimal::from(b));
    represent(op, a, b, &sum.half())
}

/// `a + b`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Add;

impl Operation for Add {
    fn name(&self) -> &str {
        "add"
    }

    fn execute(&self, a: Decimal, b: Decimal) -> Result<Decimal, CalcError> {
        let sum = ExactDecimal::from(a).sum(&ExactDecimal::from(b));
        represent(self.name(), a, b, &sum)
    }
}

/// `a - b`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Subtract;

impl Operation for Subtract {
    fn name(&self) -> &str {
        "subtract"
    }

    fn execute(&self, a: Decimal, b: Decimal) -> Result<Decimal, CalcError> {
        let difference = ExactDecimal::from(a).difference(&ExactDecimal::from(b));
        represent(self.name(), a, b, &difference)
    }
}

/// `a * b`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Multiply;

impl Operation for Multiply {
    fn name(&self) -> &str {
        "multiply"
    }

    fn execute(&self, a: Decimal, b: Decimal) -> Result<Decimal, CalcError> {
        let product = ExactDecimal::from(a).product(&ExactDecimal::from(b));
        represent(self.name(), a, b, &product)
    }
}

/// `a * a`; the second operand is ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct Square;

impl Operation for Square {
    fn name(&self) -> &str {
        "square"
    }

    fn execute(&self, a: Decimal, b: Decimal) -> Result<Decimal, CalcError> {
        let a_exact = ExactDecimal::from(a);
        represent(self.name(), a, b, &a_exact.product(&a_exact))
    }
}

/// Arithmetic mean of the two operands.
#[derive(Debug, Default, Clone, Copy)]
pub struct Mean;

impl Operation for Mean {
    fn name(&self) -> &str {
        "mean"
    }

    fn execute(&self, a: Decimal, b: Decimal) -> Result<Decimal, CalcError> {
        halve_sum(self.name(), a, b)
    }
}

/// Median of the two operands, which for two values is their mean.
#[derive(Debug, Default, Clone, Copy)]
pub struct Median;

impl Operation for Median {
    fn name(&self) -> &str {
        "median"
    }

    fn execute(&self, a: Decimal, b: Decimal) -> Result<Decimal, CalcError> {
        halve_sum(self.name(), a, b)
    }
}
