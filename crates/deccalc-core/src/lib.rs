//! # deccalc-core
//!
//! Core library for the deccalc decimal calculator: binary operations over
//! `rust_decimal::Decimal`, the operation registry, calculations, and the
//! calculation history store with CSV persistence.

pub mod calculation;
pub mod constants;
pub mod exact;
pub mod history;
pub mod operation;
pub mod registry;

// Re-exports
pub use calculation::{CalcError, Calculation};
pub use constants::{exit_codes, HISTORY_COLUMNS, ISOLATED_FLAG, ISOLATED_WORKER_NAME};
pub use exact::{parse_literal, ExactDecimal, LiteralError, Unrepresentable};
pub use history::{HistoryRecord, HistoryStore};
pub use operation::{Operation, ResultSink};
pub use registry::{builtin_operations, OperationRegistry, OperationSource};
