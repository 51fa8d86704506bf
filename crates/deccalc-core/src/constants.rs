//! Constants for history persistence, worker naming, and exit codes.

/// Column names of the persisted history file, in order.
pub const HISTORY_COLUMNS: [&str; 4] = ["operation", "num1", "num2", "result"];

/// Name given to isolated worker threads.
pub const ISOLATED_WORKER_NAME: &str = "deccalc-worker";

/// Trailing token that selects isolated execution (`add 1 2 mp`).
pub const ISOLATED_FLAG: &str = "mp";

/// Exit codes reported by the command-line driver.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error.
    pub const ERROR_GENERIC: i32 = 1;
    /// Invalid operand, index, or usage.
    pub const ERROR_INPUT: i32 = 2;
    /// Operation name not present in the registry.
    pub const ERROR_UNKNOWN_OPERATION: i32 = 3;
    /// Isolated worker produced no value or timed out.
    pub const ERROR_ISOLATED: i32 = 4;
    /// History file missing, malformed, or unwritable.
    pub const ERROR_HISTORY_IO: i32 = 5;
}
