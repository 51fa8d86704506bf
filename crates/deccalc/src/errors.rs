//! Error handling and exit codes.

use deccalc_core::calculation::CalcError;
use deccalc_core::constants::exit_codes;

/// Map a reported error to the process exit code.
pub fn handle_error(err: &CalcError) -> i32 {
    match err {
        CalcError::InvalidOperand(_)
        | CalcError::OperandOutOfRange(_)
        | CalcError::InvalidIndex(_)
        | CalcError::IndexOutOfRange { .. } => exit_codes::ERROR_INPUT,
        CalcError::UnknownOperation(_) => exit_codes::ERROR_UNKNOWN_OPERATION,
        CalcError::IsolatedExecution(_) | CalcError::IsolatedTimeout(_) => {
            exit_codes::ERROR_ISOLATED
        }
        CalcError::FileNotFound(_) | CalcError::MalformedHistoryFile(_) | CalcError::Io(_) => {
            exit_codes::ERROR_HISTORY_IO
        }
        CalcError::Overflow(_) | CalcError::InexactResult(_) => exit_codes::ERROR_GENERIC,
    }
}
