//! Orchestration interfaces.

use rust_decimal::Decimal;

use deccalc_core::calculation::CalcError;
use deccalc_core::history::HistoryRecord;

use crate::dispatcher::DispatchRequest;

/// Trait for presenting dispatch outcomes and history to the user.
///
/// The dispatcher and history store never print; drivers route everything
/// user-visible through an implementation of this trait.
pub trait ResultPresenter {
    /// Present a computed result.
    fn present_result(&self, request: &DispatchRequest<'_>, result: Decimal);

    /// Present history rows, each with its current index.
    fn present_history(&self, rows: &[(usize, &HistoryRecord)]);

    /// Present the available operation names.
    fn present_menu(&self, names: &[&str]);

    /// Present a status message.
    fn present_message(&self, message: &str);

    /// Present the expected form of a mistyped command.
    fn present_usage(&self, usage: &str);

    /// Present an error.
    fn present_error(&self, error: &CalcError);
}
