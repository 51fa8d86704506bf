//! CLI result presenter.

use rust_decimal::Decimal;

use deccalc_core::calculation::CalcError;
use deccalc_core::history::HistoryRecord;
use deccalc_orchestration::dispatcher::DispatchRequest;
use deccalc_orchestration::interfaces::ResultPresenter;

use crate::output::{format_history_table, format_operation_menu, format_result_line};
use crate::ui::{print_error, print_success};

/// CLI result presenter.
pub struct CLIResultPresenter {
    quiet: bool,
}

impl CLIResultPresenter {
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// The line `present_result` prints: the bare value in quiet mode.
    #[must_use]
    pub fn result_text(&self, request: &DispatchRequest<'_>, result: Decimal) -> String {
        if self.quiet {
            result.to_string()
        } else {
            format_result_line(request, result)
        }
    }
}

impl ResultPresenter for CLIResultPresenter {
    fn present_result(&self, request: &DispatchRequest<'_>, result: Decimal) {
        println!("{}", self.result_text(request, result));
    }

    fn present_history(&self, rows: &[(usize, &HistoryRecord)]) {
        if rows.is_empty() {
            println!("No calculations in history.");
            return;
        }
        print!("{}", format_history_table(rows));
    }

    fn present_menu(&self, names: &[&str]) {
        print!("{}", format_operation_menu(names));
    }

    fn present_message(&self, message: &str) {
        if !self.quiet {
            print_success(message);
        }
    }

    fn present_usage(&self, usage: &str) {
        eprintln!("Usage: {usage}");
    }

    fn present_error(&self, error: &CalcError) {
        print_error(&error.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deccalc_orchestration::executor::ExecutionMode;

    #[test]
    fn quiet_result_is_bare_value() {
        let presenter = CLIResultPresenter::new(true);
        let request = DispatchRequest::new("3", "4", "mean");
        assert_eq!(presenter.result_text(&request, Decimal::new(35, 1)), "3.5");
    }

    #[test]
    fn result_sentence() {
        let presenter = CLIResultPresenter::new(false);
        let request = DispatchRequest::new("3", "4", "add");
        assert_eq!(
            presenter.result_text(&request, Decimal::from(7)),
            "The result of 3 add 4 is 7"
        );
    }

    #[test]
    fn isolated_result_sentence() {
        let presenter = CLIResultPresenter::new(false);
        let request = DispatchRequest::new("5", "6", "multiply").with_mode(ExecutionMode::Isolated);
        assert_eq!(
            presenter.result_text(&request, Decimal::from(30)),
            "The result of 5 multiply 6 (isolated) is 30"
        );
    }

    #[test]
    fn quiet_mode_keeps_the_value_unformatted() {
        let request = DispatchRequest::new("1.10", "1.1", "subtract");
        let value = Decimal::new(0, 2);
        assert_eq!(CLIResultPresenter::new(true).result_text(&request, value), "0.00");
        assert!(CLIResultPresenter::new(false)
            .result_text(&request, value)
            .ends_with("is 0.00"));
    }
}
