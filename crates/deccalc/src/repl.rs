//! Interactive read-eval-print loop.
//!
//! Lines are parsed into [`ReplCommand`]s and executed against a
//! [`Session`], which owns nothing: the dispatcher, history store, and
//! presenter are borrowed from the caller.

use std::ops::ControlFlow;

use anyhow::{Context, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use deccalc_cli::ui;
use deccalc_core::constants::ISOLATED_FLAG;
use deccalc_core::history::HistoryStore;
use deccalc_orchestration::dispatcher::{DispatchRequest, Dispatcher};
use deccalc_orchestration::executor::ExecutionMode;
use deccalc_orchestration::interfaces::ResultPresenter;

const PROMPT: &str = "deccalc> ";

/// One parsed REPL line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplCommand<'a> {
    Exit,
    Menu,
    History,
    Latest,
    ClearHistory,
    SaveHistory(&'a str),
    LoadHistory(&'a str),
    DeleteHistory(&'a str),
    FilterWithOperation(&'a str),
    Calculate(DispatchRequest<'a>),
    Empty,
    Usage(&'static str),
}

impl<'a> ReplCommand<'a> {
    /// Parse one input line.
    ///
    /// Calculations are written `<operation> <num1> <num2> [mp]`. History
    /// commands take the rest of the line as their argument, so paths may
    /// contain spaces.
    #[must_use]
    pub fn parse(line: &'a str) -> Self {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        match head {
            "" => return Self::Empty,
            "exit" if rest.is_empty() => return Self::Exit,
            "menu" if rest.is_empty() => return Self::Menu,
            "history" if rest.is_empty() => return Self::History,
            "latest" if rest.is_empty() => return Self::Latest,
            "clear_history" if rest.is_empty() => return Self::ClearHistory,
            "save_history" => return with_argument(rest, Self::SaveHistory, "save_history <path>"),
            "load_history" => return with_argument(rest, Self::LoadHistory, "load_history <path>"),
            "delete_history" => {
                return with_argument(rest, Self::DeleteHistory, "delete_history <index>")
            }
            "filter_with_operation" => {
                return with_argument(
                    rest,
                    Self::FilterWithOperation,
                    "filter_with_operation <operation>",
                )
            }
            _ => {}
        }

        let args: Vec<&'a str> = rest.split_whitespace().collect();
        match args.as_slice() {
            &[a, b] => Self::Calculate(DispatchRequest::new(a, b, head)),
            &[a, b, flag] => Self::Calculate(
                DispatchRequest::new(a, b, head).with_mode(ExecutionMode::from_flag(Some(flag))),
            ),
            _ => Self::Usage("<operation> <num1> <num2> [mp]"),
        }
    }
}

fn with_argument<'a>(
    rest: &'a str,
    build: fn(&'a str) -> ReplCommand<'a>,
    usage: &'static str,
) -> ReplCommand<'a> {
    if rest.is_empty() {
        ReplCommand::Usage(usage)
    } else {
        build(rest)
    }
}

/// Borrowed state one REPL run operates on.
pub struct Session<'a> {
    dispatcher: &'a Dispatcher<'a>,
    history: &'a mut HistoryStore,
    presenter: &'a dyn ResultPresenter,
}

impl<'a> Session<'a> {
    #[must_use]
    pub fn new(
        dispatcher: &'a Dispatcher<'a>,
        history: &'a mut HistoryStore,
        presenter: &'a dyn ResultPresenter,
    ) -> Self {
        Self {
            dispatcher,
            history,
            presenter,
        }
    }

    /// Execute one command. Every error is presented and the loop continues;
    /// only `exit` breaks.
    pub fn execute(&mut self, command: ReplCommand<'_>) -> ControlFlow<()> {
        tracing::debug!(?command, "repl command");
        let presenter = self.presenter;
        match command {
            ReplCommand::Exit => {
                presenter.present_message("Exiting REPL mode...");
                return ControlFlow::Break(());
            }
            ReplCommand::Empty => {}
            ReplCommand::Menu => presenter.present_menu(&self.dispatcher.operation_names()),
            ReplCommand::History => {
                let rows: Vec<_> = self.history.all().iter().enumerate().collect();
                presenter.present_history(&rows);
            }
            ReplCommand::Latest => match self.history.latest() {
                Some(record) => presenter.present_history(&[(self.history.len() - 1, record)]),
                None => presenter.present_history(&[]),
            },
            ReplCommand::ClearHistory => {
                self.history.clear();
                presenter.present_message("History cleared.");
            }
            ReplCommand::SaveHistory(path) => match self.history.save(path) {
                Ok(()) => presenter.present_message(&format!("History saved to {path}.")),
                Err(e) => presenter.present_error(&e),
            },
            ReplCommand::LoadHistory(path) => match self.history.load(path) {
                Ok(count) => presenter
                    .present_message(&format!("History loaded from {path} ({count} records).")),
                Err(e) => presenter.present_error(&e),
            },
            ReplCommand::DeleteHistory(text) => {
                match self
                    .history
                    .resolve_index(text)
                    .and_then(|index| self.history.delete(index).map(|_| index))
                {
                    Ok(index) => {
                        presenter.present_message(&format!("Deleted calculation at index {index}."));
                    }
                    Err(e) => presenter.present_error(&e),
                }
            }
            ReplCommand::FilterWithOperation(name) => {
                let rows = self.history.filter_by_operation(name);
                if rows.is_empty() {
                    presenter.present_message(&format!(
                        "No calculations found for operation: {name}"
                    ));
                } else {
                    presenter.present_history(&rows);
                }
            }
            ReplCommand::Calculate(request) => {
                match self.dispatcher.dispatch(&request, self.history) {
                    Ok(result) => presenter.present_result(&request, result),
                    Err(e) => presenter.present_error(&e),
                }
            }
            ReplCommand::Usage(usage) => presenter.present_usage(usage),
        }
        ControlFlow::Continue(())
    }
}

/// Run the loop until `exit` or end of input.
pub fn run(session: &mut Session<'_>) -> Result<()> {
    let mut editor = DefaultEditor::new().context("failed to create line editor")?;
    ui::print_banner(ISOLATED_FLAG);

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = editor.add_history_entry(line.as_str());
                }
                if session.execute(ReplCommand::parse(&line)).is_break() {
                    break;
                }
            }
            // Ctrl+C discards the current line
            Err(ReadlineError::Interrupted) => {}
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(anyhow::anyhow!("failed to read input: {e}")),
        }
    }
    Ok(())
}
