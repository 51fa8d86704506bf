//! Application entry point and dispatch.

use anyhow::Result;

use deccalc_cli::presenter::CLIResultPresenter;
use deccalc_core::constants::exit_codes;
use deccalc_core::history::HistoryStore;
use deccalc_core::registry::OperationRegistry;
use deccalc_orchestration::dispatcher::{DispatchRequest, Dispatcher};
use deccalc_orchestration::interfaces::ResultPresenter;

use crate::config::{AppConfig, Invocation, USAGE};
use crate::errors::handle_error;
use crate::repl::{self, Session};

/// Run the application and return the process exit code.
pub fn run(config: &AppConfig) -> Result<i32> {
    // Handle shell completion
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        deccalc_cli::completion::generate_completion(&mut cmd, shell, &mut std::io::stdout());
        return Ok(exit_codes::SUCCESS);
    }

    tracing::info!(environment = %config.environment, "application started");

    let registry = OperationRegistry::discover();
    if registry.is_empty() {
        tracing::warn!("no operations available");
    }
    let dispatcher = Dispatcher::new(&registry).with_worker_timeout(config.worker_timeout()?);
    let presenter = CLIResultPresenter::new(config.quiet);
    let mut history = HistoryStore::new();

    match config.invocation() {
        Invocation::OneShot(request) => Ok(run_once(&dispatcher, &mut history, &presenter, &request)),
        Invocation::Repl => {
            let mut session = Session::new(&dispatcher, &mut history, &presenter);
            repl::run(&mut session)?;
            Ok(exit_codes::SUCCESS)
        }
        Invocation::Usage => {
            presenter.present_usage(USAGE);
            Ok(exit_codes::ERROR_INPUT)
        }
    }
}

fn run_once(
    dispatcher: &Dispatcher<'_>,
    history: &mut HistoryStore,
    presenter: &dyn ResultPresenter,
    request: &DispatchRequest<'_>,
) -> i32 {
    match dispatcher.dispatch(request, history) {
        Ok(result) => {
            presenter.present_result(request, result);
            exit_codes::SUCCESS
        }
        Err(e) => {
            presenter.present_error(&e);
            handle_error(&e)
        }
    }
}
