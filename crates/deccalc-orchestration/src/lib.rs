//! # deccalc-orchestration
//!
//! Operation dispatch, inline and isolated execution, and presenter
//! interfaces.

pub mod dispatcher;
pub mod executor;
pub mod interfaces;

pub use dispatcher::{parse_operand, DispatchRequest, Dispatcher};
pub use executor::{ExecutionMode, IsolatedExecutor};
pub use interfaces::ResultPresenter;
