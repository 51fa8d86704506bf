//! deccalc library: application logic for the decimal calculator.

pub mod app;
pub mod config;
pub mod errors;
pub mod repl;
