//! UI helpers for CLI display.

use console::style;

/// Check if color output is disabled via `NO_COLOR` env var.
#[must_use]
pub fn is_color_disabled() -> bool {
    std::env::var("NO_COLOR").is_ok()
}

/// Print the REPL banner.
pub fn print_banner(isolated_flag: &str) {
    if is_color_disabled() {
        println!("Entering REPL mode. Type 'exit' to quit, 'menu' for operations.");
    } else {
        println!(
            "{} Type {} to quit, {} for operations.",
            style("deccalc REPL.").bold().cyan(),
            style("exit").bold(),
            style("menu").bold()
        );
    }
    println!("Append '{isolated_flag}' to a calculation to run it in an isolated worker.");
}

/// Print a success message.
pub fn print_success(text: &str) {
    if is_color_disabled() {
        println!("[OK] {text}");
    } else {
        println!("{} {text}", style("[OK]").green().bold());
    }
}

/// Print an error message.
pub fn print_error(text: &str) {
    if is_color_disabled() {
        eprintln!("[ERROR] {text}");
    } else {
        eprintln!("{} {text}", style("[ERROR]").red().bold());
    }
}
