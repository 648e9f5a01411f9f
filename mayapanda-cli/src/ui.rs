use colored::*;

/// Print a success message with green checkmark
pub fn success(message: &str) {
    println!("{} {}", "✓".bright_green().bold(), message.bright_green());
}

/// Print a warning message with yellow warning icon
pub fn warning(message: &str) {
    println!("{} {}", "⚠".bright_yellow().bold(), message.yellow());
}

/// Print an info message with blue info icon
pub fn info(message: &str) {
    println!("{} {}", "ℹ".bright_blue().bold(), message);
}

/// Print a header with decorative formatting
pub fn header(title: &str) {
    println!();
    println!("{}", "═".repeat(title.len() + 4).bright_blue());
    println!("{} {} {}", "══".bright_blue(), title.bright_white().bold(), "══".bright_blue());
    println!("{}", "═".repeat(title.len() + 4).bright_blue());
    println!();
}

/// Print a section divider
pub fn divider() {
    println!("{}", "─".repeat(60).dimmed());
}
