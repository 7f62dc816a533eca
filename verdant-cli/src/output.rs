//! Console rendering for probe progress and the informational commands.
//!
//! Progress and status lines go to stdout so they interleave with the
//! attempt log; the final failure and its help text go to stderr.

use owo_colors::OwoColorize;

/// Column the values of [`field`] line up on.
const KEY_WIDTH: usize = 10;

/// Title block for a report such as `verdant parse`.
pub fn title(text: &str) {
    println!();
    println!("{}", text.bold().green());
    println!("{}", "═".repeat(text.chars().count()).green().dimmed());
}

/// Sub-heading inside a report.
pub fn group(text: &str) {
    println!("{}", text.underline());
}

/// One `key  value` row, with keys padded so values align.
pub fn field(key: &str, value: &str) {
    println!("  {} {}", padded(key).dimmed(), value);
}

/// An attempt line, printed exactly as given.
pub fn attempt(text: &str) {
    println!("{}", text);
}

/// The database answered.
pub fn reachable(text: &str) {
    println!("{} {}", "[ ok ]".green().bold(), text);
}

/// Neutral status, such as the target or the wait before a retry.
pub fn note(text: &str) {
    println!("{} {}", "[ .. ]".blue(), text);
}

/// A failed attempt or a setting worth flagging.
pub fn caution(text: &str) {
    println!("{} {}", "[warn]".yellow().bold(), text.yellow());
}

/// The terminal failure.
pub fn fail(text: &str) {
    eprintln!("{} {}", "[fail]".red().bold(), text.red());
}

/// Remediation under [`fail`].
pub fn help(text: &str) {
    eprintln!("       {}", text.italic());
}

pub fn blank() {
    println!();
}

/// Secondary text such as links.
pub fn muted(text: &str) {
    println!("{}", text.dimmed());
}

fn padded(key: &str) -> String {
    format!("{:<width$}", key, width = KEY_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_aligns_short_keys() {
        assert_eq!(padded("Host"), "Host      ");
        assert_eq!(padded("Host").len(), KEY_WIDTH);
    }

    #[test]
    fn test_padded_keeps_long_keys() {
        assert_eq!(padded("application_name"), "application_name");
    }
}
