use console::style;

use crate::is_no_color_set;

/// Returns a styled success checkmark
pub fn success_checkmark() -> String {
    if is_no_color_set() {
        return "✓".to_string();
    }
    style("✓").green().bold().to_string()
}

/// Returns a styled failure cross
pub fn failure_cross() -> String {
    if is_no_color_set() {
        return "✗".to_string();
    }
    style("✗").red().bold().to_string()
}

/// Formats a success message with a checkmark
pub fn success_message(message: &str) -> String {
    format!("{} {}", success_checkmark(), message)
}

/// Formats a failure message with a cross
pub fn failure_message(message: &str) -> String {
    format!("{} {}", failure_cross(), message)
}
