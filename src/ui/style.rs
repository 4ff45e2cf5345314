use console::style;
use std::fmt::Display;

/// Green bold: checkmarks after a command succeeds
pub fn success<D: Display>(text: D) -> String {
    style(text).green().bold().to_string()
}

/// White bold: panel titles such as "Recent History"
pub fn header<D: Display>(text: D) -> String {
    style(text).white().bold().to_string()
}

/// Dim: ids, timestamps, empty states
pub fn dim<D: Display>(text: D) -> String {
    style(text).dim().to_string()
}

/// Yellow: warnings that do not fail the command
pub fn yellow<D: Display>(text: D) -> String {
    style(text).yellow().to_string()
}

/// Green: tone names and other chosen values
pub fn value<D: Display>(text: D) -> String {
    style(text).green().to_string()
}

/// Cyan bold: bullet markers for improvements
pub fn accent<D: Display>(text: D) -> String {
    style(text).cyan().bold().to_string()
}

/// Cyan: field labels and tone badges
pub fn cyan<D: Display>(text: D) -> String {
    style(text).cyan().to_string()
}
