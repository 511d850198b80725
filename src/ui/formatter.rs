//! Pure formatting functions for UI output.

use console::style;

use crate::diagnostic::Diagnostic;
use crate::domain::VersionData;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a warning message in yellow.
pub fn display_warning(message: &str) {
    eprintln!("{} {}", style("WARNING:").yellow(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    eprintln!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with a dimmed arrow.
pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").dim(), message);
}

/// Print a resolution diagnostic, as a warning if it reports a problem.
pub fn display_diagnostic(diagnostic: &Diagnostic) {
    let message = diagnostic.to_string();
    if diagnostic.is_warning() {
        display_warning(&message);
    } else {
        display_status(&message);
    }
}

/// Render version data as `key = value` lines, skipping absent fields.
pub fn format_version_data(data: &VersionData) -> String {
    let mut lines = vec![format!("version = {}", data.version)];
    if let Some(branch) = &data.branch {
        lines.push(format!("branch = {}", branch));
    }
    if let Some(revision) = &data.revision {
        lines.push(format!("revision = {}", revision));
    }
    lines.join("\n")
}

/// Print version data on stdout.
///
/// With `all` unset only the version itself is printed.
pub fn display_version_data(data: &VersionData, all: bool) {
    if all {
        println!("{}", format_version_data(data));
    } else {
        println!("{}", data.version);
    }
}
