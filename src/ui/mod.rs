//! User interface module - terminal output.
//!
//! Diagnostics and status lines go to stderr so that stdout only ever
//! carries the resolved version.

pub mod formatter;

pub use formatter::{
    display_diagnostic, display_error, display_status, display_success, display_version_data,
    display_warning, format_version_data,
};
