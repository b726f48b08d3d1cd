//! User interface module - console output for the release run.
//!
//! The run is non-interactive; everything user-facing goes through
//! [formatter]. Diagnostics for developers go through the `log` facade instead.

pub mod formatter;

pub use formatter::{
    display_error, display_failure, display_outcome, display_skip, display_status,
    display_success, format_failure, format_outcome,
};
