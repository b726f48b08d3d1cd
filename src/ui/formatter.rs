//! Formatting functions for UI output.
//!
//! Styling goes through `console`, which drops colors when the stream is not a terminal.

use console::style;

use crate::error::ReleaseError;
use crate::gate::ReleaseOutcome;
use crate::skip::SkipReason;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Print why no release was cut.
pub fn display_skip(reason: &SkipReason) {
    display_status(&reason.to_string());
}

/// Plain-text summary of a finished run.
pub fn format_outcome(outcome: &ReleaseOutcome) -> String {
    match outcome {
        ReleaseOutcome::Skipped(reason) => reason.to_string(),
        ReleaseOutcome::DryRun { tag, artifact } => format!(
            "Dry run: would build {} and publish release {}",
            artifact.display(),
            tag
        ),
        ReleaseOutcome::Published {
            tag,
            artifact,
            output,
        } => {
            let mut summary = format!("Published release {} with {}", tag, artifact.display());
            if !output.is_empty() {
                summary.push_str(&format!(" ({})", output));
            }
            summary
        }
    }
}

/// Message for a failed run. Missing prerequisites carry their own remediation
/// and are shown as-is; anything else happened mid-run.
pub fn format_failure(err: &ReleaseError) -> String {
    if err.is_precondition() {
        err.to_string()
    } else {
        format!("Release aborted: {}", err)
    }
}

/// Print why a run failed.
pub fn display_failure(err: &ReleaseError) {
    display_error(&format_failure(err));
}

/// Print the outcome of a run.
pub fn display_outcome(outcome: &ReleaseOutcome) {
    match outcome {
        ReleaseOutcome::Skipped(reason) => display_skip(reason),
        other => display_success(&format_outcome(other)),
    }
}
