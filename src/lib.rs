pub mod config;
pub mod domain;
pub mod error;
pub mod gate;
pub mod skip;
pub mod tools;
pub mod ui;

pub use error::{ReleaseError, Result};
pub use gate::{run_release, ReleaseOptions, ReleaseOutcome};
