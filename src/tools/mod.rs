//! External collaborator abstraction layer
//!
//! The release gate never talks to `git`, `gh` or `cargo` directly. Each
//! collaborator is a trait with one method per queried operation, so the gate
//! can run against real processes or deterministic fakes.
//!
//! - [process::GitCli], [process::GhCli], [process::CargoCli]: invoke the real tools
//! - [mock::MockVersionControl], [mock::MockReleaseHost], [mock::MockBuildTool]:
//!   canned answers plus invocation records for tests
//!
//! ```rust
//! # use release_gate::tools::VersionControl;
//! # fn example<V: VersionControl>(vcs: &V) -> release_gate::Result<()> {
//! if vcs.is_available()? && vcs.current_branch()? == "main" {
//!     let tags = vcs.list_tags()?;
//!     println!("{} tags known", tags.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod process;

pub use mock::{MockBuildTool, MockReleaseHost, MockVersionControl};
pub use process::{CargoCli, GhCli, GitCli};

use std::path::PathBuf;

use crate::error::Result;

/// Everything the hosting CLI needs to create a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    /// Tag the release is attached to (e.g. `v2.0.0`)
    pub tag: String,
    /// Path of the built binary to upload
    pub artifact: PathBuf,
    /// Mark the release as the latest one
    pub latest: bool,
    /// Let the host generate release notes
    pub generate_notes: bool,
}

/// Version control queries used by the gate
pub trait VersionControl {
    /// Whether the tool can be invoked and reports its version successfully.
    ///
    /// A missing or failing program is `Ok(false)`; an unusable working
    /// directory is an error, since it says nothing about the tool.
    fn is_available(&self) -> Result<bool>;

    /// Name of the checked-out branch
    fn current_branch(&self) -> Result<String>;

    /// Whether a merge-in-progress marker (`MERGE_HEAD`) is present
    fn is_merge_commit(&self) -> Result<bool>;

    /// All tags known to the repository, one entry per tag
    fn list_tags(&self) -> Result<Vec<String>>;
}

/// Release hosting operations (GitHub through `gh`)
pub trait ReleaseHost {
    /// Whether the tool can be invoked and reports its version successfully
    fn is_available(&self) -> Result<bool>;

    /// Authentication token; an empty string means not authenticated
    fn auth_token(&self) -> Result<String>;

    /// Create the remote release, returning the tool's output (usually the release URL)
    fn create_release(&self, request: &PublishRequest) -> Result<String>;
}

/// Build tool operations (Cargo)
pub trait BuildTool {
    /// The package identifier string, e.g. `path+file:///src/tmgr#2.0.0`
    fn package_id(&self) -> Result<String>;

    /// Build the release artifact
    fn build_release(&self) -> Result<()>;
}
