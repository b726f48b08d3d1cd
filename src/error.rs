use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// External collaborators the release gate depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    VersionControl,
    ReleaseHost,
}

impl ToolKind {
    /// Human readable tool name
    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::VersionControl => "Git",
            ToolKind::ReleaseHost => "GitHub CLI (gh)",
        }
    }

    /// Remediation shown when the tool cannot be found
    pub fn install_hint(&self) -> &'static str {
        match self {
            ToolKind::VersionControl => "Please install Git.",
            ToolKind::ReleaseHost => "Please install GitHub CLI.",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unified error type for release-gate operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("{} is not installed. {}", .0.name(), .0.install_hint())]
    ToolMissing(ToolKind),

    #[error("GitHub token not found. Please set up GitHub token.")]
    AuthMissing,

    #[error("Working directory '{}' does not exist or is not a directory", .0.display())]
    WorkingDirectory(PathBuf),

    #[error("Invalid package identifier: {0}")]
    PackageId(String),

    #[error("Command `{command}` failed: {stderr}")]
    Command { command: String, stderr: String },

    #[error("Release build failed: {0}")]
    Build(String),

    #[error("Release publish failed: {0}")]
    Publish(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in release-gate
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a package identifier error with context
    pub fn package_id(msg: impl Into<String>) -> Self {
        ReleaseError::PackageId(msg.into())
    }

    /// Create a command failure from the rendered command line and its stderr
    pub fn command(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        ReleaseError::Command {
            command: command.into(),
            stderr: stderr.into(),
        }
    }

    /// Create a build error with context
    pub fn build(msg: impl Into<String>) -> Self {
        ReleaseError::Build(msg.into())
    }

    /// Create a publish error with context
    pub fn publish(msg: impl Into<String>) -> Self {
        ReleaseError::Publish(msg.into())
    }

    /// Whether this error is a missing prerequisite rather than a runtime failure
    pub fn is_precondition(&self) -> bool {
        matches!(self, ReleaseError::ToolMissing(_) | ReleaseError::AuthMissing)
    }
}
