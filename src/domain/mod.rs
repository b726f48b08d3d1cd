//! Domain logic - pure release rules independent of the external tools

pub mod branch;
pub mod package;
pub mod tag;

pub use branch::BranchContext;
pub use package::PackageId;
pub use tag::{ReleaseTag, TagPattern};
