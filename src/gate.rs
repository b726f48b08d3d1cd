//! Release gating sequence
//!
//! Runs the guard checks in a fixed order and, when every gate passes, builds
//! and publishes the release:
//!
//! `toolcheck → authcheck → branchcheck → mergecheck → versioncheck → tagcheck → build → publish`
//!
//! Each gate either lets the run continue, ends it early with a [SkipReason]
//! (nothing to release), or ends it with a [ReleaseError].

use std::fmt;
use std::path::PathBuf;

use crate::config::Config;
use crate::domain::{BranchContext, PackageId, ReleaseTag, TagPattern};
use crate::error::{ReleaseError, Result, ToolKind};
use crate::skip::SkipReason;
use crate::tools::{BuildTool, PublishRequest, ReleaseHost, VersionControl};

/// Options that change how far the sequence goes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReleaseOptions {
    /// Run every gate but neither build nor publish
    pub dry_run: bool,
}

/// How a run ended when no error occurred
#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseOutcome {
    /// A gate decided there is nothing to release
    Skipped(SkipReason),
    /// All gates passed; build and publish were not invoked
    DryRun { tag: ReleaseTag, artifact: PathBuf },
    /// The release was built and published
    Published {
        tag: ReleaseTag,
        artifact: PathBuf,
        /// Output of the hosting CLI, usually the release URL
        output: String,
    },
}

impl ReleaseOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, ReleaseOutcome::Skipped(_))
    }
}

/// Steps of the sequence, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ToolCheck,
    AuthCheck,
    BranchCheck,
    MergeCheck,
    VersionCheck,
    TagCheck,
    Build,
    Publish,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::ToolCheck => "toolcheck",
            Stage::AuthCheck => "authcheck",
            Stage::BranchCheck => "branchcheck",
            Stage::MergeCheck => "mergecheck",
            Stage::VersionCheck => "versioncheck",
            Stage::TagCheck => "tagcheck",
            Stage::Build => "build",
            Stage::Publish => "publish",
        };
        f.write_str(name)
    }
}

/// Run the full gate sequence against the given collaborators.
///
/// # Returns
/// * `Ok(ReleaseOutcome::Skipped(_))` - wrong branch, no merge in progress, or tag already present
/// * `Ok(ReleaseOutcome::DryRun { .. })` - all gates passed in dry-run mode
/// * `Ok(ReleaseOutcome::Published { .. })` - release built and created
/// * `Err` - missing tooling or authentication, unusable package id, or a failed command
pub fn run_release<V, H, B>(
    config: &Config,
    vcs: &V,
    host: &H,
    build: &B,
    options: &ReleaseOptions,
) -> Result<ReleaseOutcome>
where
    V: VersionControl + ?Sized,
    H: ReleaseHost + ?Sized,
    B: BuildTool + ?Sized,
{
    log::debug!("[{}] checking required tools", Stage::ToolCheck);
    if !vcs.is_available()? {
        return Err(ReleaseError::ToolMissing(ToolKind::VersionControl));
    }
    if !host.is_available()? {
        return Err(ReleaseError::ToolMissing(ToolKind::ReleaseHost));
    }

    log::debug!("[{}] checking hosting authentication", Stage::AuthCheck);
    if host.auth_token()?.trim().is_empty() {
        return Err(ReleaseError::AuthMissing);
    }

    log::debug!("[{}] reading current branch", Stage::BranchCheck);
    let branch = BranchContext::new(vcs.current_branch()?, &config.release_branch);
    if !branch.is_release_branch() {
        return Ok(skip(SkipReason::NotReleaseBranch {
            current: branch.name,
            expected: config.release_branch.clone(),
        }));
    }

    log::debug!("[{}] looking for MERGE_HEAD", Stage::MergeCheck);
    if !vcs.is_merge_commit()? {
        return Ok(skip(SkipReason::NotMergeCommit));
    }

    log::debug!("[{}] reading package identifier", Stage::VersionCheck);
    let package = PackageId::parse(&build.package_id()?, config.package.delimiter_char())?;
    let tag = TagPattern::new(config.tag.pattern.as_str()).format(&package.version);
    let artifact = artifact_path(config, &package)?;
    log::info!("Derived release tag {} from '{}'", tag, package.raw);

    log::debug!("[{}] checking existing tags", Stage::TagCheck);
    let existing = vcs.list_tags()?;
    if tag.exists_in(existing.as_slice()) {
        return Ok(skip(SkipReason::TagExists {
            tag: tag.name.clone(),
        }));
    }

    if options.dry_run {
        log::info!("Dry run: not building or publishing {}", tag);
        return Ok(ReleaseOutcome::DryRun { tag, artifact });
    }

    log::debug!("[{}] building release artifact", Stage::Build);
    build.build_release()?;

    log::debug!("[{}] creating release {}", Stage::Publish, tag);
    let request = PublishRequest {
        tag: tag.name.clone(),
        artifact: artifact.clone(),
        latest: config.publish.latest,
        generate_notes: config.publish.generate_notes,
    };
    let output = host.create_release(&request)?;
    log::info!("Published release {}", tag);

    Ok(ReleaseOutcome::Published {
        tag,
        artifact,
        output,
    })
}

fn skip(reason: SkipReason) -> ReleaseOutcome {
    log::info!("{}", reason);
    ReleaseOutcome::Skipped(reason)
}

/// `./<target_dir>/release/<binary>`, the binary defaulting to the package name
pub fn artifact_path(config: &Config, package: &PackageId) -> Result<PathBuf> {
    let binary = config
        .package
        .binary
        .as_deref()
        .or(package.name.as_deref())
        .ok_or_else(|| {
            ReleaseError::package_id(format!(
                "cannot determine binary name from '{}'; set package.binary",
                package.raw
            ))
        })?;

    Ok(PathBuf::from(".")
        .join(&config.package.target_dir)
        .join("release")
        .join(binary))
}
