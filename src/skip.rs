use std::fmt;

/// Conditions under which no release is needed.
/// These end the run successfully and are reported to the user as information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The checked-out branch is not the release branch
    NotReleaseBranch { current: String, expected: String },
    /// HEAD is not the result of a merge
    NotMergeCommit,
    /// The derived release tag is already known to version control
    TagExists { tag: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotReleaseBranch { current, expected } => write!(
                f,
                "Not on the {} branch (current: {}). Skipping release.",
                expected, current
            ),
            SkipReason::NotMergeCommit => write!(f, "Not a merge commit. Skipping release."),
            SkipReason::TagExists { tag } => {
                write!(f, "Tag {} already exists. Skipping release.", tag)
            }
        }
    }
}
