use std::fmt;

/// A release tag such as `v1.2.3`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTag {
    pub name: String,
}

impl ReleaseTag {
    /// Create a new tag from a string
    pub fn new(name: impl Into<String>) -> Self {
        ReleaseTag { name: name.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Check whether this exact tag appears in `existing`.
    ///
    /// Entries are compared after trimming surrounding whitespace; prefixes and
    /// substrings never match (`v1.2.3` is not in `["v1.2.30", "v1.2.3-rc1"]`).
    pub fn exists_in<S: AsRef<str>>(&self, existing: &[S]) -> bool {
        existing.iter().any(|tag| tag.as_ref().trim() == self.name)
    }
}

impl fmt::Display for ReleaseTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Tag naming pattern (e.g., "v{version}", "release-{version}")
#[derive(Debug, Clone)]
pub struct TagPattern {
    pub pattern: String,
}

impl TagPattern {
    /// Create a new tag pattern
    pub fn new(pattern: impl Into<String>) -> Self {
        TagPattern {
            pattern: pattern.into(),
        }
    }

    /// Format a version according to pattern
    /// Example: pattern="v{version}", version="1.2.3" -> "v1.2.3"
    pub fn format(&self, version: &str) -> ReleaseTag {
        ReleaseTag::new(self.pattern.replace("{version}", version))
    }
}

impl Default for TagPattern {
    fn default() -> Self {
        TagPattern::new("v{version}")
    }
}
