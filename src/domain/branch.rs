/// Represents the checked-out branch relative to the configured release branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchContext {
    pub name: String,
    pub is_release: bool,
}

impl BranchContext {
    /// Create a branch context, comparing `name` exactly against `release_branch`
    pub fn new(name: impl Into<String>, release_branch: &str) -> Self {
        let name = name.into();
        let is_release = name == release_branch;

        BranchContext { name, is_release }
    }

    /// Check if releases may be cut from this branch
    pub fn is_release_branch(&self) -> bool {
        self.is_release
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_branch() {
        let branch = BranchContext::new("main", "main");
        assert!(branch.is_release_branch());
    }

    #[test]
    fn test_master_is_not_main() {
        let branch = BranchContext::new("master", "main");
        assert!(!branch.is_release_branch());
    }

    #[test]
    fn test_feature_branch() {
        let branch = BranchContext::new("feature/main", "main");
        assert!(!branch.is_release);
        assert_eq!(branch.name, "feature/main");
    }

    #[test]
    fn test_custom_release_branch() {
        assert!(BranchContext::new("release", "release").is_release_branch());
        assert!(!BranchContext::new("main", "release").is_release_branch());
    }
}
