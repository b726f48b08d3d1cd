use crate::error::{ReleaseError, Result};

/// A package identifier as printed by the build tool (e.g. `cargo pkgid`)
///
/// The identifier is `<source><delimiter><fragment>`. The fragment is either a
/// bare version (`path+file:///src/tmgr#2.0.0`) or `name@version` when the
/// package name differs from the last path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageId {
    pub raw: String,
    pub name: Option<String>,
    pub version: String,
}

impl PackageId {
    /// Parse an identifier, taking the second `delimiter`-separated component as the version
    ///
    /// A `name@version` fragment (`path+file:///ws#tmgr@0.4.1`) is split at the
    /// `@`. Taking the whole second component would give a version of
    /// `tmgr@0.4.1` and a tag like `vtmgr@0.4.1`.
    pub fn parse(raw: &str, delimiter: char) -> Result<Self> {
        let raw = raw.trim();
        let mut parts = raw.split(delimiter);
        let source = parts.next().unwrap_or_default();
        let fragment = parts.next().ok_or_else(|| {
            ReleaseError::package_id(format!("'{}' has no '{}' delimiter", raw, delimiter))
        })?;

        let (name, version) = match fragment.split_once('@') {
            Some((name, version)) => (non_empty(name), version),
            None => (last_segment(source), fragment),
        };

        if version.trim().is_empty() {
            return Err(ReleaseError::package_id(format!(
                "'{}' has no version after '{}'",
                raw, delimiter
            )));
        }

        Ok(PackageId {
            raw: raw.to_string(),
            name,
            version: version.trim().to_string(),
        })
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

fn last_segment(source: &str) -> Option<String> {
    non_empty(source.trim_end_matches('/').rsplit('/').next().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_identifier() {
        let id = PackageId::parse("somepkg#1.2.3", '#').unwrap();
        assert_eq!(id.version, "1.2.3");
        assert_eq!(id.name.as_deref(), Some("somepkg"));
    }

    #[test]
    fn test_path_identifier() {
        let id = PackageId::parse("path+file:///home/dev/tmgr#2.0.0\n", '#').unwrap();
        assert_eq!(id.version, "2.0.0");
        assert_eq!(id.name.as_deref(), Some("tmgr"));
        assert_eq!(id.raw, "path+file:///home/dev/tmgr#2.0.0");
    }

    #[test]
    fn test_name_at_version_fragment() {
        let id = PackageId::parse("path+file:///home/dev/workspace#tmgr@0.4.1", '#').unwrap();
        assert_eq!(id.version, "0.4.1");
        assert_eq!(id.name.as_deref(), Some("tmgr"));
    }

    #[test]
    fn test_version_is_second_component() {
        let id = PackageId::parse("a#1.0.0#extra", '#').unwrap();
        assert_eq!(id.version, "1.0.0");
    }

    #[test]
    fn test_version_is_not_validated_as_semver() {
        let id = PackageId::parse("tool#nightly", '#').unwrap();
        assert_eq!(id.version, "nightly");
    }

    #[test]
    fn test_custom_delimiter() {
        let id = PackageId::parse("tool:3.1.4", ':').unwrap();
        assert_eq!(id.version, "3.1.4");
    }

    #[test]
    fn test_missing_delimiter() {
        let err = PackageId::parse("tmgr 2.0.0", '#').unwrap_err();
        assert!(matches!(err, ReleaseError::PackageId(_)));
    }

    #[test]
    fn test_empty_version() {
        assert!(PackageId::parse("tmgr#", '#').is_err());
        assert!(PackageId::parse("tmgr#name@", '#').is_err());
    }

    #[test]
    fn test_source_without_name() {
        let id = PackageId::parse("#1.0.0", '#').unwrap();
        assert_eq!(id.name, None);
    }
}
