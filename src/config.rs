use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ReleaseError, Result};

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "releasegate.toml";

/// Represents the complete configuration for release-gate.
///
/// Every section is optional; an empty file yields the same behavior as running without one.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_release_branch")]
    pub release_branch: String,

    #[serde(default)]
    pub tag: TagConfig,

    #[serde(default)]
    pub package: PackageConfig,

    #[serde(default)]
    pub publish: PublishConfig,

    #[serde(default)]
    pub tools: ToolsConfig,
}

fn default_release_branch() -> String {
    "main".to_string()
}

fn default_tag_pattern() -> String {
    "v{version}".to_string()
}

fn default_delimiter() -> String {
    "#".to_string()
}

fn default_target_dir() -> String {
    "target".to_string()
}

fn default_true() -> bool {
    true
}

/// How release tags are named.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TagConfig {
    #[serde(default = "default_tag_pattern")]
    pub pattern: String,
}

impl Default for TagConfig {
    fn default() -> Self {
        TagConfig {
            pattern: default_tag_pattern(),
        }
    }
}

/// How the package identifier is read and where the built binary lands.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PackageConfig {
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Binary to upload; falls back to the package name from the identifier
    #[serde(default)]
    pub binary: Option<String>,

    #[serde(default = "default_target_dir")]
    pub target_dir: String,
}

impl Default for PackageConfig {
    fn default() -> Self {
        PackageConfig {
            delimiter: default_delimiter(),
            binary: None,
            target_dir: default_target_dir(),
        }
    }
}

impl PackageConfig {
    /// The delimiter as a single character. Only valid after [Config::validate].
    pub fn delimiter_char(&self) -> char {
        self.delimiter.chars().next().unwrap_or('#')
    }
}

/// Flags forwarded to the release creation command.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PublishConfig {
    #[serde(default = "default_true")]
    pub latest: bool,

    #[serde(default = "default_true")]
    pub generate_notes: bool,
}

impl Default for PublishConfig {
    fn default() -> Self {
        PublishConfig {
            latest: true,
            generate_notes: true,
        }
    }
}

/// Program names of the external collaborators.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ToolsConfig {
    #[serde(default = "default_git")]
    pub git: String,

    #[serde(default = "default_gh")]
    pub gh: String,

    #[serde(default = "default_cargo")]
    pub cargo: String,
}

fn default_git() -> String {
    "git".to_string()
}

fn default_gh() -> String {
    "gh".to_string()
}

fn default_cargo() -> String {
    "cargo".to_string()
}

impl Default for ToolsConfig {
    fn default() -> Self {
        ToolsConfig {
            git: default_git(),
            gh: default_gh(),
            cargo: default_cargo(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            release_branch: default_release_branch(),
            tag: TagConfig::default(),
            package: PackageConfig::default(),
            publish: PublishConfig::default(),
            tools: ToolsConfig::default(),
        }
    }
}

impl Config {
    /// Parse a configuration from TOML text and validate it.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.release_branch.trim().is_empty() {
            return Err(ReleaseError::config("release_branch must not be empty"));
        }

        if self.tag.pattern.matches("{version}").count() != 1 {
            return Err(ReleaseError::config(format!(
                "tag pattern '{}' must contain exactly one {{version}} placeholder",
                self.tag.pattern
            )));
        }

        if self.package.delimiter.chars().count() != 1 {
            return Err(ReleaseError::config(format!(
                "package delimiter '{}' must be a single character",
                self.package.delimiter
            )));
        }

        if let Some(binary) = &self.package.binary {
            if binary.trim().is_empty() {
                return Err(ReleaseError::config("package binary must not be empty"));
            }
        }

        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `releasegate.toml` in `base_dir`
/// 3. `.releasegate.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read, parsed or validated
pub fn load_config(config_path: Option<&Path>, base_dir: &Path) -> Result<Config> {
    let Some(path) = locate_config(config_path, base_dir) else {
        log::debug!("No configuration file found, using defaults");
        return Ok(Config::default());
    };

    log::debug!("Loading configuration from {}", path.display());
    let text = fs::read_to_string(&path).map_err(|e| {
        ReleaseError::config(format!("cannot read {}: {}", path.display(), e))
    })?;
    Config::from_toml(&text)
}

fn locate_config(config_path: Option<&Path>, base_dir: &Path) -> Option<PathBuf> {
    if let Some(path) = config_path {
        return Some(path.to_path_buf());
    }

    let local = base_dir.join(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }

    let user = dirs::config_dir()?.join(format!(".{}", CONFIG_FILE_NAME));
    user.exists().then_some(user)
}
