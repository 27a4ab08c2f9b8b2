//! Build configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// VCS metadata directories the walk never enters.
pub const VCS_DIRS: &[&str] = &[".git", ".hg", ".svn", ".jj", ".bzr"];

/// Configuration for an include-path build.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct BuildConfig {
    /// Root of the analysis source tree.
    pub root: PathBuf,

    /// User exclude globs, matched against root-relative paths.
    #[builder(default)]
    #[serde(default)]
    pub exclude_patterns: Vec<String>,

    /// Consult the version-control system for ignore rules.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub use_vcs: bool,

    /// Skip VCS metadata directories (`.git` and friends) during the walk.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub skip_vcs_dirs: bool,
}

fn default_true() -> bool {
    true
}

impl BuildConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("Root path cannot be empty".to_string());
            }
        } else {
            return Err("Root path is required".to_string());
        }
        if let Some(ref patterns) = self.exclude_patterns {
            if patterns.iter().any(|p| p.trim().is_empty()) {
                return Err("Exclude patterns cannot be empty".to_string());
            }
        }
        Ok(())
    }
}

impl BuildConfig {
    /// Create a new build config builder.
    pub fn builder() -> BuildConfigBuilder {
        BuildConfigBuilder::default()
    }

    /// Create a simple config for a root with no excludes.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            exclude_patterns: Vec::new(),
            use_vcs: true,
            skip_vcs_dirs: true,
        }
    }

    /// Check if a directory name is VCS metadata the walk should skip.
    pub fn should_skip_dir(&self, name: &str) -> bool {
        self.skip_vcs_dirs && VCS_DIRS.contains(&name)
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = BuildConfig::builder()
            .root("/home/user/project")
            .exclude_patterns(vec!["vendor/**".to_string()])
            .use_vcs(false)
            .build()
            .unwrap();

        assert_eq!(config.root, PathBuf::from("/home/user/project"));
        assert_eq!(config.exclude_patterns, vec!["vendor/**"]);
        assert!(!config.use_vcs);
        assert!(config.skip_vcs_dirs);
    }

    #[test]
    fn test_config_builder_requires_root() {
        assert!(BuildConfig::builder().build().is_err());
        assert!(BuildConfig::builder().root("").build().is_err());
    }

    #[test]
    fn test_config_builder_rejects_blank_pattern() {
        let result = BuildConfig::builder()
            .root("/repo")
            .exclude_patterns(vec!["  ".to_string()])
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_should_skip_dir() {
        let mut config = BuildConfig::new("/repo");
        assert!(config.should_skip_dir(".git"));
        assert!(!config.should_skip_dir("src"));

        config.skip_vcs_dirs = false;
        assert!(!config.should_skip_dir(".git"));
    }

    #[test]
    fn test_config_deserialize_defaults() {
        let config: BuildConfig = serde_json::from_str(r#"{"root": "/repo"}"#).unwrap();
        assert!(config.use_vcs);
        assert!(config.skip_vcs_dirs);
        assert!(config.exclude_patterns.is_empty());
    }
}
