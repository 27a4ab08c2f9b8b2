//! Include-path build entry point.

use std::time::Instant;

use tracing::{debug, info};

use scanscope_core::{BuildConfig, BuildError, IncludePaths};

use crate::classify::PathClassifier;
use crate::collapse::TreeCollapser;
use crate::exclude::ExcludeMatcher;
use crate::readable::{PermissionOracle, ReadabilityOracle};
use crate::vcs::{TrackabilityOracle, Untracked};

/// Builds the include-path set for one source tree.
///
/// A builder runs once: `build` consumes it, so VCS answers cached during a
/// build never leak into the next one.
pub struct IncludePathsBuilder {
    config: BuildConfig,
    trackability: Box<dyn TrackabilityOracle>,
    readability: Box<dyn ReadabilityOracle>,
}

impl IncludePathsBuilder {
    /// Create a builder with explicit oracles.
    pub fn new(
        config: BuildConfig,
        trackability: impl TrackabilityOracle + 'static,
        readability: impl ReadabilityOracle + 'static,
    ) -> Self {
        Self {
            config,
            trackability: Box::new(trackability),
            readability: Box::new(readability),
        }
    }

    /// Create a builder backed by real permission bits and, when the root
    /// sits inside a Git repository and `use_vcs` is set, Git ignore rules.
    pub fn detect(config: BuildConfig) -> Result<Self, BuildError> {
        let trackability = detect_vcs(&config)?;
        Ok(Self {
            config,
            trackability,
            readability: Box::new(PermissionOracle),
        })
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Run the build.
    ///
    /// Fails with `BuildError::UnreadableFile` when an unreadable path is
    /// excluded by neither the user patterns nor the VCS. Other errors are
    /// operational.
    pub fn build(self) -> Result<IncludePaths, BuildError> {
        let start = Instant::now();
        let root = &self.config.root;

        let metadata = std::fs::metadata(root).map_err(|e| BuildError::io(root, e))?;
        if !metadata.is_dir() {
            return Err(BuildError::NotADirectory { path: root.clone() });
        }

        let excludes = ExcludeMatcher::new(&self.config.exclude_patterns)?;
        debug!(patterns = ?excludes.patterns(), "compiled exclude patterns");

        let classifier = PathClassifier::new(excludes, self.trackability, self.readability);
        let (paths, stats) = TreeCollapser::new(classifier, &self.config).collapse(root)?;

        info!(
            root = %root.display(),
            entries = paths.len(),
            classified = stats.classified,
            excluded = stats.excluded,
            collapsed_dirs = stats.collapsed_dirs,
            vcs_queries = stats.vcs_queries,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "built include paths"
        );
        Ok(paths)
    }
}

#[cfg(feature = "git")]
fn detect_vcs(config: &BuildConfig) -> Result<Box<dyn TrackabilityOracle>, BuildError> {
    if !config.use_vcs {
        return Ok(Box::new(Untracked));
    }
    match crate::vcs::GitOracle::discover(&config.root)? {
        Some(oracle) => Ok(Box::new(oracle)),
        None => {
            debug!(root = %config.root.display(), "no repository found, treating every path as trackable");
            Ok(Box::new(Untracked))
        }
    }
}

#[cfg(not(feature = "git"))]
fn detect_vcs(_config: &BuildConfig) -> Result<Box<dyn TrackabilityOracle>, BuildError> {
    Ok(Box::new(Untracked))
}
