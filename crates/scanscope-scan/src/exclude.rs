//! User exclude-pattern matching.

use globset::{Glob, GlobSet, GlobSetBuilder};

use scanscope_core::{BuildError, RelPath};

/// Matches root-relative paths against the user's exclude globs.
///
/// A path is excluded when it, or any ancestor directory (with or without a
/// trailing `/`), matches a pattern. `*` may cross `/`.
///
/// Patterns ending in `/`, `/*` or `/**` also name their directory prefix,
/// so `vendor/*` excludes the `vendor` directory itself and the walk never
/// has to look inside it.
#[derive(Debug, Clone)]
pub struct ExcludeMatcher {
    patterns: Vec<String>,
    paths: GlobSet,
    dirs: GlobSet,
}

impl ExcludeMatcher {
    /// Compile a set of patterns. Invalid globs are reported up front.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, BuildError> {
        let mut paths = GlobSetBuilder::new();
        let mut dirs = GlobSetBuilder::new();
        let mut kept = Vec::with_capacity(patterns.len());

        for raw in patterns {
            let pattern = normalize(raw.as_ref());
            if pattern.is_empty() {
                continue;
            }
            paths.add(compile(raw.as_ref(), pattern)?);
            if let Some(prefix) = dir_prefix(pattern) {
                dirs.add(compile(raw.as_ref(), prefix)?);
            }
            kept.push(pattern.to_string());
        }

        Ok(Self {
            patterns: kept,
            paths: build(paths)?,
            dirs: build(dirs)?,
        })
    }

    /// A matcher that excludes nothing.
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
            paths: GlobSet::empty(),
            dirs: GlobSet::empty(),
        }
    }

    /// Check a path. `is_dir` enables the directory-prefix patterns for the
    /// path itself; ancestors are always directories.
    ///
    /// The root never matches.
    pub fn matches(&self, path: &RelPath, is_dir: bool) -> bool {
        if path.is_root() || self.patterns.is_empty() {
            return false;
        }
        if path.ancestors().any(|a| self.matches_dir(a)) {
            return true;
        }
        if is_dir {
            self.matches_dir(path.as_str())
        } else {
            self.paths.is_match(path.as_str())
        }
    }

    fn matches_dir(&self, dir: &str) -> bool {
        let slashed = format!("{dir}/");
        self.paths.is_match(dir)
            || self.paths.is_match(&slashed)
            || self.dirs.is_match(dir)
    }

    /// The normalized patterns in configuration order.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

impl Default for ExcludeMatcher {
    fn default() -> Self {
        Self::empty()
    }
}

fn normalize(pattern: &str) -> &str {
    let mut pattern = pattern.trim();
    loop {
        if let Some(rest) = pattern.strip_prefix("./") {
            pattern = rest;
        } else if let Some(rest) = pattern.strip_prefix('/') {
            pattern = rest;
        } else {
            return pattern;
        }
    }
}

fn dir_prefix(pattern: &str) -> Option<&str> {
    ["/**", "/*", "/"]
        .iter()
        .find_map(|suffix| pattern.strip_suffix(suffix))
        .filter(|prefix| !prefix.is_empty())
}

fn compile(raw: &str, pattern: &str) -> Result<Glob, BuildError> {
    Glob::new(pattern).map_err(|e| BuildError::InvalidPattern {
        pattern: raw.to_string(),
        message: e.kind().to_string(),
    })
}

fn build(builder: GlobSetBuilder) -> Result<GlobSet, BuildError> {
    builder.build().map_err(|e| BuildError::InvalidPattern {
        pattern: e.glob().unwrap_or_default().to_string(),
        message: e.kind().to_string(),
    })
}
