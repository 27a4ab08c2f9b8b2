//! Git trackability via libgit2.

use std::collections::BTreeSet;
use std::path::Path;

use git2::{ErrorCode, Repository};
use tracing::debug;

use scanscope_core::{BuildError, RelPath};

use super::TrackabilityOracle;
use crate::candidate::Candidate;

/// Answers trackability from a Git repository.
///
/// A path is trackable when the index already holds it (for directories: any
/// path beneath it), or when the repository's ignore rules would let it be
/// added. Directory lookups use the trailing-slash form so directory-only
/// rules like `build/` apply.
pub struct GitOracle {
    repo: Repository,
    /// Analysis root relative to the working tree.
    prefix: RelPath,
    tracked: BTreeSet<String>,
}

impl GitOracle {
    /// Find the repository containing `root`.
    ///
    /// Returns `Ok(None)` when `root` is not inside any repository.
    pub fn discover(root: &Path) -> Result<Option<Self>, BuildError> {
        let repo = match Repository::discover(root) {
            Ok(repo) => repo,
            Err(e) if e.code() == ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(BuildError::vcs(e)),
        };
        Self::from_repository(repo, root).map(Some)
    }

    /// Use an already-opened repository whose working tree contains `root`.
    pub fn from_repository(repo: Repository, root: &Path) -> Result<Self, BuildError> {
        let workdir = repo
            .workdir()
            .ok_or_else(|| BuildError::vcs("bare repository has no working tree"))?;
        let workdir = workdir
            .canonicalize()
            .map_err(|e| BuildError::io(workdir, e))?;
        let root = root.canonicalize().map_err(|e| BuildError::io(root, e))?;

        let prefix = root
            .strip_prefix(&workdir)
            .map(RelPath::from_path)
            .map_err(|_| {
                BuildError::vcs(format!(
                    "{} is outside the working tree {}",
                    root.display(),
                    workdir.display()
                ))
            })?;

        let index = repo.index().map_err(BuildError::vcs)?;
        let tracked: BTreeSet<String> = index
            .iter()
            .map(|entry| String::from_utf8_lossy(&entry.path).into_owned())
            .collect();

        debug!(
            workdir = %workdir.display(),
            prefix = %prefix,
            tracked = tracked.len(),
            "opened git repository"
        );

        Ok(Self {
            repo,
            prefix,
            tracked,
        })
    }

    fn repo_path(&self, rel: &RelPath) -> RelPath {
        if self.prefix.is_root() {
            rel.clone()
        } else if rel.is_root() {
            self.prefix.clone()
        } else {
            self.prefix.join(rel.as_str())
        }
    }

    fn is_tracked(&self, path: &RelPath, is_dir: bool) -> bool {
        if !is_dir {
            return self.tracked.contains(path.as_str());
        }
        let dir = path.as_dir();
        self.tracked
            .range(dir.clone()..)
            .next()
            .is_some_and(|p| p.starts_with(&dir))
    }
}

impl TrackabilityOracle for GitOracle {
    fn is_trackable(&mut self, candidate: &Candidate) -> Result<bool, BuildError> {
        let path = self.repo_path(&candidate.rel);
        if path.is_root() {
            return Ok(true);
        }
        if self.is_tracked(&path, candidate.is_dir()) {
            return Ok(true);
        }

        let query_path = if candidate.is_dir() {
            path.as_dir()
        } else {
            path.to_string()
        };
        let ignored = self
            .repo
            .is_path_ignored(&query_path)
            .map_err(BuildError::vcs)?;
        Ok(!ignored)
    }
}

impl std::fmt::Debug for GitOracle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitOracle")
            .field("workdir", &self.repo.workdir())
            .field("prefix", &self.prefix)
            .field("tracked", &self.tracked.len())
            .finish()
    }
}
