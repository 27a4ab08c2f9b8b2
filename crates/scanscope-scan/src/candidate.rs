//! A path under consideration during the walk.

use std::path::{Path, PathBuf};

use scanscope_core::{EntryKind, RelPath};

/// A filesystem entry handed to the classifier and its oracles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Path relative to the analysis root.
    pub rel: RelPath,
    /// Absolute path on disk.
    pub abs: PathBuf,
    /// Entry kind, as seen without following symlinks.
    pub kind: EntryKind,
}

impl Candidate {
    /// The analysis root itself.
    pub fn root(root: &Path) -> Self {
        Self {
            rel: RelPath::root(),
            abs: root.to_path_buf(),
            kind: EntryKind::Directory,
        }
    }

    /// A child of this candidate.
    ///
    /// `name` only feeds the relative path; `abs` is the path the directory
    /// listing returned, so names that are not valid UTF-8 still resolve.
    pub fn child(&self, name: &str, abs: PathBuf, kind: EntryKind) -> Self {
        Self {
            rel: self.rel.join(name),
            abs,
            kind,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }
}
