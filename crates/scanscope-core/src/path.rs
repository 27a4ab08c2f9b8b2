//! Root-relative path type used throughout the build.

use std::fmt;
use std::path::{Component, Path};

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// A path relative to the analysis root.
///
/// Always `/`-separated, without a leading `./` and without a trailing
/// separator. The root itself is the empty path.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelPath(CompactString);

impl RelPath {
    /// The analysis root.
    pub fn root() -> Self {
        Self(CompactString::default())
    }

    /// Normalize a string into a relative path.
    ///
    /// Leading `./`, leading `/`, trailing `/` and empty segments are
    /// dropped. Backslashes are kept; they are file-name characters on Unix.
    pub fn new(path: &str) -> Self {
        let mut out = CompactString::default();
        for segment in path.split('/').filter(|s| !s.is_empty() && *s != ".") {
            if !out.is_empty() {
                out.push('/');
            }
            out.push_str(segment);
        }
        Self(out)
    }

    /// Build from a native path that is already relative to the root.
    pub fn from_path(path: &Path) -> Self {
        let mut out = CompactString::default();
        for component in path.components() {
            if let Component::Normal(name) = component {
                if !out.is_empty() {
                    out.push('/');
                }
                out.push_str(&name.to_string_lossy());
            }
        }
        Self(out)
    }

    /// Check if this is the analysis root.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Append a single child name verbatim.
    ///
    /// The name comes from a directory listing and is not normalized: on Unix
    /// a `\` is an ordinary file-name character.
    pub fn join(&self, name: &str) -> Self {
        let mut out = self.0.clone();
        if !out.is_empty() {
            out.push('/');
        }
        out.push_str(name);
        Self(out)
    }

    /// The directory form with a trailing separator (`./` for the root).
    pub fn as_dir(&self) -> String {
        if self.is_root() {
            "./".to_string()
        } else {
            format!("{}/", self.0)
        }
    }

    /// Proper ancestors from shallowest to deepest, excluding the root.
    ///
    /// `a/b/c.rb` yields `a` then `a/b`.
    pub fn ancestors(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.match_indices('/').map(|(i, _)| &self.0[..i])
    }

    /// Display form for messages: `./` for the root, the path otherwise.
    pub fn display_name(&self) -> &str {
        if self.is_root() { "./" } else { self.as_str() }
    }
}

impl fmt::Display for RelPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for RelPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

/// Kind of filesystem entry met during the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    /// Regular file (or anything that is neither a directory nor a symlink).
    File,
    /// Directory.
    Directory,
    /// Symbolic link. Never followed during the walk.
    Symlink,
}

impl EntryKind {
    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, EntryKind::Directory)
    }

    /// Derive the kind from a file type without following symlinks.
    pub fn from_file_type(file_type: std::fs::FileType) -> Self {
        if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        }
    }
}
