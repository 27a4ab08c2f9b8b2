//! Verdicts and the include-entry result set.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::Display;

use crate::path::RelPath;

/// Per-path decision made by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Verdict {
    /// Scan this path.
    Include,
    /// Omit this path (and everything beneath it).
    Exclude,
    /// Not excluded by anything, but not readable by all. Aborts the build.
    FatalUnreadable,
}

/// One entry in the final include set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IncludeEntry {
    /// The whole tree, with nothing excluded anywhere. Rendered `./`.
    Root,
    /// A single file, rendered as its bare relative path.
    File(RelPath),
    /// A fully includable directory, rendered with a trailing `/`.
    Directory(RelPath),
}

impl IncludeEntry {
    fn sort_key(&self) -> (&str, u8) {
        match self {
            IncludeEntry::Root => ("", 0),
            IncludeEntry::File(path) => (path.as_str(), 1),
            IncludeEntry::Directory(path) => (path.as_str(), 2),
        }
    }
}

impl Ord for IncludeEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for IncludeEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for IncludeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncludeEntry::Root => f.write_str("./"),
            IncludeEntry::File(path) => write!(f, "{path}"),
            IncludeEntry::Directory(path) => write!(f, "{path}/"),
        }
    }
}

impl FromStr for IncludeEntry {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = RelPath::new(s);
        Ok(if path.is_root() {
            IncludeEntry::Root
        } else if s.ends_with('/') {
            IncludeEntry::Directory(path)
        } else {
            IncludeEntry::File(path)
        })
    }
}

impl Serialize for IncludeEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for IncludeEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let Ok(entry) = s.parse::<IncludeEntry>();
        Ok(entry)
    }
}

/// The set of include entries produced by a build.
///
/// Iteration is sorted so output is reproducible; the set itself carries no
/// meaningful order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IncludePaths {
    entries: BTreeSet<IncludeEntry>,
}

impl IncludePaths {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The single-entry set meaning "the entire tree".
    pub fn whole_tree() -> Self {
        let mut paths = Self::new();
        paths.insert(IncludeEntry::Root);
        paths
    }

    /// Insert an entry. Returns `false` if it was already present.
    pub fn insert(&mut self, entry: IncludeEntry) -> bool {
        self.entries.insert(entry)
    }

    /// Check for an entry by its rendered form, e.g. `"subdir/"` or `"a.rb"`.
    pub fn contains(&self, rendered: &str) -> bool {
        let Ok(entry) = rendered.parse::<IncludeEntry>();
        self.entries.contains(&entry)
    }

    /// Check if the set is exactly the root sentinel.
    pub fn is_whole_tree(&self) -> bool {
        self.entries.len() == 1 && self.entries.contains(&IncludeEntry::Root)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IncludeEntry> {
        self.entries.iter()
    }

    /// Rendered entries in sorted order.
    pub fn to_strings(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }
}

impl FromIterator<IncludeEntry> for IncludePaths {
    fn from_iter<I: IntoIterator<Item = IncludeEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Extend<IncludeEntry> for IncludePaths {
    fn extend<I: IntoIterator<Item = IncludeEntry>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl IntoIterator for IncludePaths {
    type Item = IncludeEntry;
    type IntoIter = std::collections::btree_set::IntoIter<IncludeEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
