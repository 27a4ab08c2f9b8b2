//! Bottom-up directory collapsing.
//!
//! The walk is depth-first and post-order: a directory's entry can only be
//! decided once every child has been classified, because a single excluded
//! descendant anywhere beneath it forces it to be listed piecewise.

use std::path::Path;

use tracing::{debug, trace, warn};

use scanscope_core::{BuildConfig, BuildError, EntryKind, IncludeEntry, IncludePaths, Verdict};

use crate::candidate::Candidate;
use crate::classify::PathClassifier;

/// Result of walking one directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Subtree {
    /// Every descendant was included; the directory can stand as one entry.
    pub complete: bool,
    /// Individually includable children, used when `complete` is false.
    pub entries: Vec<IncludeEntry>,
}

/// Counters gathered during one walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollapseStats {
    /// Paths classified (files, symlinks and directories, root included).
    pub classified: u64,
    /// Paths pruned by an exclusion source.
    pub excluded: u64,
    /// Directories represented by a single entry.
    pub collapsed_dirs: u64,
    /// VCS metadata directories skipped without classification.
    pub skipped_vcs_dirs: u64,
    /// Distinct paths the VCS oracle answered.
    pub vcs_queries: u64,
}

/// Walks a source tree and collapses it into include entries.
pub struct TreeCollapser<'a> {
    classifier: PathClassifier,
    config: &'a BuildConfig,
    stats: CollapseStats,
}

impl<'a> TreeCollapser<'a> {
    pub fn new(classifier: PathClassifier, config: &'a BuildConfig) -> Self {
        Self {
            classifier,
            config,
            stats: CollapseStats::default(),
        }
    }

    /// Collapse the tree rooted at `root`.
    ///
    /// An excluded root yields an empty set; a complete root yields the
    /// whole-tree sentinel. Any unreadable, non-excluded path aborts with
    /// `BuildError::UnreadableFile` and no partial result.
    pub fn collapse(mut self, root: &Path) -> Result<(IncludePaths, CollapseStats), BuildError> {
        let root = Candidate::root(root);

        let paths = if !self.admit(&root)? {
            IncludePaths::new()
        } else {
            let subtree = self.visit_dir(&root)?;
            if subtree.complete {
                self.stats.collapsed_dirs += 1;
                IncludePaths::whole_tree()
            } else {
                subtree.entries.into_iter().collect()
            }
        };
        self.stats.vcs_queries = self.classifier.vcs_queries() as u64;
        Ok((paths, self.stats))
    }

    /// Classify a candidate. `Ok(false)` means excluded; fatal verdicts
    /// become errors here.
    fn admit(&mut self, candidate: &Candidate) -> Result<bool, BuildError> {
        self.stats.classified += 1;
        let verdict = self.classifier.classify(candidate)?;
        trace!(path = %candidate.rel, %verdict, "classified");
        match verdict {
            Verdict::Include => Ok(true),
            Verdict::Exclude => {
                self.stats.excluded += 1;
                debug!(path = %candidate.rel, kind = ?candidate.kind, "excluded");
                Ok(false)
            }
            Verdict::FatalUnreadable => {
                warn!(path = %candidate.rel, "path is not readable by all and not excluded");
                Err(BuildError::UnreadableFile {
                    path: candidate.rel.clone(),
                })
            }
        }
    }

    /// Walk a directory that has already been admitted.
    fn visit_dir(&mut self, dir: &Candidate) -> Result<Subtree, BuildError> {
        let mut complete = true;
        let mut entries = Vec::new();

        for child in self.read_children(dir)? {
            if !self.admit(&child)? {
                complete = false;
                continue;
            }

            if child.is_dir() {
                let subtree = self.visit_dir(&child)?;
                if subtree.complete {
                    self.stats.collapsed_dirs += 1;
                    debug!(path = %child.rel, "collapsed");
                    entries.push(IncludeEntry::Directory(child.rel));
                } else {
                    complete = false;
                    entries.extend(subtree.entries);
                }
            } else {
                entries.push(IncludeEntry::File(child.rel));
            }
        }

        Ok(Subtree { complete, entries })
    }

    /// List a directory's children in name order, minus VCS metadata.
    fn read_children(&mut self, dir: &Candidate) -> Result<Vec<Candidate>, BuildError> {
        let read_dir = std::fs::read_dir(&dir.abs).map_err(|e| BuildError::io(&dir.abs, e))?;

        let mut children = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| BuildError::io(&dir.abs, e))?;
            let file_type = entry
                .file_type()
                .map_err(|e| BuildError::io(entry.path(), e))?;
            let kind = EntryKind::from_file_type(file_type);
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy();

            if kind.is_dir() && self.config.should_skip_dir(&name) {
                self.stats.skipped_vcs_dirs += 1;
                continue;
            }
            children.push(dir.child(&name, entry.path(), kind));
        }

        children.sort_by(|a, b| a.rel.cmp(&b.rel));
        Ok(children)
    }
}
