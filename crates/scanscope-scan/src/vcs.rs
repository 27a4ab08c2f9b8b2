//! Version-control trackability.
//!
//! The walk only needs one answer per path: would the VCS accept this path
//! (it is tracked, or adding it would not be refused by ignore rules)?

use std::collections::HashMap;

use scanscope_core::{BuildError, EntryKind, RelPath};

use crate::candidate::Candidate;

#[cfg(feature = "git")]
mod git;

#[cfg(feature = "git")]
pub use git::GitOracle;

/// Reports whether a path is tracked or trackable by the VCS.
pub trait TrackabilityOracle {
    fn is_trackable(&mut self, candidate: &Candidate) -> Result<bool, BuildError>;
}

impl<T: TrackabilityOracle + ?Sized> TrackabilityOracle for Box<T> {
    fn is_trackable(&mut self, candidate: &Candidate) -> Result<bool, BuildError> {
        (**self).is_trackable(candidate)
    }
}

/// Oracle for trees outside any repository: everything is trackable.
#[derive(Debug, Clone, Copy, Default)]
pub struct Untracked;

impl TrackabilityOracle for Untracked {
    fn is_trackable(&mut self, _candidate: &Candidate) -> Result<bool, BuildError> {
        Ok(true)
    }
}

/// Caches another oracle's answers for the lifetime of one build.
///
/// Each distinct (path, kind) pair reaches the inner oracle at most once.
#[derive(Debug)]
pub struct Memoized<O> {
    inner: O,
    answers: HashMap<(RelPath, EntryKind), bool>,
}

impl<O: TrackabilityOracle> Memoized<O> {
    pub fn new(inner: O) -> Self {
        Self {
            inner,
            answers: HashMap::new(),
        }
    }

    /// Number of distinct paths answered so far.
    pub fn len(&self) -> usize {
        self.answers.len()
    }
}

impl<O: TrackabilityOracle> TrackabilityOracle for Memoized<O> {
    fn is_trackable(&mut self, candidate: &Candidate) -> Result<bool, BuildError> {
        let key = (candidate.rel.clone(), candidate.kind);
        if let Some(&answer) = self.answers.get(&key) {
            return Ok(answer);
        }
        let answer = self.inner.is_trackable(candidate)?;
        self.answers.insert(key, answer);
        Ok(answer)
    }
}
