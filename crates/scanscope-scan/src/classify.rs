//! Per-path verdicts.

use scanscope_core::{BuildError, Verdict};

use crate::candidate::Candidate;
use crate::exclude::ExcludeMatcher;
use crate::readable::ReadabilityOracle;
use crate::vcs::{Memoized, TrackabilityOracle};

/// Combines user excludes, VCS trackability and readability into a verdict.
///
/// Exclusion sources are consulted first, so an excluded path is never
/// checked for readability and can never be fatal.
pub struct PathClassifier {
    excludes: ExcludeMatcher,
    trackability: Memoized<Box<dyn TrackabilityOracle>>,
    readability: Box<dyn ReadabilityOracle>,
}

impl PathClassifier {
    pub fn new(
        excludes: ExcludeMatcher,
        trackability: Box<dyn TrackabilityOracle>,
        readability: Box<dyn ReadabilityOracle>,
    ) -> Self {
        Self {
            excludes,
            trackability: Memoized::new(trackability),
            readability,
        }
    }

    /// Classify one path.
    ///
    /// Errors are operational (I/O, VCS); `FatalUnreadable` is a verdict,
    /// and turning it into a failure is the caller's job.
    pub fn classify(&mut self, candidate: &Candidate) -> Result<Verdict, BuildError> {
        if self.excludes.matches(&candidate.rel, candidate.is_dir()) {
            return Ok(Verdict::Exclude);
        }
        if !self.trackability.is_trackable(candidate)? {
            return Ok(Verdict::Exclude);
        }
        if !self.readability.is_readable_by_all(candidate)? {
            return Ok(Verdict::FatalUnreadable);
        }
        Ok(Verdict::Include)
    }

    /// Number of distinct paths the VCS oracle has answered.
    pub fn vcs_queries(&self) -> usize {
        self.trackability.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::collections::HashSet;
    use std::path::PathBuf;
    use std::rc::Rc;

    use scanscope_core::{EntryKind, RelPath};

    struct Ignored(HashSet<&'static str>);

    impl TrackabilityOracle for Ignored {
        fn is_trackable(&mut self, c: &Candidate) -> Result<bool, BuildError> {
            Ok(!self.0.contains(c.rel.as_str()))
        }
    }

    /// Unreadable set, plus a call counter to prove readability was skipped.
    struct Unreadable(HashSet<&'static str>, Rc<Cell<usize>>);

    impl ReadabilityOracle for Unreadable {
        fn is_readable_by_all(&self, c: &Candidate) -> Result<bool, BuildError> {
            self.1.set(self.1.get() + 1);
            Ok(!self.0.contains(c.rel.as_str()))
        }
    }

    fn classifier(
        excludes: &[&str],
        ignored: &[&'static str],
        unreadable: &[&'static str],
    ) -> (PathClassifier, Rc<Cell<usize>>) {
        let checks = Rc::new(Cell::new(0));
        let classifier = PathClassifier::new(
            ExcludeMatcher::new(excludes).unwrap(),
            Box::new(Ignored(ignored.iter().copied().collect())),
            Box::new(Unreadable(unreadable.iter().copied().collect(), checks.clone())),
        );
        (classifier, checks)
    }

    fn file(path: &str) -> Candidate {
        Candidate {
            rel: RelPath::new(path),
            abs: PathBuf::from("/src").join(path),
            kind: EntryKind::File,
        }
    }

    #[test]
    fn test_plain_file_is_included() {
        let (mut c, _) = classifier(&[], &[], &[]);
        assert_eq!(c.classify(&file("a.rb")).unwrap(), Verdict::Include);
    }

    #[test]
    fn test_user_exclude_rescues_unreadable() {
        let (mut c, checks) = classifier(&["unreadable.rb"], &[], &["unreadable.rb"]);
        assert_eq!(c.classify(&file("unreadable.rb")).unwrap(), Verdict::Exclude);
        assert_eq!(checks.get(), 0);
    }

    #[test]
    fn test_vcs_ignore_rescues_unreadable() {
        let (mut c, checks) = classifier(&[], &["unreadable.rb"], &["unreadable.rb"]);
        assert_eq!(c.classify(&file("unreadable.rb")).unwrap(), Verdict::Exclude);
        assert_eq!(checks.get(), 0);
    }

    #[test]
    fn test_unexcluded_unreadable_is_fatal() {
        let (mut c, _) = classifier(&["other.rb"], &["ignored.rb"], &["unreadable.rb"]);
        assert_eq!(
            c.classify(&file("unreadable.rb")).unwrap(),
            Verdict::FatalUnreadable
        );
    }

    #[test]
    fn test_vcs_answers_are_memoized() {
        let (mut c, _) = classifier(&[], &[], &[]);
        c.classify(&file("a.rb")).unwrap();
        c.classify(&file("a.rb")).unwrap();
        c.classify(&file("b.rb")).unwrap();
        assert_eq!(c.vcs_queries(), 2);
    }
}
