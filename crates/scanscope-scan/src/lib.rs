//! Include-path computation for scanscope.
//!
//! Given a source tree, this crate decides the minimal set of paths an
//! analysis engine should scan. Three independent exclusion sources are
//! reconciled per path:
//!
//! - **User excludes** - glob patterns from configuration
//! - **VCS ignore rules** - paths the repository would refuse to track
//! - **Permissions** - paths not readable by every principal
//!
//! Excluded paths are dropped silently. A path that nothing excludes but
//! that is not readable by all aborts the build with
//! [`BuildError::UnreadableFile`], since the analysis would otherwise skip
//! code without anyone noticing.
//!
//! Directories whose every descendant is included collapse into a single
//! `dir/` entry; a fully includable tree becomes the single entry `./`.
//!
//! # Example
//!
//! ```rust,no_run
//! use scanscope_scan::{BuildConfig, IncludePathsBuilder};
//!
//! let config = BuildConfig::builder()
//!     .root("/path/to/project")
//!     .exclude_patterns(vec!["vendor/**".to_string()])
//!     .build()
//!     .unwrap();
//!
//! let paths = IncludePathsBuilder::detect(config)?.build()?;
//! for entry in paths.iter() {
//!     println!("{entry}");
//! }
//! # Ok::<(), scanscope_scan::BuildError>(())
//! ```
//!
//! # Custom oracles
//!
//! The VCS and readability checks are traits, so a build can run against
//! in-memory answers:
//!
//! ```rust,no_run
//! use scanscope_scan::{BuildConfig, IncludePathsBuilder, PermissionOracle, Untracked};
//!
//! let builder = IncludePathsBuilder::new(BuildConfig::new("."), Untracked, PermissionOracle);
//! let paths = builder.build()?;
//! # Ok::<(), scanscope_scan::BuildError>(())
//! ```

mod builder;
mod candidate;
mod classify;
mod collapse;
mod exclude;
mod readable;
mod vcs;

pub use builder::IncludePathsBuilder;
pub use candidate::Candidate;
pub use classify::PathClassifier;
pub use collapse::{CollapseStats, Subtree, TreeCollapser};
pub use exclude::ExcludeMatcher;
pub use readable::{PermissionOracle, ReadabilityOracle};
pub use vcs::{Memoized, TrackabilityOracle, Untracked};

#[cfg(feature = "git")]
pub use vcs::GitOracle;

// Re-export core types for convenience
pub use scanscope_core::{
    BuildConfig, BuildConfigBuilder, BuildError, EntryKind, IncludeEntry, IncludePaths, RelPath,
    Verdict,
};
