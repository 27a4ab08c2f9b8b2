//! Core types for scanscope.
//!
//! This crate provides the data model shared by the include-path builder:
//! root-relative paths, per-path verdicts, the include-entry result set,
//! build configuration, and the error type.

mod config;
mod entry;
mod error;
mod path;

pub use config::{BuildConfig, BuildConfigBuilder, VCS_DIRS};
pub use entry::{IncludeEntry, IncludePaths, Verdict};
pub use error::BuildError;
pub use path::{EntryKind, RelPath};
