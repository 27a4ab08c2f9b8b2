//! Permission-bit readability checks.

use std::fs::Metadata;

use scanscope_core::BuildError;

use crate::candidate::Candidate;

/// Reports whether a path is readable by every principal expected to run
/// the analysis.
pub trait ReadabilityOracle {
    /// Files need the world-read bit; directories need world read and
    /// traverse. Metadata failures are operational errors.
    fn is_readable_by_all(&self, candidate: &Candidate) -> Result<bool, BuildError>;
}

impl<T: ReadabilityOracle + ?Sized> ReadabilityOracle for Box<T> {
    fn is_readable_by_all(&self, candidate: &Candidate) -> Result<bool, BuildError> {
        (**self).is_readable_by_all(candidate)
    }
}

/// Readability from the real file mode bits.
///
/// Symlinks are judged by their target; a dangling link surfaces as
/// `BuildError::NotFound`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionOracle;

impl ReadabilityOracle for PermissionOracle {
    fn is_readable_by_all(&self, candidate: &Candidate) -> Result<bool, BuildError> {
        let metadata =
            std::fs::metadata(&candidate.abs).map_err(|e| BuildError::io(&candidate.abs, e))?;
        Ok(readable_by_all(&metadata))
    }
}

#[cfg(unix)]
fn readable_by_all(metadata: &Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    let mode = metadata.permissions().mode();
    if metadata.is_dir() {
        mode & 0o005 == 0o005
    } else {
        mode & 0o004 != 0
    }
}

#[cfg(not(unix))]
fn readable_by_all(_metadata: &Metadata) -> bool {
    true // No world bits to consult
}
