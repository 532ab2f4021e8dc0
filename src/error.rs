use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::perms::BitsField;
use crate::vfs::EntryKind;

/// Failure kinds shared by every `Filesystem` operation.
///
/// Each fallible operation returns exactly one of these kinds; no operation
/// signals failure through a sentinel return value. The `Io` kind is the
/// catch-all for OS-signaled failures and keeps the originating
/// `std::io::Error` (OS code and message) as its source.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FsError {
    /// Target path does not exist where existence was required.
    #[error("{} does not exist", .path.display())]
    NotFound { path: PathBuf },

    /// The operation expected one entry kind but found another.
    #[error("{}: expected a {expected}, found a {found}", .path.display())]
    InvalidTarget {
        path: PathBuf,
        expected: EntryKind,
        found: EntryKind,
    },

    /// A creation operation targeted a path whose terminal component
    /// already exists.
    #[error("path already exists: {}", .path.display())]
    AlreadyExists { path: PathBuf },

    /// Non-recursive removal of a directory that still has entries.
    #[error("directory not empty: {}", .path.display())]
    NotEmpty { path: PathBuf },

    /// Permission bits outside the accepted `[1, 7]` range.
    #[error("{field} bits value of {value} is out of the [1-7] range.")]
    InvalidBits { field: BitsField, value: u32 },

    /// A module file could not be evaluated.
    #[error("cannot evaluate module {}: {reason}", .path.display())]
    Module { path: PathBuf, reason: String },

    /// Any other OS-signaled failure, with the operation that hit it.
    #[error("cannot {op} {}: {source}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FsError {
    /// Translates an OS error into the taxonomy.
    ///
    /// The mapping is deterministic: well-known `io::ErrorKind`s become
    /// their dedicated kinds, everything else stays an `Io` carrying the
    /// original error.
    pub(crate) fn from_io(op: &'static str, path: &Path, err: io::Error) -> Self {
        let path = path.to_path_buf();
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            io::ErrorKind::AlreadyExists => Self::AlreadyExists { path },
            io::ErrorKind::DirectoryNotEmpty => Self::NotEmpty { path },
            io::ErrorKind::IsADirectory => Self::InvalidTarget {
                path,
                expected: EntryKind::File,
                found: EntryKind::Directory,
            },
            io::ErrorKind::NotADirectory => Self::InvalidTarget {
                path,
                expected: EntryKind::Directory,
                found: EntryKind::File,
            },
            _ => Self::Io {
                op,
                path,
                source: err,
            },
        }
    }

    pub(crate) fn not_found(path: &Path) -> Self {
        Self::NotFound {
            path: path.to_path_buf(),
        }
    }

    pub(crate) fn invalid_target(path: &Path, expected: EntryKind, found: EntryKind) -> Self {
        Self::InvalidTarget {
            path: path.to_path_buf(),
            expected,
            found,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_io_maps_well_known_kinds() {
        let path = Path::new("/some/where");

        let err = FsError::from_io("read", path, io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, FsError::NotFound { .. }));

        let err = FsError::from_io("mkdir", path, io::Error::from(io::ErrorKind::AlreadyExists));
        assert!(matches!(err, FsError::AlreadyExists { .. }));

        let err = FsError::from_io(
            "remove directory",
            path,
            io::Error::from(io::ErrorKind::DirectoryNotEmpty),
        );
        assert!(matches!(err, FsError::NotEmpty { .. }));
    }

    #[test]
    fn test_from_io_keeps_unknown_kinds_generic() {
        let path = Path::new("/some/where");
        let err = FsError::from_io(
            "write",
            path,
            io::Error::from(io::ErrorKind::PermissionDenied),
        );

        match err {
            FsError::Io { op, source, .. } => {
                assert_eq!(op, "write");
                assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
            }
            other => panic!("expected Io, got {other:?}"),
        }
    }

    #[test]
    fn test_display_carries_path_and_context() {
        let err = FsError::not_found(Path::new("/missing/file"));
        assert_eq!(err.to_string(), "/missing/file does not exist");

        let err = FsError::invalid_target(
            Path::new("/some/dir"),
            EntryKind::File,
            EntryKind::Directory,
        );
        assert_eq!(err.to_string(), "/some/dir: expected a file, found a directory");
    }
}
