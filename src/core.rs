use std::path::Path;

use serde_json::Value;

use crate::error::FsError;
use crate::perms::PosixPermissions;
use crate::vfs::{Bindings, Loaded};

pub type Result<T> = std::result::Result<T, FsError>;

/// The filesystem capability.
///
/// Declares the full operation surface, polymorphic over backends. Every
/// fallible operation returns a typed [`FsError`]; none of them signals
/// failure through a sentinel value. All operations are synchronous and
/// blocking, and none of them caches state between calls: each one
/// re-queries the backend, so a check followed by an operation can race
/// with concurrent changes (accepted, not defended against).
pub trait Filesystem {
    /// Checks whether `path` exists. Follows symbolic links, so a dangling
    /// link does not exist by this test.
    fn exists<P: AsRef<Path>>(&self, path: P) -> bool;

    /// Logical negation of [`exists`](Filesystem::exists).
    fn does_not_exist<P: AsRef<Path>>(&self, path: P) -> bool {
        !self.exists(path)
    }

    /// Checks whether `path` is a regular file (or a link to one).
    fn is_file<P: AsRef<Path>>(&self, path: P) -> bool;

    /// Checks whether `path` is a directory (or a link to one).
    fn is_dir<P: AsRef<Path>>(&self, path: P) -> bool;

    /// Checks whether `path` is a symbolic link, without following it.
    /// A dangling link is still a link by this test.
    fn is_link<P: AsRef<Path>>(&self, path: P) -> bool;

    /// Reads the entire contents of a file.
    ///
    /// Fails with `NotFound` if `path` does not exist and `InvalidTarget`
    /// if it is a directory.
    fn read<P: AsRef<Path>>(&self, path: P) -> Result<Vec<u8>>;

    /// Writes `content` to `path`, replacing whatever was there.
    ///
    /// Fails with `InvalidTarget` if `path` is an existing directory.
    fn write<P: AsRef<Path>>(&self, path: P, content: &[u8]) -> Result<()>;

    /// Creates a symbolic link at `link` pointing to `original`.
    fn symlink<P: AsRef<Path>, Q: AsRef<Path>>(&self, original: P, link: Q) -> Result<()>;

    /// Creates a hard link at `link` to the file at `original`.
    fn hardlink<P: AsRef<Path>, Q: AsRef<Path>>(&self, original: P, link: Q) -> Result<()>;

    /// Creates the directory at `path` with default permissions (`0777`),
    /// including all missing ancestors.
    fn mkdir<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.mkdir_with(path, PosixPermissions::default())
    }

    /// Creates the directory at `path` with the given permissions,
    /// including all missing ancestors.
    ///
    /// Every missing ancestor is created before the leaf. Fails with
    /// `AlreadyExists` if the leaf already exists, directory or not.
    fn mkdir_with<P: AsRef<Path>>(&self, path: P, permissions: PosixPermissions) -> Result<()>;

    /// Removes the file at `path`.
    ///
    /// Fails with `NotFound` if there is no entry and `InvalidTarget` if
    /// the entry is a directory.
    fn rm_file<P: AsRef<Path>>(&self, path: P) -> Result<()>;

    /// Removes the symbolic link at `path` itself, not its target.
    ///
    /// Uses the same unlink primitive as [`rm_file`](Filesystem::rm_file).
    /// Fails with `InvalidTarget` if the entry is not a link.
    fn rm_link<P: AsRef<Path>>(&self, path: P) -> Result<()>;

    /// Removes the directory at `path`, which must be empty.
    ///
    /// Fails with `NotEmpty` if the directory still has entries.
    fn rm_dir<P: AsRef<Path>>(&self, path: P) -> Result<()>;

    /// Removes the directory at `path` and everything below it.
    ///
    /// The walk is depth-first and post-order: children are removed before
    /// their parent, and each parent is removed by the non-recursive
    /// primitive once it is empty. Symbolic links met during the walk are
    /// unlinked, never followed.
    fn rm_dir_all<P: AsRef<Path>>(&self, path: P) -> Result<()>;

    /// Evaluates the module file at `path` with `bindings` bound into its
    /// scope and returns the value it produces.
    ///
    /// Fails with `InvalidTarget` if `path` is not a regular file.
    fn load_module<P: AsRef<Path>>(&self, path: P, bindings: &Bindings) -> Result<Value>;

    /// Like [`load_module`](Filesystem::load_module), but idempotent per
    /// path: a repeated call for the same module returns
    /// [`Loaded::Already`] instead of re-evaluating it.
    fn load_module_once<P: AsRef<Path>>(&self, path: P, bindings: &Bindings) -> Result<Loaded>;
}
