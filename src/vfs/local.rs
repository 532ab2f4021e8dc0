//! The local filesystem engine: a [`Filesystem`] implementation operating
//! against the host OS.
//!
//! ### Key points:
//! - **Opaque paths**: Paths are handed to the OS as-is at call time; no
//!   entry is cached, every operation re-queries the filesystem.
//! - **Typed failures**: Every OS call goes through a deterministic
//!   translation into [`FsError`], so no failure surfaces as a silent
//!   falsy return.
//! - **Post-order removal**: Recursive deletion walks depth-first and
//!   removes children before parents, unlinking symbolic links instead of
//!   following them.
//! - **Blocking**: Every operation is a direct, blocking call into the OS;
//!   there is no background work and no cancellation path.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde_json::Value;
use tracing::{debug, trace};

use crate::core::{Filesystem, Result};
use crate::error::FsError;
use crate::perms::PosixPermissions;
use crate::vfs::entry::EntryKind;
use crate::vfs::loader::{Bindings, Loaded, ModuleLoader, TemplateLoader};

/// A [`Filesystem`] backed by the host OS.
///
/// `LocalFS` keeps no view of the tree: the OS is always the source of
/// truth, and races between a check and a following operation are accepted.
/// The only state it owns is the module-load-once registry, guarded by a
/// mutex so the engine can be shared across threads.
///
/// ### Example:
/// ```
/// use fs_kit::{Filesystem, LocalFS};
///
/// let fs = LocalFS::new();
/// let root = std::env::temp_dir().join("fs_kit_localfs_doc");
/// # if fs.exists(&root) { fs.rm_dir_all(&root).unwrap(); }
/// fs.mkdir(root.join("docs")).unwrap();
/// fs.write(root.join("docs/note.txt"), b"Hello").unwrap();
/// assert!(fs.is_file(root.join("docs/note.txt")));
///
/// fs.rm_dir_all(&root).unwrap();
/// assert!(fs.does_not_exist(&root));
/// ```
pub struct LocalFS {
    loader: Box<dyn ModuleLoader + Send + Sync>,
    loaded: Mutex<BTreeSet<PathBuf>>,
}

impl LocalFS {
    /// Creates an engine with the default [`TemplateLoader`].
    pub fn new() -> Self {
        Self::with_loader(TemplateLoader::new())
    }

    /// Creates an engine with a custom module loader.
    pub fn with_loader(loader: impl ModuleLoader + Send + Sync + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            loaded: Mutex::new(BTreeSet::new()),
        }
    }

    /// Entry classification without following symbolic links.
    /// `None` means there is no entry at all.
    fn kind_of(path: &Path) -> Option<EntryKind> {
        fs::symlink_metadata(path)
            .ok()
            .map(|meta| EntryKind::of(meta.file_type()))
    }

    /// A module must resolve to a regular file; links to files count.
    fn ensure_module(&self, path: &Path) -> Result<()> {
        if self.is_file(path) {
            return Ok(());
        }
        match Self::kind_of(path) {
            Some(found) => Err(FsError::invalid_target(path, EntryKind::File, found)),
            None => Err(FsError::not_found(path)),
        }
    }

    /// Depth-first post-order removal of a directory subtree.
    ///
    /// Children are removed before their parent, and the parent goes
    /// through the non-recursive primitive once it is empty. Violating the
    /// ordering would surface as "directory not empty" from the OS.
    fn rm_tree(&self, dir: &Path) -> Result<()> {
        let entries = fs::read_dir(dir).map_err(|e| FsError::from_io("list directory", dir, e))?;

        for entry in entries {
            let entry = entry.map_err(|e| FsError::from_io("list directory", dir, e))?;
            let child = entry.path();
            let file_type = entry
                .file_type()
                .map_err(|e| FsError::from_io("classify", &child, e))?;

            match EntryKind::of(file_type) {
                // The link entry itself goes; descending through it could
                // leave the subtree or cycle forever.
                EntryKind::Symlink => {
                    trace!(path = %child.display(), "unlink symlink");
                    fs::remove_file(&child)
                        .map_err(|e| FsError::from_io("remove link", &child, e))?;
                }
                EntryKind::Directory => self.rm_tree(&child)?,
                EntryKind::File => {
                    trace!(path = %child.display(), "unlink file");
                    fs::remove_file(&child)
                        .map_err(|e| FsError::from_io("remove file", &child, e))?;
                }
            }
        }

        fs::remove_dir(dir).map_err(|e| FsError::from_io("remove directory", dir, e))
    }
}

impl Default for LocalFS {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFS {
    fn exists<P: AsRef<Path>>(&self, path: P) -> bool {
        path.as_ref().exists()
    }

    fn is_file<P: AsRef<Path>>(&self, path: P) -> bool {
        path.as_ref().is_file()
    }

    fn is_dir<P: AsRef<Path>>(&self, path: P) -> bool {
        path.as_ref().is_dir()
    }

    fn is_link<P: AsRef<Path>>(&self, path: P) -> bool {
        Self::kind_of(path.as_ref()).is_some_and(|kind| kind.is_link())
    }

    fn read<P: AsRef<Path>>(&self, path: P) -> Result<Vec<u8>> {
        let path = path.as_ref();
        if self.does_not_exist(path) {
            return Err(FsError::not_found(path));
        }
        if self.is_dir(path) {
            return Err(FsError::invalid_target(
                path,
                EntryKind::File,
                EntryKind::Directory,
            ));
        }
        fs::read(path).map_err(|e| FsError::from_io("read", path, e))
    }

    fn write<P: AsRef<Path>>(&self, path: P, content: &[u8]) -> Result<()> {
        let path = path.as_ref();
        if self.is_dir(path) {
            return Err(FsError::invalid_target(
                path,
                EntryKind::File,
                EntryKind::Directory,
            ));
        }
        fs::write(path, content).map_err(|e| FsError::from_io("write", path, e))
    }

    fn symlink<P: AsRef<Path>, Q: AsRef<Path>>(&self, original: P, link: Q) -> Result<()> {
        let (original, link) = (original.as_ref(), link.as_ref());
        #[cfg(unix)]
        let created = std::os::unix::fs::symlink(original, link);
        #[cfg(windows)]
        let created = std::os::windows::fs::symlink_file(original, link);
        created.map_err(|e| FsError::from_io("create symlink", link, e))
    }

    fn hardlink<P: AsRef<Path>, Q: AsRef<Path>>(&self, original: P, link: Q) -> Result<()> {
        let (original, link) = (original.as_ref(), link.as_ref());
        fs::hard_link(original, link).map_err(|e| FsError::from_io("create hard link", link, e))
    }

    fn mkdir_with<P: AsRef<Path>>(&self, path: P, permissions: PosixPermissions) -> Result<()> {
        let path = path.as_ref();
        if Self::kind_of(path).is_some() {
            return Err(FsError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }

        let mut builder = fs::DirBuilder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(permissions.mode());
        }
        #[cfg(not(unix))]
        let _ = permissions;

        // Collect the missing suffix of the path, then create it top-down
        // so every ancestor exists before its child.
        let mut missing = Vec::new();
        let mut cursor = Some(path);
        while let Some(dir) = cursor {
            if dir.as_os_str().is_empty() || dir.exists() {
                break;
            }
            missing.push(dir.to_path_buf());
            cursor = dir.parent();
        }

        for dir in missing.iter().rev() {
            trace!(path = %dir.display(), "create directory");
            builder
                .create(dir)
                .map_err(|e| FsError::from_io("create directory", dir, e))?;
        }

        Ok(())
    }

    fn rm_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        match Self::kind_of(path) {
            None => Err(FsError::not_found(path)),
            Some(EntryKind::Directory) => Err(FsError::invalid_target(
                path,
                EntryKind::File,
                EntryKind::Directory,
            )),
            Some(_) => fs::remove_file(path).map_err(|e| FsError::from_io("remove file", path, e)),
        }
    }

    fn rm_link<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        match Self::kind_of(path) {
            None => Err(FsError::not_found(path)),
            // Same unlink primitive as rm_file.
            Some(EntryKind::Symlink) => {
                fs::remove_file(path).map_err(|e| FsError::from_io("remove link", path, e))
            }
            Some(found) => Err(FsError::invalid_target(path, EntryKind::Symlink, found)),
        }
    }

    fn rm_dir<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        match Self::kind_of(path) {
            None => Err(FsError::not_found(path)),
            Some(EntryKind::Directory) => {
                fs::remove_dir(path).map_err(|e| FsError::from_io("remove directory", path, e))
            }
            Some(found) => Err(FsError::invalid_target(path, EntryKind::Directory, found)),
        }
    }

    fn rm_dir_all<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        match Self::kind_of(path) {
            None => Err(FsError::not_found(path)),
            Some(EntryKind::Directory) => {
                debug!(path = %path.display(), "removing directory tree");
                self.rm_tree(path)
            }
            // A link to a directory is not a directory here; removing
            // through it would delete a tree outside the given root.
            Some(found) => Err(FsError::invalid_target(path, EntryKind::Directory, found)),
        }
    }

    fn load_module<P: AsRef<Path>>(&self, path: P, bindings: &Bindings) -> Result<Value> {
        let path = path.as_ref();
        self.ensure_module(path)?;
        debug!(path = %path.display(), "loading module");
        self.loader.load(path, bindings)
    }

    fn load_module_once<P: AsRef<Path>>(&self, path: P, bindings: &Bindings) -> Result<Loaded> {
        let path = path.as_ref();
        self.ensure_module(path)?;

        let canonical =
            fs::canonicalize(path).map_err(|e| FsError::from_io("resolve module", path, e))?;

        let mut loaded = self
            .loaded
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if loaded.contains(&canonical) {
            return Ok(Loaded::Already);
        }

        debug!(path = %path.display(), "loading module once");
        let value = self.loader.load(path, bindings)?;
        loaded.insert(canonical);
        Ok(Loaded::Fresh(value))
    }
}
