use std::fmt;
use std::fs::FileType;

/// What a directory entry is, without following symbolic links.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Symlink,
}

impl EntryKind {
    /// Classifies an entry by its raw file type. A symbolic link reports
    /// as a symlink, never as its target.
    pub fn of(file_type: FileType) -> EntryKind {
        if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        }
    }

    pub fn is_file(&self) -> bool {
        *self == EntryKind::File
    }

    pub fn is_dir(&self) -> bool {
        *self == EntryKind::Directory
    }

    pub fn is_link(&self) -> bool {
        *self == EntryKind::Symlink
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::File => write!(f, "file"),
            EntryKind::Directory => write!(f, "directory"),
            EntryKind::Symlink => write!(f, "symlink"),
        }
    }
}
