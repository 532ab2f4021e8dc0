//! A local filesystem capability for Rust. Wraps the low-level, error-code
//! shaped operations of the host OS behind one trait with typed failure
//! modes.
//!
//! ### Overview
//!
//! `fs-kit` defines the generic [`Filesystem`] trait and provides
//! [`LocalFS`], the implementation backed by the host filesystem.
//!
//! **Key ideas**:
//! - **One surface**: Existence, classification, read/write, links,
//!   directory creation and removal, and module loading behind a single
//!   capability callers can be generic over.
//! - **Typed failures**: Every fallible call returns a [`FsError`] kind
//!   (`NotFound`, `InvalidTarget`, `AlreadyExists`, `NotEmpty`, ...) with
//!   the offending path and, for OS failures, the original error.
//! - **Safe recursive removal**: Depth-first, post-order deletion that
//!   discriminates links from files and directories and never follows a
//!   link out of the subtree.
//! - **No hidden state**: Paths are opaque; every operation re-queries the
//!   OS at call time.

mod core;
mod error;
mod perms;
mod vfs;

pub use crate::core::{Filesystem, Result};
pub use crate::error::FsError;
pub use crate::perms::{BitsField, PosixPermissions};
pub use crate::vfs::{Bindings, EntryKind, Loaded, LocalFS, ModuleLoader, TemplateLoader};
