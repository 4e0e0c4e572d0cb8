//! Flat-file persistence for the address book and the note collection.
//!
//! # Responsibility
//! - Load both collections, degrading to a backup or an empty collection.
//! - Save both collections with a timestamped backup of the previous file.
//!
//! # Invariants
//! - Loading never fails; every fallback is logged.
//! - Saving replaces the target file through a temp file + rename.
//! - At most `MAX_BACKUPS` backups are kept per file.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod file_store;

pub use file_store::{FileStore, ADDRESS_BOOK_FILE, FORMAT_VERSION, MAX_BACKUPS, NOTES_FILE};

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence failure for one file.
#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Codec {
        path: PathBuf,
        source: serde_json::Error,
    },
    UnsupportedFormat {
        path: PathBuf,
        found: u32,
        supported: u32,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn codec(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Codec {
            path: path.into(),
            source,
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "I/O error on `{}`: {source}", path.display()),
            Self::Codec { path, source } => {
                write!(f, "invalid data in `{}`: {source}", path.display())
            }
            Self::UnsupportedFormat {
                path,
                found,
                supported,
            } => write!(
                f,
                "`{}` has format version {found}, expected {supported}",
                path.display()
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Codec { source, .. } => Some(source),
            Self::UnsupportedFormat { .. } => None,
        }
    }
}
