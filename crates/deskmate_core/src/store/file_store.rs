//! JSON file store with timestamped backups.

use super::{StoreError, StoreResult};
use crate::repo::address_book::AddressBook;
use crate::repo::note_collection::NoteCollection;
use chrono::Local;
use log::{error, info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub const ADDRESS_BOOK_FILE: &str = "addressbook.json";
pub const NOTES_FILE: &str = "notes.json";
/// Backups kept per data file.
pub const MAX_BACKUPS: usize = 5;
/// Envelope version written by this build. Other versions are not migrated.
pub const FORMAT_VERSION: u32 = 1;

const BACKUP_DIR: &str = "backups";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S-%3f";

#[derive(Serialize, Deserialize)]
struct Envelope<T> {
    format_version: u32,
    saved_at: String,
    data: T,
}

/// File-backed storage rooted at one data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn backup_dir(&self) -> PathBuf {
        self.root.join(BACKUP_DIR)
    }

    /// Loads the address book; never fails.
    pub fn load_address_book(&self) -> AddressBook {
        self.load_or_default(ADDRESS_BOOK_FILE)
    }

    /// Loads the note collection; never fails.
    pub fn load_notes(&self) -> NoteCollection {
        self.load_or_default(NOTES_FILE)
    }

    pub fn save_address_book(&self, book: &AddressBook) -> StoreResult<()> {
        self.save(ADDRESS_BOOK_FILE, book, book.len())
    }

    pub fn save_notes(&self, notes: &NoteCollection) -> StoreResult<()> {
        self.save(NOTES_FILE, notes, notes.len())
    }

    /// Backup files for `file_name`, oldest first.
    pub fn backups(&self, file_name: &str) -> StoreResult<Vec<PathBuf>> {
        let dir = self.backup_dir();
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(StoreError::io(dir, err)),
        };

        let prefix = format!("{}-", file_stem(file_name));
        let mut backups = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| StoreError::io(&dir, err))?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with(&prefix) && name.ends_with(".json") {
                backups.push(entry.path());
            }
        }
        backups.sort();
        Ok(backups)
    }

    fn load_or_default<T: DeserializeOwned + Default>(&self, file_name: &str) -> T {
        let started_at = Instant::now();
        let path = self.root.join(file_name);
        match read_envelope::<T>(&path) {
            Ok(Some(data)) => {
                info!(
                    "event=store_load module=store status=ok file={} duration_ms={}",
                    file_name,
                    started_at.elapsed().as_millis()
                );
                data
            }
            Ok(None) => {
                info!(
                    "event=store_load module=store status=missing file={}",
                    file_name
                );
                T::default()
            }
            Err(err) => {
                warn!(
                    "event=store_load module=store status=corrupt file={} error={}",
                    file_name, err
                );
                self.restore_latest_backup(file_name).unwrap_or_else(|| {
                    warn!(
                        "event=store_load module=store status=fallback_empty file={}",
                        file_name
                    );
                    T::default()
                })
            }
        }
    }

    fn restore_latest_backup<T: DeserializeOwned>(&self, file_name: &str) -> Option<T> {
        let backups = match self.backups(file_name) {
            Ok(backups) => backups,
            Err(err) => {
                error!(
                    "event=store_restore module=store status=error file={} error={}",
                    file_name, err
                );
                return None;
            }
        };

        backups.iter().rev().find_map(|path| match read_envelope::<T>(path) {
            Ok(Some(data)) => {
                warn!(
                    "event=store_restore module=store status=ok file={} backup={}",
                    file_name,
                    path.display()
                );
                Some(data)
            }
            Ok(None) => None,
            Err(err) => {
                warn!(
                    "event=store_restore module=store status=skip file={} backup={} error={}",
                    file_name,
                    path.display(),
                    err
                );
                None
            }
        })
    }

    fn save<T: Serialize>(&self, file_name: &str, data: &T, items: usize) -> StoreResult<()> {
        let started_at = Instant::now();
        let result = self.write_with_backup(file_name, data);
        match &result {
            Ok(()) => info!(
                "event=store_save module=store status=ok file={} items={} duration_ms={}",
                file_name,
                items,
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=store_save module=store status=error file={} error={}",
                file_name, err
            ),
        }
        result
    }

    fn write_with_backup<T: Serialize>(&self, file_name: &str, data: &T) -> StoreResult<()> {
        fs::create_dir_all(&self.root).map_err(|err| StoreError::io(&self.root, err))?;
        let target = self.root.join(file_name);
        if target.is_file() {
            self.backup(file_name, &target)?;
        }

        let envelope = Envelope {
            format_version: FORMAT_VERSION,
            saved_at: Local::now().to_rfc3339(),
            data,
        };
        let encoded =
            serde_json::to_vec_pretty(&envelope).map_err(|err| StoreError::codec(&target, err))?;
        let staging = self.root.join(format!("{file_name}.tmp"));
        fs::write(&staging, encoded).map_err(|err| StoreError::io(&staging, err))?;
        fs::rename(&staging, &target).map_err(|err| StoreError::io(&target, err))
    }

    fn backup(&self, file_name: &str, source: &Path) -> StoreResult<()> {
        let dir = self.backup_dir();
        fs::create_dir_all(&dir).map_err(|err| StoreError::io(&dir, err))?;
        let stamp = Local::now().format(BACKUP_TIMESTAMP_FORMAT);
        let backup = dir.join(format!("{}-{stamp}.json", file_stem(file_name)));
        fs::copy(source, &backup).map_err(|err| StoreError::io(&backup, err))?;

        let backups = self.backups(file_name)?;
        let excess = backups.len().saturating_sub(MAX_BACKUPS);
        for stale in &backups[..excess] {
            fs::remove_file(stale).map_err(|err| StoreError::io(stale, err))?;
        }
        Ok(())
    }
}

fn read_envelope<T: DeserializeOwned>(path: &Path) -> StoreResult<Option<T>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(StoreError::io(path, err)),
    };
    let envelope: Envelope<T> =
        serde_json::from_slice(&bytes).map_err(|err| StoreError::codec(path, err))?;
    if envelope.format_version != FORMAT_VERSION {
        return Err(StoreError::UnsupportedFormat {
            path: path.to_path_buf(),
            found: envelope.format_version,
            supported: FORMAT_VERSION,
        });
    }
    Ok(Some(envelope.data))
}

fn file_stem(file_name: &str) -> &str {
    file_name.strip_suffix(".json").unwrap_or(file_name)
}
