//! File-backed store: one JSON object mapping keys to string values.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, warn};

use super::KeyValueStore;
use crate::error::{Error, Result};

/// JSON file store.
///
/// The file is re-read on every access so edits made by another process
/// between commands are picked up. Mutations rewrite the whole file via a
/// sibling temp file and rename.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    // Serializes read-modify-write within this process.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(Error::StorageRead {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| Error::CorruptStore {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    /// `<store file>.<suffix>` next to the store file.
    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("store"));
        name.push(".");
        name.push(suffix);
        self.path.with_file_name(name)
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| Error::StorageWrite {
                    path: parent.to_path_buf(),
                    source,
                })?;
                debug!(path = %parent.display(), "Created store directory");
            }
        }

        let tmp = self.sibling("tmp");
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&tmp, json).map_err(|source| Error::StorageWrite {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| Error::StorageWrite {
            path: self.path.clone(),
            source,
        })
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.write_lock.lock();
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.write_lock.lock();
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.load()?.into_keys().collect())
    }

    /// Move an unparseable store file to `<file>.corrupt` so the next
    /// access starts from an empty store.
    fn repair(&self) -> Result<bool> {
        let _guard = self.write_lock.lock();
        match self.load() {
            Err(Error::CorruptStore { message, .. }) => {
                let aside = self.sibling("corrupt");
                fs::rename(&self.path, &aside).map_err(|source| Error::StorageWrite {
                    path: aside.clone(),
                    source,
                })?;
                warn!(
                    path = %self.path.display(),
                    moved_to = %aside.display(),
                    error = %message,
                    "Store file was unreadable and has been set aside"
                );
                Ok(true)
            }
            Err(e) => Err(e),
            Ok(_) => Ok(false),
        }
    }
}
