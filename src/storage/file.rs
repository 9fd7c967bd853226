//! Durable storage medium persisted as a JSON document on disk.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tracing::warn;

use super::{check_quota, Storage};
use crate::error::{StorageError, StorageResult};

// == File Storage ==
/// Medium that survives restarts by rewriting a JSON file after every change.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: RwLock<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl FileStorage {
    /// Opens the medium at `path`, loading any previously persisted items.
    ///
    /// A missing file starts empty. An unreadable document is discarded with
    /// a warning.
    pub fn open(path: impl AsRef<Path>, quota_bytes: Option<usize>) -> StorageResult<Self> {
        let path = path.as_ref().to_path_buf();

        let items = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!("Discarding unreadable storage file {}: {}", path.display(), err);
                HashMap::new()
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => return Err(StorageError::Io(err)),
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        Ok(Self {
            path,
            items: RwLock::new(items),
            quota_bytes,
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, items: &HashMap<String, String>) -> StorageResult<()> {
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec(items)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.read().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut items = self.items.write();

        check_quota(&items, self.quota_bytes, key, value)?;

        let previous = items.insert(key.to_string(), value.to_string());
        if let Err(err) = self.persist(&items) {
            // Keep memory and disk in agreement
            match previous {
                Some(old) => items.insert(key.to_string(), old),
                None => items.remove(key),
            };
            return Err(err);
        }
        Ok(())
    }

    fn remove_item(&self, key: &str) {
        let mut items = self.items.write();
        if items.remove(key).is_some() {
            if let Err(err) = self.persist(&items) {
                warn!("Failed to persist removal of {}: {}", key, err);
            }
        }
    }

    fn keys(&self) -> Vec<String> {
        self.items.read().keys().cloned().collect()
    }

    fn len(&self) -> usize {
        self.items.read().len()
    }
}
