use crate::core::SelectionStore;
use crate::utils::error::{Result, StudioError};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const STORAGE_FILE: &str = "local_storage.json";

/// `localStorage` for the CLI: a JSON object kept in `<base_path>/local_storage.json`
/// so a selection survives between invocations.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    fn file_path(&self) -> PathBuf {
        Path::new(&self.base_path).join(STORAGE_FILE)
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        let path = self.file_path();
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let data = fs::read(&path)?;
        if data.is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_slice(&data).map_err(|e| StudioError::Storage {
            message: format!("{}: {}", path.display(), e),
        })
    }

    fn write_all(&self, items: &BTreeMap<String, String>) -> Result<()> {
        let full_path = self.file_path();

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, serde_json::to_vec_pretty(items)?)?;
        Ok(())
    }
}

impl SelectionStore for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.read_all()?;
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = match self.read_all() {
            Ok(items) => items,
            Err(StudioError::Storage { message }) => {
                // 無法解析的檔案直接重設
                tracing::warn!("Resetting unreadable local storage: {}", message);
                return self.write_all(&BTreeMap::new());
            }
            Err(e) => return Err(e),
        };
        if items.remove(key).is_some() {
            self.write_all(&items)?;
        }
        Ok(())
    }
}

/// In-process storage, lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn items(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.items.lock().map_err(|_| StudioError::Config {
            message: "storage lock poisoned".to_string(),
        })
    }
}

impl SelectionStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.items()?.remove(key);
        Ok(())
    }
}
