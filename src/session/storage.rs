use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::{Mutex, RwLock};

use crate::error::GatewayResult;

/// String key/value store with session lifetime
pub trait SessionStorage: Send + Sync {
    fn get_item(&self, key: &str) -> GatewayResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> GatewayResult<()>;
    fn remove_item(&self, key: &str) -> GatewayResult<()>;
    fn clear(&self) -> GatewayResult<()>;
}

/// Lives as long as the process
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> GatewayResult<Option<String>> {
        Ok(self.items.read().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> GatewayResult<()> {
        self.items.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> GatewayResult<()> {
        self.items.write().remove(key);
        Ok(())
    }

    fn clear(&self) -> GatewayResult<()> {
        self.items.write().clear();
        Ok(())
    }
}

/// JSON object on disk, rewritten whole on every change.
/// The file is re-read on every access so another process's login is seen
/// on the next call.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStorage {
    pub const FILE_NAME: &'static str = "session.json";

    pub fn in_dir(dir: impl AsRef<Path>) -> GatewayResult<Self> {
        let dir = dir.as_ref();
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }
        Ok(Self {
            path: dir.join(Self::FILE_NAME),
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> GatewayResult<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, items: &HashMap<String, String>) -> GatewayResult<()> {
        let content = serde_json::to_string_pretty(items)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl SessionStorage for FileStorage {
    fn get_item(&self, key: &str) -> GatewayResult<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> GatewayResult<()> {
        let _guard = self.write_lock.lock();
        let mut items = self.load()?;
        items.insert(key.to_string(), value.to_string());
        self.save(&items)
    }

    fn remove_item(&self, key: &str) -> GatewayResult<()> {
        let _guard = self.write_lock.lock();
        let mut items = self.load()?;
        if items.remove(key).is_some() {
            self.save(&items)?;
        }
        Ok(())
    }

    fn clear(&self) -> GatewayResult<()> {
        let _guard = self.write_lock.lock();
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
