//! Key/value float storage for the custom layout.

use crate::error::StoreError;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub trait LayoutStore {
    fn get(&self, key: &str) -> Option<f32>;

    fn put(&mut self, key: &str, value: f32) -> Result<(), StoreError>;

    fn remove(&mut self, key: &str) -> Result<(), StoreError>;

    fn put_all(&mut self, entries: &[(String, f32)]) -> Result<(), StoreError> {
        for (key, value) in entries {
            self.put(key, *value)?;
        }
        Ok(())
    }

    fn remove_all(&mut self, keys: &[String]) -> Result<(), StoreError> {
        for key in keys {
            self.remove(key)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStore {
    values: BTreeMap<String, f32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl LayoutStore for MemoryStore {
    fn get(&self, key: &str) -> Option<f32> {
        self.values.get(key).copied()
    }

    fn put(&mut self, key: &str, value: f32) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);
        Ok(())
    }
}

/// A JSON object of `key -> float`, rewritten whole on every change.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, f32>,
}

impl JsonFileStore {
    /// Open `path`, starting empty if the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let values = if path.exists() {
            let bytes = std::fs::read(&path)?;
            serde_json::from_slice(&bytes)?
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_vec_pretty(&self.values)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl LayoutStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<f32> {
        self.values.get(key).copied()
    }

    fn put(&mut self, key: &str, value: f32) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.values.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    fn put_all(&mut self, entries: &[(String, f32)]) -> Result<(), StoreError> {
        for (key, value) in entries {
            self.values.insert(key.clone(), *value);
        }
        self.flush()
    }

    fn remove_all(&mut self, keys: &[String]) -> Result<(), StoreError> {
        let mut changed = false;
        for key in keys {
            changed |= self.values.remove(key).is_some();
        }
        if changed {
            self.flush()?;
        }
        Ok(())
    }
}
