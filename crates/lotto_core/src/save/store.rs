use super::error::SaveError;
use std::collections::BTreeMap;
use std::fs::{remove_file, rename, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// The host's local key-value storage (browser localStorage, a settings file, ...).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, SaveError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), SaveError>;

    fn remove(&mut self, key: &str) -> Result<(), SaveError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, SaveError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SaveError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), SaveError> {
        (**self).remove(key)
    }
}

/// In-memory store for tests and hosts that bridge storage themselves.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, SaveError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SaveError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SaveError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per entry inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, SaveError> {
        let valid = !key.is_empty()
            && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(SaveError::InvalidKey { key: key.to_string() });
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, SaveError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SaveError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;

        // Write to a temp file, then rename over the old entry
        let temp_path = path.with_extension("tmp");
        {
            let mut file = File::create(&temp_path)?;
            file.write_all(value.as_bytes())?;
            file.flush()?;
            file.sync_all()?;
        }
        rename(&temp_path, &path)?;

        log::debug!("Wrote {} bytes to {:?}", value.len(), path);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SaveError> {
        let path = self.path_for(key)?;
        match remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
