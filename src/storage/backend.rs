//! # Collection Backends
//!
//! A backend maps a collection name to one blob of text. `FileBackend`
//! keeps one file per collection under a root directory; `MemoryBackend`
//! keeps everything in a map for unit tests.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use super::errors::{StorageError, StorageResult};

/// Backend trait for named collections
pub trait CollectionBackend: Send + Sync + std::fmt::Debug {
    /// Read the raw contents of a collection. `Ok(None)` means absent.
    fn read(&self, name: &str) -> StorageResult<Option<String>>;

    /// Replace the contents of a collection
    fn write(&self, name: &str, contents: &str) -> StorageResult<()>;
}

/// Collection names are single, plain path components
pub fn validate_collection_name(name: &str) -> StorageResult<()> {
    let path = Path::new(name);
    let single_component = path.components().count() == 1
        && path.file_name().map(|f| f == path.as_os_str()).unwrap_or(false);

    if name.is_empty() || !single_component {
        return Err(StorageError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// One file per collection under `root`
#[derive(Debug)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Path of the file backing `name`
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn temp_path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.tmp", name))
    }
}

impl CollectionBackend for FileBackend {
    fn read(&self, name: &str) -> StorageResult<Option<String>> {
        validate_collection_name(name)?;

        match fs::read_to_string(self.path_for(name)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(name, e)),
        }
    }

    fn write(&self, name: &str, contents: &str) -> StorageResult<()> {
        validate_collection_name(name)?;

        fs::create_dir_all(&self.root).map_err(|e| StorageError::io(name, e))?;

        // Write beside the target, then rename over it: a crash mid-write
        // leaves the previous contents intact.
        let temp_path = self.temp_path_for(name);
        fs::write(&temp_path, contents).map_err(|e| StorageError::io(name, e))?;

        fs::rename(&temp_path, self.path_for(name)).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            StorageError::io(name, e)
        })
    }
}

/// In-memory backend for testing
#[derive(Debug, Default)]
pub struct MemoryBackend {
    collections: RwLock<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection with raw contents, bypassing serialization
    pub fn insert_raw(&self, name: &str, contents: &str) {
        let mut collections = self.collections.write().unwrap_or_else(|e| e.into_inner());
        collections.insert(name.to_string(), contents.to_string());
    }
}

impl CollectionBackend for MemoryBackend {
    fn read(&self, name: &str) -> StorageResult<Option<String>> {
        validate_collection_name(name)?;
        let collections = self.collections.read().unwrap_or_else(|e| e.into_inner());
        Ok(collections.get(name).cloned())
    }

    fn write(&self, name: &str, contents: &str) -> StorageResult<()> {
        validate_collection_name(name)?;
        self.insert_raw(name, contents);
        Ok(())
    }
}
