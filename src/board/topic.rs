//! # Topic Store
//!
//! Ordered, duplicate-free list of topic names, oldest first.

use std::sync::Arc;

use super::errors::{BoardError, BoardResult};
use crate::storage::{load_collection, save_collection, CollectionBackend, Loaded, StorageResult};

#[derive(Debug, Clone)]
pub struct TopicStore {
    backend: Arc<dyn CollectionBackend>,
    name: String,
}

impl TopicStore {
    pub fn new(backend: Arc<dyn CollectionBackend>, name: impl Into<String>) -> Self {
        Self {
            backend,
            name: name.into(),
        }
    }

    /// Load topics together with the load outcome
    pub fn load(&self) -> Loaded<Vec<String>> {
        load_collection(self.backend.as_ref(), &self.name)
    }

    /// Load topics in insertion order
    pub fn get_topics(&self) -> Vec<String> {
        self.load().into_value()
    }

    /// Replace the stored topics
    pub fn save_topics(&self, topics: &[String]) -> StorageResult<()> {
        save_collection(self.backend.as_ref(), &self.name, topics)
    }
}

/// Check a candidate topic name against the existing topics.
///
/// Returns the trimmed name when it is non-empty and not already present.
pub fn validate_new_topic(name: &str, existing: &[String]) -> BoardResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(BoardError::EmptyName);
    }

    if existing.iter().any(|t| t == name) {
        return Err(BoardError::DuplicateName(name.to_string()));
    }

    Ok(name.to_string())
}
