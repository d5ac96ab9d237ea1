//! Typed load/save of one named collection.
//!
//! Loading never fails. Absent content yields an empty collection, and so
//! does content that cannot be read or decoded; the latter is reported as
//! [`LoadOutcome::Recovered`] and logged so corruption stays visible.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use super::backend::CollectionBackend;
use super::errors::{StorageError, StorageResult};
use crate::observability::{log_event_with_fields, Event, Severity};

/// How a collection load was satisfied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Durable content decoded successfully
    Found,
    /// No durable content exists yet
    Missing,
    /// Durable content existed but was unusable; an empty collection was used
    Recovered { reason: String },
}

impl LoadOutcome {
    pub fn is_recovered(&self) -> bool {
        matches!(self, LoadOutcome::Recovered { .. })
    }
}

/// A loaded collection plus how it was obtained
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub value: T,
    pub outcome: LoadOutcome,
}

impl<T> Loaded<T> {
    pub fn into_value(self) -> T {
        self.value
    }
}

/// Load the collection stored under `name`
pub fn load_collection<T: DeserializeOwned>(
    backend: &dyn CollectionBackend,
    name: &str,
) -> Loaded<Vec<T>> {
    let raw = match backend.read(name) {
        Ok(Some(raw)) if !raw.trim().is_empty() => raw,
        Ok(_) => {
            log_event_with_fields(Severity::Trace, Event::CollectionMissing, &[("name", name)]);
            return Loaded {
                value: Vec::new(),
                outcome: LoadOutcome::Missing,
            };
        }
        Err(e) => return recovered(name, e.to_string()),
    };

    match serde_json::from_str::<Vec<T>>(&raw) {
        Ok(value) => Loaded {
            value,
            outcome: LoadOutcome::Found,
        },
        Err(e) => recovered(name, format!("Failed to parse collection: {}", e)),
    }
}

fn recovered<T>(name: &str, reason: String) -> Loaded<Vec<T>> {
    log_event_with_fields(
        Severity::Warn,
        Event::CollectionRecovered,
        &[("name", name), ("reason", &reason)],
    );
    Loaded {
        value: Vec::new(),
        outcome: LoadOutcome::Recovered { reason },
    }
}

/// Serialize `items` as a 4-space indented JSON array and replace the
/// collection stored under `name`.
pub fn save_collection<T: Serialize>(
    backend: &dyn CollectionBackend,
    name: &str,
    items: &[T],
) -> StorageResult<()> {
    let result = to_pretty_json(items)
        .map_err(|e| StorageError::serialize(name, e))
        .and_then(|contents| backend.write(name, &contents));

    match &result {
        Ok(()) => {
            let count = items.len().to_string();
            log_event_with_fields(
                Severity::Trace,
                Event::CollectionSaved,
                &[("name", name), ("records", &count)],
            );
        }
        Err(e) => {
            let message = e.to_string();
            log_event_with_fields(
                Severity::Error,
                Event::CollectionSaveFailed,
                &[("name", name), ("error", &message)],
            );
        }
    }

    result
}

fn to_pretty_json<T: Serialize>(items: &[T]) -> serde_json::Result<String> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    items.serialize(&mut serializer)?;

    // serde_json only ever emits valid UTF-8
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBackend;

    #[test]
    fn test_missing_collection_loads_empty() {
        let backend = MemoryBackend::new();
        let loaded: Loaded<Vec<String>> = load_collection(&backend, "topics.json");

        assert!(loaded.value.is_empty());
        assert_eq!(loaded.outcome, LoadOutcome::Missing);
    }

    #[test]
    fn test_blank_collection_is_missing() {
        let backend = MemoryBackend::new();
        backend.insert_raw("topics.json", "  \n");

        let loaded: Loaded<Vec<String>> = load_collection(&backend, "topics.json");
        assert_eq!(loaded.outcome, LoadOutcome::Missing);
    }

    #[test]
    fn test_corrupt_collection_is_recovered() {
        let backend = MemoryBackend::new();
        backend.insert_raw("topics.json", "[\"Tech\", ");

        let loaded: Loaded<Vec<String>> = load_collection(&backend, "topics.json");
        assert!(loaded.value.is_empty());
        assert!(loaded.outcome.is_recovered());
    }

    #[test]
    fn test_wrong_shape_is_recovered() {
        let backend = MemoryBackend::new();
        backend.insert_raw("topics.json", "{\"topics\": [\"Tech\"]}");

        let loaded: Loaded<Vec<String>> = load_collection(&backend, "topics.json");
        assert!(loaded.value.is_empty());
        assert!(loaded.outcome.is_recovered());
    }

    #[test]
    fn test_save_then_load() {
        let backend = MemoryBackend::new();
        let topics = vec!["Tech".to_string(), "Music".to_string()];

        save_collection(&backend, "topics.json", &topics).unwrap();
        let loaded: Loaded<Vec<String>> = load_collection(&backend, "topics.json");

        assert_eq!(loaded.outcome, LoadOutcome::Found);
        assert_eq!(loaded.value, topics);
    }

    #[test]
    fn test_save_uses_four_space_indent() {
        let backend = MemoryBackend::new();
        save_collection(&backend, "topics.json", &["Tech".to_string()]).unwrap();

        let raw = backend.read("topics.json").unwrap().unwrap();
        assert_eq!(raw, "[\n    \"Tech\"\n]");
    }

    #[test]
    fn test_save_reports_backend_failure() {
        let backend = MemoryBackend::new();
        let result = save_collection(&backend, "../topics.json", &["Tech".to_string()]);
        assert!(result.is_err());
    }
}
