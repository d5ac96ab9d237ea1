//! # Post Store
//!
//! Posts are kept in creation order. Ids are assigned by the store as one
//! more than the largest id present, so gaps left by hand-edited files
//! never cause reuse.
//!
//! Records written before ids existed are given one on every load
//! (`len + 1`). The fix-up is not written back, and when several legacy
//! records are present they all receive the same id; lookups then return
//! the first of them.
//!
//! Keys a record carries beyond the post fields are kept in `extra` and
//! written back unchanged.

use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::errors::{PostFieldError, PostFieldErrors};
use crate::observability::{log_event_with_fields, Event, Severity};
use crate::storage::{
    load_collection, save_collection, CollectionBackend, Loaded, StorageResult,
};

/// Timestamp layout stored with every post
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single authored submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub topic: String,
    pub content: String,
    pub timestamp: String,
    /// Unrecognised keys of the stored record
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// On-disk shape, tolerant of legacy records
#[derive(Debug, Deserialize)]
struct StoredPost {
    #[serde(default)]
    id: Option<u64>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    topic: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    timestamp: String,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Validated fields of a post that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub topic: String,
    pub content: String,
}

impl NewPost {
    /// Stamp the post with its id and creation time
    pub fn into_post(self, id: u64, created_at: NaiveDateTime) -> Post {
        Post {
            id,
            title: self.title,
            topic: self.topic,
            content: self.content,
            timestamp: created_at.format(TIMESTAMP_FORMAT).to_string(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PostStore {
    backend: Arc<dyn CollectionBackend>,
    name: String,
}

impl PostStore {
    pub fn new(backend: Arc<dyn CollectionBackend>, name: impl Into<String>) -> Self {
        Self {
            backend,
            name: name.into(),
        }
    }

    /// Load posts with legacy ids backfilled, together with the load outcome
    pub fn load(&self) -> Loaded<Vec<Post>> {
        let loaded: Loaded<Vec<StoredPost>> = load_collection(self.backend.as_ref(), &self.name);
        Loaded {
            value: backfill_ids(loaded.value),
            outcome: loaded.outcome,
        }
    }

    /// Load posts in creation order
    pub fn get_posts(&self) -> Vec<Post> {
        self.load().into_value()
    }

    /// Replace the stored posts
    pub fn save_posts(&self, posts: &[Post]) -> StorageResult<()> {
        save_collection(self.backend.as_ref(), &self.name, posts)
    }
}

fn backfill_ids(stored: Vec<StoredPost>) -> Vec<Post> {
    let fallback_id = stored.len() as u64 + 1;

    stored
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let id = record.id.unwrap_or_else(|| {
                let position = index.to_string();
                let assigned = fallback_id.to_string();
                log_event_with_fields(
                    Severity::Warn,
                    Event::PostIdBackfilled,
                    &[("position", &position), ("id", &assigned)],
                );
                fallback_id
            });

            Post {
                id,
                title: record.title,
                topic: record.topic,
                content: record.content,
                timestamp: record.timestamp,
                extra: record.extra,
            }
        })
        .collect()
}

/// Id for the next post: strictly greater than every id present
pub fn next_post_id(posts: &[Post]) -> u64 {
    posts.iter().map(|p| p.id).max().unwrap_or(0) + 1
}

/// Validate the fields of a new post.
///
/// Title and content are trimmed; the topic must match a known topic
/// exactly and is kept as given. Every failing field is reported.
pub fn validate_new_post(
    title: &str,
    topic: &str,
    content: &str,
    known_topics: &[String],
) -> Result<NewPost, PostFieldErrors> {
    let title = title.trim();
    let content = content.trim();
    let mut errors = Vec::new();

    if title.is_empty() {
        errors.push(PostFieldError::MissingTitle);
    }
    if !known_topics.iter().any(|t| t == topic) {
        errors.push(PostFieldError::InvalidTopic);
    }
    if content.is_empty() {
        errors.push(PostFieldError::MissingContent);
    }

    if !errors.is_empty() {
        return Err(PostFieldErrors(errors));
    }

    Ok(NewPost {
        title: title.to_string(),
        topic: topic.to_string(),
        content: content.to_string(),
    })
}

/// First post with the given id
pub fn find_post(posts: &[Post], id: u64) -> Option<&Post> {
    posts.iter().find(|p| p.id == id)
}

/// The last `n` posts, oldest first
pub fn recent_posts(posts: &[Post], n: usize) -> &[Post] {
    &posts[posts.len().saturating_sub(n)..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBackend;
    use chrono::NaiveDate;

    fn post(id: u64, title: &str) -> Post {
        Post {
            id,
            title: title.to_string(),
            topic: "Tech".to_string(),
            content: "body".to_string(),
            timestamp: "2024-01-02 03:04:05".to_string(),
            extra: Map::new(),
        }
    }

    fn memory_store() -> (Arc<MemoryBackend>, PostStore) {
        let backend = Arc::new(MemoryBackend::new());
        let store = PostStore::new(backend.clone(), "posts.json");
        (backend, store)
    }

    #[test]
    fn test_next_id_empty() {
        assert_eq!(next_post_id(&[]), 1);
    }

    #[test]
    fn test_next_id_skips_gaps() {
        let posts = vec![post(2, "a"), post(5, "b")];
        assert_eq!(next_post_id(&posts), 6);
    }

    #[test]
    fn test_next_id_out_of_order() {
        let posts = vec![post(9, "a"), post(3, "b")];
        assert_eq!(next_post_id(&posts), 10);
    }

    #[test]
    fn test_validate_reports_all_fields() {
        let errors = validate_new_post(" ", "Nope", "", &["Tech".to_string()]).unwrap_err();
        assert_eq!(
            errors.0,
            vec![
                PostFieldError::MissingTitle,
                PostFieldError::InvalidTopic,
                PostFieldError::MissingContent,
            ]
        );
    }

    #[test]
    fn test_validate_trims_title_and_content_only() {
        let topics = vec![" Tech".to_string()];
        let new_post = validate_new_post("  Hello ", " Tech", "\nWorld\n", &topics).unwrap();

        assert_eq!(new_post.title, "Hello");
        assert_eq!(new_post.topic, " Tech");
        assert_eq!(new_post.content, "World");
    }

    #[test]
    fn test_validate_topic_must_match_exactly() {
        let topics = vec!["Tech".to_string()];
        let errors = validate_new_post("t", "Tech ", "c", &topics).unwrap_err();
        assert_eq!(errors.0, vec![PostFieldError::InvalidTopic]);
    }

    #[test]
    fn test_into_post_formats_timestamp() {
        let created = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(7, 5, 1)
            .unwrap();
        let new_post = NewPost {
            title: "t".into(),
            topic: "Tech".into(),
            content: "c".into(),
        };

        assert_eq!(new_post.into_post(4, created).timestamp, "2024-03-09 07:05:01");
    }

    #[test]
    fn test_find_post() {
        let posts = vec![post(1, "a"), post(2, "b")];
        assert_eq!(find_post(&posts, 2).unwrap().title, "b");
        assert!(find_post(&posts, 3).is_none());
    }

    #[test]
    fn test_recent_posts() {
        let posts: Vec<_> = (1..=5).map(|i| post(i, "p")).collect();
        let ids: Vec<_> = recent_posts(&posts, 3).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 4, 5]);

        assert_eq!(recent_posts(&posts[..2], 3).len(), 2);
        assert!(recent_posts(&posts, 0).is_empty());
    }

    #[test]
    fn test_store_round_trip() {
        let (_, store) = memory_store();
        let posts = vec![post(1, "a"), post(4, "b")];

        store.save_posts(&posts).unwrap();
        assert_eq!(store.get_posts(), posts);
    }

    #[test]
    fn test_backfill_single_legacy_record() {
        let (backend, store) = memory_store();
        backend.insert_raw(
            "posts.json",
            r#"[
                {"id": 1, "title": "a", "topic": "Tech", "content": "x", "timestamp": "2024-01-01 00:00:00"},
                {"title": "b", "topic": "Tech", "content": "y", "timestamp": "2024-01-01 00:00:01"}
            ]"#,
        );

        let ids: Vec<_> = store.get_posts().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_backfill_duplicates_are_preserved() {
        let (backend, store) = memory_store();
        backend.insert_raw(
            "posts.json",
            r#"[
                {"id": 1, "title": "a", "topic": "T", "content": "x", "timestamp": ""},
                {"title": "b", "topic": "T", "content": "y", "timestamp": ""},
                {"id": 2, "title": "c", "topic": "T", "content": "z", "timestamp": ""},
                {"title": "d", "topic": "T", "content": "w", "timestamp": ""},
                {"id": 3, "title": "e", "topic": "T", "content": "v", "timestamp": ""}
            ]"#,
        );

        let posts = store.get_posts();
        let ids: Vec<_> = posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 6, 2, 6, 3]);
        assert_eq!(find_post(&posts, 6).unwrap().title, "b");
    }

    #[test]
    fn test_backfill_is_not_written_back() {
        let (backend, store) = memory_store();
        let raw = r#"[{"title": "a", "topic": "T", "content": "x", "timestamp": ""}]"#;
        backend.insert_raw("posts.json", raw);

        assert_eq!(store.get_posts()[0].id, 2);
        assert_eq!(backend.read("posts.json").unwrap().as_deref(), Some(raw));
    }

    #[test]
    fn test_corrupt_posts_load_empty() {
        let (backend, store) = memory_store();
        backend.insert_raw("posts.json", "not json at all");

        assert!(store.get_posts().is_empty());
        assert!(store.load().outcome.is_recovered());
    }

    #[test]
    fn test_unknown_keys_survive_rewrite() {
        let (backend, store) = memory_store();
        backend.insert_raw(
            "posts.json",
            r#"[{"id": 1, "title": "a", "topic": "T", "content": "x", "timestamp": "", "author": "bob", "tags": ["x"]}]"#,
        );

        let posts = store.get_posts();
        assert_eq!(posts[0].extra["author"], "bob");

        store.save_posts(&posts).unwrap();
        let raw = backend.read("posts.json").unwrap().unwrap();
        let record: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(record[0]["author"], "bob");
        assert_eq!(record[0]["tags"], serde_json::json!(["x"]));
        assert_eq!(record[0]["id"], 1);
    }

    #[test]
    fn test_plain_post_has_no_extra_keys() {
        let raw = serde_json::to_value(post(1, "a")).unwrap();
        let keys: Vec<_> = raw.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 5);
    }
}
