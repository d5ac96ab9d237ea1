//! # Board
//!
//! The operations the web layer and CLI call. Every read reloads from the
//! backend; every write is a full load, mutate, save cycle run under a
//! per-store lock so two requests in one process cannot lose each
//! other's update.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{Local, NaiveDateTime};

use super::errors::{BoardError, BoardResult};
use super::post::{find_post, next_post_id, recent_posts, validate_new_post, Post, PostStore};
use super::topic::{validate_new_topic, TopicStore};
use crate::config::Config;
use crate::observability::{log_event_with_fields, Event, Severity};
use crate::storage::{CollectionBackend, FileBackend, MemoryBackend};

#[derive(Debug)]
pub struct Board {
    topics: TopicStore,
    posts: PostStore,
    topics_lock: Mutex<()>,
    posts_lock: Mutex<()>,
}

impl Board {
    /// Board over an arbitrary backend
    pub fn new(
        backend: Arc<dyn CollectionBackend>,
        topics_name: impl Into<String>,
        posts_name: impl Into<String>,
    ) -> Self {
        Self {
            topics: TopicStore::new(backend.clone(), topics_name),
            posts: PostStore::new(backend, posts_name),
            topics_lock: Mutex::new(()),
            posts_lock: Mutex::new(()),
        }
    }

    /// File-backed board described by `config`
    pub fn open(config: &Config) -> Self {
        let backend = Arc::new(FileBackend::new(&config.data_dir));
        Self::new(backend, config.topics_file.clone(), config.posts_file.clone())
    }

    /// Memory-backed board with default collection names
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()), "topics.json", "posts.json")
    }

    pub fn topic_store(&self) -> &TopicStore {
        &self.topics
    }

    pub fn post_store(&self) -> &PostStore {
        &self.posts
    }

    /// All topics, oldest first
    pub fn list_topics(&self) -> Vec<String> {
        self.topics.get_topics()
    }

    /// Append a topic and return the updated list
    pub fn add_topic(&self, name: &str) -> BoardResult<Vec<String>> {
        let _guard = lock(&self.topics_lock);

        let mut topics = self.topics.get_topics();
        let name = validate_new_topic(name, &topics).map_err(|e| {
            let reason = e.to_string();
            log_event_with_fields(Severity::Info, Event::TopicRejected, &[("reason", &reason)]);
            e
        })?;

        topics.push(name.clone());
        self.topics.save_topics(&topics)?;

        log_event_with_fields(Severity::Info, Event::TopicAdded, &[("topic", &name)]);
        Ok(topics)
    }

    /// All posts in creation order
    pub fn list_posts(&self) -> Vec<Post> {
        self.posts.get_posts()
    }

    /// The last `n` posts in creation order
    pub fn list_recent_posts(&self, n: usize) -> Vec<Post> {
        let posts = self.posts.get_posts();
        recent_posts(&posts, n).to_vec()
    }

    /// Create a post stamped with the current local time
    pub fn create_post(&self, title: &str, topic: &str, content: &str) -> BoardResult<Post> {
        self.create_post_at(title, topic, content, Local::now().naive_local())
    }

    /// Create a post stamped with `created_at`
    pub fn create_post_at(
        &self,
        title: &str,
        topic: &str,
        content: &str,
        created_at: NaiveDateTime,
    ) -> BoardResult<Post> {
        let known_topics = self.topics.get_topics();
        let new_post = validate_new_post(title, topic, content, &known_topics).map_err(|errors| {
            let reason = errors.to_string();
            log_event_with_fields(Severity::Info, Event::PostRejected, &[("reason", &reason)]);
            BoardError::InvalidPost(errors)
        })?;

        let _guard = lock(&self.posts_lock);

        let mut posts = self.posts.get_posts();
        let post = new_post.into_post(next_post_id(&posts), created_at);
        posts.push(post.clone());
        self.posts.save_posts(&posts)?;

        let id = post.id.to_string();
        log_event_with_fields(
            Severity::Info,
            Event::PostCreated,
            &[("id", &id), ("topic", &post.topic)],
        );
        Ok(post)
    }

    /// Post with the given id
    pub fn get_post(&self, id: u64) -> BoardResult<Post> {
        let posts = self.posts.get_posts();
        match find_post(&posts, id) {
            Some(post) => Ok(post.clone()),
            None => {
                let id_str = id.to_string();
                log_event_with_fields(Severity::Trace, Event::PostNotFound, &[("id", &id_str)]);
                Err(BoardError::NotFound(id))
            }
        }
    }
}

fn lock(mutex: &Mutex<()>) -> MutexGuard<'_, ()> {
    // The guarded data is (), so a poisoned lock carries no broken state
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::PostFieldError;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn stored_post(id: u64) -> Post {
        Post {
            id,
            title: format!("post {}", id),
            topic: "Tech".to_string(),
            content: "body".to_string(),
            timestamp: "2024-01-01 00:00:00".to_string(),
            extra: Default::default(),
        }
    }

    fn board_with_topics(names: &[&str]) -> Board {
        let board = Board::in_memory();
        for name in names {
            board.add_topic(name).unwrap();
        }
        board
    }

    #[test]
    fn test_add_topic_appends_once() {
        let board = board_with_topics(&["Tech"]);
        let topics = board.add_topic("  Music ").unwrap();

        assert_eq!(topics, vec!["Tech", "Music"]);
        assert_eq!(board.list_topics(), vec!["Tech", "Music"]);
    }

    #[test]
    fn test_add_duplicate_topic_leaves_store_unchanged() {
        let board = board_with_topics(&["Tech", "Music"]);

        assert_eq!(
            board.add_topic("Tech "),
            Err(BoardError::DuplicateName("Tech".to_string()))
        );
        assert_eq!(board.list_topics(), vec!["Tech", "Music"]);
    }

    #[test]
    fn test_add_empty_topic() {
        let board = Board::in_memory();
        assert_eq!(board.add_topic("   "), Err(BoardError::EmptyName));
        assert!(board.list_topics().is_empty());
    }

    #[test]
    fn test_first_post_gets_id_one() {
        let board = board_with_topics(&["Tech"]);
        let post = board
            .create_post_at("Hello", "Tech", "World", at(9, 30, 0))
            .unwrap();

        assert_eq!(post.id, 1);
        assert_eq!(post.topic, "Tech");
        assert_eq!(post.timestamp, "2024-05-01 09:30:00");
        assert_eq!(board.list_recent_posts(3), vec![post]);
    }

    #[test]
    fn test_ids_strictly_increase() {
        let board = board_with_topics(&["Tech"]);
        let ids: Vec<_> = (0..4)
            .map(|i| {
                board
                    .create_post(&format!("post {}", i), "Tech", "body")
                    .unwrap()
                    .id
            })
            .collect();

        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_id_after_gaps() {
        let board = board_with_topics(&["Tech"]);
        board
            .post_store()
            .save_posts(&[stored_post(2), stored_post(5)])
            .unwrap();

        let post = board.create_post("next", "Tech", "body").unwrap();
        assert_eq!(post.id, 6);
    }

    #[test]
    fn test_create_post_unknown_topic_does_not_write() {
        let board = board_with_topics(&["Tech"]);
        let result = board.create_post("Hello", "Cooking", "World");

        match result {
            Err(BoardError::InvalidPost(errors)) => {
                assert_eq!(errors.0, vec![PostFieldError::InvalidTopic]);
            }
            other => panic!("expected InvalidPost, got {:?}", other),
        }
        assert!(board.list_posts().is_empty());
    }

    #[test]
    fn test_create_post_without_topics_is_invalid_topic() {
        let board = Board::in_memory();
        match board.create_post("Hello", "Tech", "World") {
            Err(BoardError::InvalidPost(errors)) => {
                assert!(errors.contains(PostFieldError::InvalidTopic));
            }
            other => panic!("expected InvalidPost, got {:?}", other),
        }
    }

    #[test]
    fn test_recent_posts_keeps_last_three() {
        let board = board_with_topics(&["Tech"]);
        for i in 0..5 {
            board.create_post(&format!("p{}", i), "Tech", "body").unwrap();
        }

        let titles: Vec<_> = board
            .list_recent_posts(3)
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["p2", "p3", "p4"]);
    }

    #[test]
    fn test_get_post() {
        let board = board_with_topics(&["Tech"]);
        let created = board.create_post("Hello", "Tech", "World").unwrap();

        assert_eq!(board.get_post(created.id).unwrap(), created);
        assert_eq!(board.get_post(99), Err(BoardError::NotFound(99)));
    }

    #[test]
    fn test_concurrent_creates_keep_unique_ids() {
        let board = Arc::new(board_with_topics(&["Tech"]));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let board = board.clone();
                std::thread::spawn(move || {
                    board
                        .create_post(&format!("p{}", i), "Tech", "body")
                        .unwrap()
                        .id
                })
            })
            .collect();

        let mut ids: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=8).collect::<Vec<_>>());
        assert_eq!(board.list_posts().len(), 8);
    }
}
