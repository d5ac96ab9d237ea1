//! Observable board events
//!
//! Every log line the board emits is named by one of these events.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Process startup begins
    Startup,
    /// Configuration resolved
    ConfigLoaded,
    /// HTTP server bound and accepting requests
    Serving,
    /// Server stopped
    Shutdown,
    /// Configured CORS origins could not be used
    CorsOriginsInvalid,

    // Storage
    /// Collection has no durable content yet
    CollectionMissing,
    /// Collection content was unreadable or undecodable; an empty collection was used
    CollectionRecovered,
    /// Collection written
    CollectionSaved,
    /// Collection write failed
    CollectionSaveFailed,

    // Board
    /// Legacy post without an id was assigned one on load
    PostIdBackfilled,
    /// Topic appended
    TopicAdded,
    /// Topic creation rejected
    TopicRejected,
    /// Post appended
    PostCreated,
    /// Post creation rejected
    PostRejected,
    /// Post lookup found nothing
    PostNotFound,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::Startup => "BOARD_STARTUP",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::Serving => "SERVING",
            Event::Shutdown => "SHUTDOWN",
            Event::CorsOriginsInvalid => "CORS_ORIGINS_INVALID",

            Event::CollectionMissing => "COLLECTION_MISSING",
            Event::CollectionRecovered => "COLLECTION_RECOVERED",
            Event::CollectionSaved => "COLLECTION_SAVED",
            Event::CollectionSaveFailed => "COLLECTION_SAVE_FAILED",

            Event::PostIdBackfilled => "POST_ID_BACKFILLED",
            Event::TopicAdded => "TOPIC_ADDED",
            Event::TopicRejected => "TOPIC_REJECTED",
            Event::PostCreated => "POST_CREATED",
            Event::PostRejected => "POST_REJECTED",
            Event::PostNotFound => "POST_NOT_FOUND",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
