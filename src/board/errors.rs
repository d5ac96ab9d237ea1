//! # Board Errors

use std::fmt;

use thiserror::Error;

use crate::storage::StorageError;

/// Result type for board operations
pub type BoardResult<T> = Result<T, BoardError>;

/// One reason a new post was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostFieldError {
    MissingTitle,
    InvalidTopic,
    MissingContent,
}

impl PostFieldError {
    /// Message shown to the author
    pub fn message(&self) -> &'static str {
        match self {
            PostFieldError::MissingTitle => "Title is required!",
            PostFieldError::InvalidTopic => "Please select a topic!",
            PostFieldError::MissingContent => "Post content cannot be empty!",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PostFieldError::MissingTitle => "missing_title",
            PostFieldError::InvalidTopic => "invalid_topic",
            PostFieldError::MissingContent => "missing_content",
        }
    }
}

/// All reasons a new post was rejected, in field order (title, topic, content)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFieldErrors(pub Vec<PostFieldError>);

impl PostFieldErrors {
    pub fn contains(&self, error: PostFieldError) -> bool {
        self.0.contains(&error)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PostFieldError> {
        self.0.iter()
    }
}

impl fmt::Display for PostFieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.0.iter().map(|e| e.as_str()).collect();
        write!(f, "{}", names.join(", "))
    }
}

/// Board errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("Topic name cannot be empty")]
    EmptyName,

    #[error("Topic already exists: {0}")]
    DuplicateName(String),

    #[error("Invalid post: {0}")]
    InvalidPost(PostFieldErrors),

    #[error("No topics available")]
    NoTopics,

    #[error("Save failed: {0}")]
    SaveFailed(String),

    #[error("Post not found: {0}")]
    NotFound(u64),
}

impl BoardError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            BoardError::EmptyName => 400,
            BoardError::DuplicateName(_) => 409,
            BoardError::InvalidPost(_) => 400,
            BoardError::NoTopics => 409,
            BoardError::SaveFailed(_) => 500,
            BoardError::NotFound(_) => 404,
        }
    }

    /// User-facing messages, one per flash notification
    pub fn flash_messages(&self) -> Vec<&'static str> {
        match self {
            BoardError::EmptyName => vec!["Topic name cannot be empty!"],
            BoardError::DuplicateName(_) => vec!["Topic already exists!"],
            BoardError::InvalidPost(errors) => errors.iter().map(|e| e.message()).collect(),
            BoardError::NoTopics => vec!["No topics available. Please add a topic first."],
            BoardError::SaveFailed(_) => vec!["Error saving. Please try again."],
            BoardError::NotFound(_) => vec!["Post not found."],
        }
    }
}

impl From<StorageError> for BoardError {
    fn from(e: StorageError) -> Self {
        BoardError::SaveFailed(e.to_string())
    }
}
