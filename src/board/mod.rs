//! Topics and posts
//!
//! - [`TopicStore`]: ordered, duplicate-free topic names
//! - [`PostStore`]: posts in creation order with store-assigned ids
//! - [`Board`]: the operations exposed to the web layer and CLI

mod errors;
mod post;
mod service;
mod topic;

pub use errors::{BoardError, BoardResult, PostFieldError, PostFieldErrors};
pub use post::{
    find_post, next_post_id, recent_posts, validate_new_post, NewPost, Post, PostStore,
    TIMESTAMP_FORMAT,
};
pub use service::Board;
pub use topic::{validate_new_topic, TopicStore};
