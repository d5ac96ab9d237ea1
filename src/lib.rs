//! topicboard - A minimal topic-organized posting board
//!
//! Topics and posts live in two flat JSON collections. The web layer,
//! CLI and logger are thin shells around the `board` and `storage` modules.

pub mod board;
pub mod cli;
pub mod config;
pub mod http_server;
pub mod observability;
pub mod storage;
