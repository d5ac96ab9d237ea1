//! # Board HTTP Server
//!
//! # Endpoints
//!
//! - `/` - Home page: recent posts and topics
//! - `/add_topic`, `/add_post` - Forms
//! - `/post/:id` - Single post
//! - `/api/*` - JSON API
//! - `/health` - Health check

pub mod api_routes;
pub mod board_routes;
pub mod config;
pub mod flash;
pub mod observability_routes;
pub mod server;
pub mod views;

pub use board_routes::BoardState;
pub use config::HttpServerConfig;
pub use server::{build_router, HttpServer};
