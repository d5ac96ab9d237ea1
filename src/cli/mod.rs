//! CLI module for topicboard
//!
//! Provides command-line interface for:
//! - serve: run the web server
//! - topics / add-topic: read and extend the topic list
//! - posts / show / new-post: read and create posts

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{resolve_config, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_response, write_response_to};
