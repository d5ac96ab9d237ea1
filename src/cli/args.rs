//! CLI argument definitions using clap
//!
//! Commands:
//! - topicboard serve [--port N] [--data-dir D]
//! - topicboard topics | add-topic <NAME>
//! - topicboard posts [--limit N] | show <ID> | new-post --title T --topic T --content C

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// topicboard - A minimal topic-organized posting board
#[derive(Parser, Debug)]
#[command(name = "topicboard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (optional; defaults apply when absent)
    #[arg(long, global = true, default_value = "./topicboard.json")]
    pub config: PathBuf,

    /// Directory holding topics.json and posts.json (overrides config)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the web server
    Serve {
        /// Port to listen on (overrides config)
        #[arg(long)]
        port: Option<u16>,

        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,
    },

    /// List all topics
    Topics,

    /// Add a topic
    AddTopic {
        /// Topic name
        name: String,
    },

    /// List posts, newest last
    Posts {
        /// Only the last N posts
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show one post
    Show {
        /// Post id
        id: u64,
    },

    /// Create a post
    NewPost {
        #[arg(long)]
        title: String,

        #[arg(long)]
        topic: String,

        #[arg(long)]
        content: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
