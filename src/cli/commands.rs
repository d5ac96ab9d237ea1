//! CLI command implementations
//!
//! Every command resolves configuration the same way: config file (or
//! defaults when absent), then command-line overrides.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::board::Board;
use crate::config::Config;
use crate::http_server::{BoardState, HttpServer};
use crate::observability::{log_event_with_fields, Event, Logger, Severity};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let config = resolve_config(&cli.config, cli.data_dir.as_deref())?;
    run_command(cli.command, config)
}

/// Load the config file and apply `--data-dir`
pub fn resolve_config(config_path: &Path, data_dir: Option<&Path>) -> CliResult<Config> {
    let mut config = Config::load(config_path)?;

    if let Some(dir) = data_dir {
        config.data_dir = PathBuf::from(dir);
    }

    Logger::set_min_severity(config.severity()?);

    let data_dir = config.data_dir.display().to_string();
    log_event_with_fields(Severity::Trace, Event::ConfigLoaded, &[("data_dir", &data_dir)]);

    Ok(config)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command, config: Config) -> CliResult<()> {
    match cmd {
        Command::Serve { port, host } => serve(config, port, host),
        Command::Topics => {
            let board = Board::open(&config);
            write_response(&board.list_topics())
        }
        Command::AddTopic { name } => {
            let board = Board::open(&config);
            write_response(&board.add_topic(&name)?)
        }
        Command::Posts { limit } => {
            let board = Board::open(&config);
            let posts = match limit {
                Some(n) => board.list_recent_posts(n),
                None => board.list_posts(),
            };
            write_response(&posts)
        }
        Command::Show { id } => {
            let board = Board::open(&config);
            write_response(&board.get_post(id)?)
        }
        Command::NewPost {
            title,
            topic,
            content,
        } => {
            let board = Board::open(&config);
            write_response(&board.create_post(&title, &topic, &content)?)
        }
    }
}

/// Start the HTTP server
///
/// Builds a file-backed board from `config` and serves it on a tokio
/// runtime until Ctrl-C.
pub fn serve(mut config: Config, port: Option<u16>, host: Option<String>) -> CliResult<()> {
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(host) = host {
        config.server.host = host;
    }

    let topics_path = config.topics_path().display().to_string();
    let posts_path = config.posts_path().display().to_string();
    log_event_with_fields(
        Severity::Info,
        Event::Startup,
        &[("topics", &topics_path), ("posts", &posts_path)],
    );

    let state = Arc::new(BoardState::new(Board::open(&config), config.recent_posts));
    let server = HttpServer::new(config.server.clone(), state);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_config_applies_data_dir() {
        let temp = TempDir::new().unwrap();
        let config = resolve_config(&temp.path().join("absent.json"), Some(temp.path())).unwrap();

        assert_eq!(config.data_dir, temp.path());
        assert_eq!(config.topics_path(), temp.path().join("topics.json"));
    }

    #[test]
    fn test_commands_share_files() {
        let temp = TempDir::new().unwrap();
        let config = Config::with_data_dir(temp.path());

        run_command(Command::AddTopic { name: "Tech".into() }, config.clone()).unwrap();
        run_command(
            Command::NewPost {
                title: "Hello".into(),
                topic: "Tech".into(),
                content: "World".into(),
            },
            config.clone(),
        )
        .unwrap();

        let board = Board::open(&config);
        assert_eq!(board.get_post(1).unwrap().title, "Hello");
    }

    #[test]
    fn test_show_missing_post_fails() {
        let temp = TempDir::new().unwrap();
        let config = Config::with_data_dir(temp.path());

        let err = run_command(Command::Show { id: 5 }, config).unwrap_err();
        assert!(err.message().contains("not found"));
    }
}
