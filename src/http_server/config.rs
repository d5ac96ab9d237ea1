//! HTTP Server Configuration
//!
//! Bind address and CORS settings for the board server.

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Host to bind to (default: "127.0.0.1")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 5000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins for the JSON API; empty means any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl HttpServerConfig {
    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// `cors_origins` as header values. Each entry must be an http(s)
    /// origin made of visible ASCII.
    pub fn parsed_cors_origins(&self) -> Result<Vec<HeaderValue>, String> {
        self.cors_origins
            .iter()
            .map(|origin| {
                if !(origin.starts_with("http://") || origin.starts_with("https://")) {
                    return Err(format!("CORS origin '{}' must start with http:// or https://", origin));
                }
                origin
                    .parse::<HeaderValue>()
                    .map_err(|_| format!("CORS origin '{}' is not a valid header value", origin))
            })
            .collect()
    }
}
