//! Environment-supplied configuration.
//!
//! Every value comes from an environment variable with a built-in default.
//! Credentials are deliberately NOT validated at startup: a missing API key
//! surfaces as a runtime failure on the first call that needs it.

use tracing::warn;

/// Default HTTP listen port.
const DEFAULT_PORT: u16 = 5000;

/// Top-level configuration, one section per external concern.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub gemini: GeminiConfig,
    pub pinecone: PineconeConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            gemini: GeminiConfig::default(),
            pinecone: PineconeConfig::default(),
        }
    }
}

impl AppConfig {
    /// Build the configuration from the process environment.
    ///
    /// Never fails: unset variables fall back to defaults and malformed
    /// values are logged and replaced with defaults.
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                port: parse_port(std::env::var("PORT").ok()),
                allowed_origins: parse_origins(std::env::var("ALLOWED_ORIGINS").ok()),
            },
            gemini: GeminiConfig {
                api_key: std::env::var("GEMINI_API_KEY").unwrap_or_default(),
                chat_model: std::env::var("GEMINI_CHAT_MODEL")
                    .unwrap_or_else(|_| GeminiConfig::default().chat_model),
                embedding_model: std::env::var("GEMINI_EMBEDDING_MODEL")
                    .unwrap_or_else(|_| GeminiConfig::default().embedding_model),
                endpoint: std::env::var("GEMINI_API_ENDPOINT")
                    .unwrap_or_else(|_| GeminiConfig::default().endpoint),
            },
            pinecone: PineconeConfig {
                api_key: std::env::var("PINECONE_API_KEY").unwrap_or_default(),
                index_host: std::env::var("PINECONE_INDEX_HOST").unwrap_or_default(),
            },
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen port (`PORT`).
    pub port: u16,
    /// CORS origin allow-list (`ALLOWED_ORIGINS`, comma-separated).
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

/// Gemini API settings for completion and embedding calls.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key (`GEMINI_API_KEY`). May be empty; fails on first use.
    pub api_key: String,
    /// Model used for query rewriting and answer generation.
    pub chat_model: String,
    /// Model used for query embedding.
    pub embedding_model: String,
    /// API base URL.
    pub endpoint: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            chat_model: "gemini-2.0-flash".to_string(),
            embedding_model: "text-embedding-004".to_string(),
            endpoint: "https://generativelanguage.googleapis.com".to_string(),
        }
    }
}

/// Pinecone index settings.
#[derive(Debug, Clone, Default)]
pub struct PineconeConfig {
    /// API key (`PINECONE_API_KEY`). May be empty; fails on first use.
    pub api_key: String,
    /// Data-plane host of the index (`PINECONE_INDEX_HOST`),
    /// e.g. `https://my-index-abc123.svc.us-east-1.pinecone.io`.
    pub index_host: String,
}

/// Parse a port value, falling back to the default on absence or garbage.
fn parse_port(raw: Option<String>) -> u16 {
    match raw {
        Some(s) => match s.parse::<u16>() {
            Ok(p) => p,
            Err(_) => {
                warn!(value = %s, "Invalid PORT value, using default {}", DEFAULT_PORT);
                DEFAULT_PORT
            }
        },
        None => DEFAULT_PORT,
    }
}

/// Parse a comma-separated origin list, falling back to the defaults.
fn parse_origins(raw: Option<String>) -> Vec<String> {
    match raw {
        Some(s) => {
            let origins: Vec<String> = s
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
            if origins.is_empty() {
                ServerConfig::default().allowed_origins
            } else {
                origins
            }
        }
        None => ServerConfig::default().allowed_origins,
    }
}
