//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults. Missing secrets are not rejected here: an empty
//! MongoDB URI surfaces as a connection failure and an empty API key as a
//! provider authentication error on first use.

use std::env;
use std::fmt;
use std::time::Duration;

use crate::store::connection::mask_uri;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Document store configuration
    pub database: DatabaseConfig,
    /// Completion provider configuration
    pub chat: ChatConfig,
    /// Cross-origin policy
    pub cors: CorsConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

/// Document store configuration
#[derive(Clone)]
pub struct DatabaseConfig {
    /// Connection URI (contains credentials, never logged verbatim)
    pub uri: String,
    /// Database name
    pub database: String,
    /// Collection holding contact submissions
    pub collection: String,
    /// Total number of connection attempts at startup
    pub connect_attempts: u32,
    /// Fixed delay between connection attempts
    pub retry_delay: Duration,
    /// Upper bound on server selection per attempt
    pub server_selection_timeout: Duration,
    /// Upper bound on establishing a socket
    pub connect_timeout: Duration,
    /// Idle time after which pooled connections are closed
    ///
    /// This does not bound an operation in flight; the driver has no
    /// per-operation socket timeout.
    pub pool_idle_timeout: Duration,
}

/// Completion provider configuration
#[derive(Clone)]
pub struct ChatConfig {
    /// Bearer key for the provider
    pub api_key: String,
    /// Base URL of an OpenAI-compatible API
    pub base_url: String,
    /// Model name
    pub model: String,
    /// Overall request timeout
    pub timeout: Duration,
}

/// CORS configuration
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Exact origins allowed to call the API with credentials
    pub allowed_origins: Vec<String>,
    /// Wildcard subdomain patterns such as `https://*.vercel.app`
    pub allowed_patterns: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                port: parse_var("PORT").unwrap_or(5000),
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            },
            database: DatabaseConfig {
                uri: env::var("MONGODB_URI").unwrap_or_default(),
                database: env::var("MONGODB_DATABASE").unwrap_or_else(|_| "portfolio".to_string()),
                collection: env::var("MONGODB_COLLECTION")
                    .unwrap_or_else(|_| "contacts".to_string()),
                connect_attempts: parse_var("DB_CONNECT_RETRIES").unwrap_or(5),
                retry_delay: Duration::from_secs(parse_var("DB_RETRY_DELAY_SECS").unwrap_or(5)),
                ..DatabaseConfig::default()
            },
            chat: ChatConfig {
                api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
                base_url: env::var("OPENAI_BASE_URL")
                    .unwrap_or_else(|_| ChatConfig::default().base_url),
                model: env::var("OPENAI_MODEL").unwrap_or_else(|_| ChatConfig::default().model),
                timeout: Duration::from_secs(parse_var("CHAT_TIMEOUT_SECS").unwrap_or(30)),
            },
            cors: CorsConfig {
                allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .map(|v| split_list(&v))
                    .unwrap_or_else(|_| CorsConfig::default().allowed_origins),
                allowed_patterns: env::var("CORS_ALLOWED_PATTERNS")
                    .map(|v| split_list(&v))
                    .unwrap_or_else(|_| CorsConfig::default().allowed_patterns),
            },
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: String::new(),
            database: "portfolio".to_string(),
            collection: "contacts".to_string(),
            connect_attempts: 5,
            retry_delay: Duration::from_secs(5),
            server_selection_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(5),
            pool_idle_timeout: Duration::from_secs(45),
        }
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("uri", &mask_uri(&self.uri))
            .field("database", &self.database)
            .field("collection", &self.collection)
            .field("connect_attempts", &self.connect_attempts)
            .field("retry_delay", &self.retry_delay)
            .finish_non_exhaustive()
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl fmt::Debug for ChatConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatConfig")
            .field("api_key_set", &!self.api_key.is_empty())
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:5173".to_string(),
            ],
            allowed_patterns: vec!["https://*.vercel.app".to_string()],
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
