// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub site: SiteConfig,
    pub gateway: GatewayConfig,
    pub completion: CompletionConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
    /// Seconds to wait for in-flight connections on shutdown
    #[serde(default = "default_shutdown_grace")]
    pub shutdown_grace: u64,
}

const fn default_shutdown_grace() -> u64 {
    10
}

/// Site configuration: where static content lives and which origins we trust
#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    /// Primary custom domain, used for CORS origin matching
    #[serde(default)]
    pub domain: String,
    /// Static-hosting domain that non-API requests are forwarded to
    #[serde(default)]
    pub static_domain: String,
    #[serde(default = "default_static_scheme")]
    pub static_scheme: String,
    /// Timeout for each forwarded request, in seconds
    #[serde(default = "default_static_timeout")]
    pub timeout: u64,
    /// Maximum request body relayed to the static host, in bytes
    #[serde(default = "default_forward_body_size")]
    pub max_body_size: u64,
}

#[allow(clippy::missing_const_for_fn)]
fn default_static_scheme() -> String {
    "https".to_string()
}

const fn default_static_timeout() -> u64 {
    30
}

const fn default_forward_body_size() -> u64 {
    10 * 1024 * 1024
}

/// Query gateway configuration
#[derive(Debug, Deserialize, Clone)]
pub struct GatewayConfig {
    /// Path prefix handled by the query gateway (e.g. "/api/")
    pub api_prefix: String,
    /// Maximum accepted request body for gateway requests, in bytes
    pub max_body_size: u64,
    /// Serve the GraphiQL page on a bare GET to the API path
    pub graphiql: bool,
}

/// Upstream chat-completion API configuration
#[derive(Clone, Deserialize)]
pub struct CompletionConfig {
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    pub model: String,
    /// Timeout for each completion call, in seconds
    pub timeout: u64,
}

impl std::fmt::Debug for CompletionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}
