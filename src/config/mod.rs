// Configuration module entry point
// Loads layered configuration and holds the shared runtime state

mod state;
mod types;

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, File};
use std::net::SocketAddr;
use std::time::Duration;

// Re-export public types
pub use state::AppState;
pub use types::{CompletionConfig, Config, SiteConfig};

/// Plain environment variables accepted for backward compatibility, with the keys they override
const LEGACY_ENV_KEYS: [(&str, &str); 3] = [
    ("DEEPSEEK_API_KEY", "completion.api_key"),
    ("PAGES_DOMAIN", "site.static_domain"),
    ("DOMAIN", "site.domain"),
];

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Default config file is "config.toml" when no path specified
    pub fn load_from(config_path: &str) -> Result<Self, ConfigError> {
        let mut builder = with_defaults(config::Config::builder())?
            .add_source(File::with_name(config_path).required(false))
            .add_source(
                Environment::with_prefix("EDGE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        for (var, key) in LEGACY_ENV_KEYS {
            builder = builder.set_override_option(key, std::env::var(var).ok())?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Upper bound for the lifetime of one client connection
    pub fn connection_timeout(&self) -> Duration {
        Duration::from_secs(std::cmp::max(
            self.performance.read_timeout,
            self.performance.write_timeout,
        ))
    }
}

fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    builder
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8080)?
        .set_default("logging.level", "info")?
        .set_default("logging.access_log", true)?
        .set_default("logging.access_log_format", "combined")?
        .set_default("performance.keep_alive_timeout", 75)?
        .set_default("performance.read_timeout", 120)?
        .set_default("performance.write_timeout", 120)?
        .set_default("performance.shutdown_grace", 10)?
        .set_default("site.domain", "")?
        .set_default("site.static_domain", "")?
        .set_default("site.static_scheme", "https")?
        .set_default("site.timeout", 30)?
        .set_default("site.max_body_size", 10_485_760)? // 10MB
        .set_default("gateway.api_prefix", "/api/")?
        .set_default("gateway.max_body_size", 1_048_576)? // 1MB
        .set_default("gateway.graphiql", true)?
        .set_default(
            "completion.endpoint",
            "https://api.deepseek.com/v1/chat/completions",
        )?
        .set_default("completion.api_key", "")?
        .set_default("completion.model", "deepseek-chat")?
        .set_default("completion.timeout", 60)
}
