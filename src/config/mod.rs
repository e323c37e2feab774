// Configuration module entry point
// Loads layered configuration and builds the shared application state

mod state;
mod types;

use std::net::SocketAddr;

use crate::error::SiteError;

// Re-export public types
pub use state::AppState;
pub use types::{
    AssetsConfig, Config, HealthConfig, HttpConfig, LoggingConfig, PerformanceConfig,
    ServerConfig,
};

/// Default config file name (extension optional)
pub const DEFAULT_CONFIG_PATH: &str = "config";

/// Environment variable prefix, e.g. `PORTFOLIO_SERVER__PORT=8080`
pub const ENV_PREFIX: &str = "PORTFOLIO";

impl Config {
    /// Load configuration from specified file path (without extension)
    ///
    /// Sources in increasing priority: built-in defaults, the file (optional),
    /// `PORTFOLIO_`-prefixed environment variables.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("server.debug", false)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.show_headers", false)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("performance.shutdown_timeout", 10)?
            .set_default("http.server_name", "portfolio-site")?
            .set_default("http.enable_cors", false)?
            .set_default("http.max_body_size", 65_536)? // 64KB
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, SiteError> {
        let host = &self.server.host;
        let port = self.server.port;
        // IPv6 literals need brackets to parse as a socket address
        let addr = if host.contains(':') && !host.starts_with('[') {
            format!("[{host}]:{port}")
        } else {
            format!("{host}:{port}")
        };
        addr.parse().map_err(|e| SiteError::InvalidAddress {
            message: format!("{addr}: {e}"),
        })
    }
}
