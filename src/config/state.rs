// Application state module
// Immutable handle built once at startup and shared by every request

use super::types::Config;

/// Application state
///
/// Holds the loaded configuration plus values resolved from it once, so the
/// request path never re-derives them. Never mutated after construction.
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    /// `Cache-Control` value for static assets
    pub asset_cache_control: String,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let asset_cache_control =
            crate::http::cache::CachePolicy::for_assets(config.assets.max_age).to_header_value();

        Self {
            config: config.clone(),
            asset_cache_control,
        }
    }

    pub const fn debug(&self) -> bool {
        self.config.server.debug
    }

    pub const fn access_log(&self) -> bool {
        self.config.logging.access_log
    }
}
