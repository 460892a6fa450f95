//! Static settings for the review widget and environment-driven server settings.

/// Key under which the local page variant keeps its submitted reviews.
pub const LOCAL_STORAGE_KEY: &str = "studio-reviews.submitted";

/// Query parameter that clears locally persisted submissions.
pub const RESET_QUERY_PARAM: &str = "reset-reviews";

/// Server endpoint backing the remote review collection.
pub const REVIEWS_API_PATH: &str = "/api/reviews";

/// Avatar lookup service, keyed by the bare social handle.
pub const AVATAR_URL_BASE: &str = "https://unavatar.io/x/";

/// How long the submit button shows a success or error state.
pub const RESET_DELAY_MS: u32 = 3_000;

/// Per-page settings for a review section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSettings {
    pub storage_key: String,
    pub api_path: String,
    pub reset_param: String,
    pub reset_delay_ms: u32,
}

impl Default for ReviewSettings {
    fn default() -> Self {
        Self {
            storage_key: LOCAL_STORAGE_KEY.to_string(),
            api_path: REVIEWS_API_PATH.to_string(),
            reset_param: RESET_QUERY_PARAM.to_string(),
            reset_delay_ms: RESET_DELAY_MS,
        }
    }
}

#[cfg(feature = "ssr")]
pub use server::ServerConfig;

#[cfg(feature = "ssr")]
mod server {
    use leptos::logging::{log, warn};
    use std::env;

    /// Settings for the server binary. Leptos' own options (site address, site
    /// root) are read separately through `get_configuration`.
    #[derive(Debug, Clone)]
    pub struct ServerConfig {
        pub db_path: String,
    }

    impl ServerConfig {
        pub fn load() -> Self {
            Self {
                db_path: var_or("REVIEWS_DB_PATH", "reviews.db"),
            }
        }
    }

    /// Reads `key`, falling back to `default` when it is unset or blank.
    fn var_or(key: &str, default: &str) -> String {
        match env::var(key) {
            Ok(value) if !value.trim().is_empty() => value,
            Ok(_) => {
                warn!("[CONFIG] {key} is empty, using default: {default}");
                default.to_string()
            }
            Err(_) => {
                log!("[CONFIG] {key} not set, using default: {default}");
                default.to_string()
            }
        }
    }

}
