pub mod app_config;
pub mod config;
pub mod fallback;
pub mod products;

pub use app_config::{StoreConfig, DEFAULT_PLACEHOLDER_IMAGE};
pub use config::{load_store_config, load_store_config_from_env};
pub use fallback::{bundled_catalog, load_fallback_catalog};
pub use products::{Product, ProductType, MAX_UNIT_PRICE};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read fallback catalog {path}: {source}")]
    FallbackIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse fallback catalog {path}: {source}")]
    FallbackParse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid fallback catalog entry {index}: {reason}")]
    InvalidFallbackEntry { index: usize, reason: String },
}
