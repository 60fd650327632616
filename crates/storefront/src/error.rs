use std::path::PathBuf;

use thiserror::Error;

use storefront_core::DomainError;

/// Invalid `STOREFRONT_*` configuration value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: invalid currency code {value:?}")]
    InvalidCurrency { var: &'static str, value: String },

    #[error("{var}: expected a non-negative amount, got {value:?}")]
    InvalidAmount { var: &'static str, value: String },
}

/// Failure while building a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("catalog: {0}")]
    Catalog(#[from] DomainError),

    #[error("failed to read catalog file {path}")]
    CatalogIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
