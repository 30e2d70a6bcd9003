//! # Catalog Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Catalog Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │     Load        │  │    Content      │  │    Configuration        │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Unavailable    │  │  Malformed      │  │  InvalidConfig          │ │
//! │  │  Timeout        │  │  InvalidCatalog │  │  ConfigLoadFailed       │ │
//! │  │  Cancelled      │  │                 │  │  ConfigSaveFailed       │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use shop_core::CoreError;
use thiserror::Error;

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog error type covering every way a load can go wrong.
///
/// `Clone` so one failed fetch can be reported to every caller waiting on it.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    // =========================================================================
    // Load Errors
    // =========================================================================
    /// The backing source could not produce items.
    #[error("Catalog source unavailable: {0}")]
    SourceUnavailable(String),

    /// The source did not answer in time.
    #[error("Catalog load timed out after {0} ms")]
    Timeout(u64),

    /// The load was cancelled before it resolved.
    #[error("Catalog load cancelled")]
    Cancelled,

    // =========================================================================
    // Content Errors
    // =========================================================================
    /// The source answered with something that is not a list of items.
    #[error("Malformed catalog: {0}")]
    Malformed(String),

    /// The items failed domain validation (bad price, duplicate name...).
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(#[from] CoreError),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid catalog configuration.
    #[error("Invalid catalog configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Malformed(err.to_string())
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for CatalogError {
    fn from(err: toml::de::Error) -> Self {
        CatalogError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for CatalogError {
    fn from(err: toml::ser::Error) -> Self {
        CatalogError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl CatalogError {
    /// Returns true if calling `load()` again may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CatalogError::SourceUnavailable(_) | CatalogError::Timeout(_) | CatalogError::Cancelled
        )
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            CatalogError::InvalidConfig(_)
                | CatalogError::ConfigLoadFailed(_)
                | CatalogError::ConfigSaveFailed(_)
        )
    }
}
