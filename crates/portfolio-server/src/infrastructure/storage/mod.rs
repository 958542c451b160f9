//! Persistence of the portfolio document.
//!
//! The application layer only talks to the [`ConfigStore`] trait.  Two
//! implementations are provided:
//!
//! - [`FileConfigStore`] – one JSON file on disk, replaced atomically on save.
//! - [`InMemoryConfigStore`] – a document held in memory, for tests and for
//!   running the server without touching the disk.
//!
//! Stores work on raw [`serde_json::Value`] documents rather than on
//! [`portfolio_core::PortfolioConfig`]: whatever valid JSON object the admin
//! panel posts is stored and served back exactly, including fields the
//! current schema does not know about.

use std::path::PathBuf;

use async_trait::async_trait;
use portfolio_core::embedded_portfolio;
use serde_json::Value;
use thiserror::Error;

pub mod file_store;
pub mod memory_store;

pub use file_store::FileConfigStore;
pub use memory_store::InMemoryConfigStore;

/// Error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file does not contain valid JSON.
    #[error("{} does not contain valid JSON: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The document could not be encoded.
    #[error("failed to encode portfolio document: {0}")]
    Encode(#[source] serde_json::Error),

    /// The document could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Loads and saves the single portfolio document.
///
/// `load` never fails just because nothing has been saved yet: it returns
/// the embedded default document instead (see [`default_document`]).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Returns the stored document, or the default one if nothing is stored.
    async fn load(&self) -> Result<Value, StoreError>;

    /// Replaces the stored document.  A failed save leaves the previous
    /// document in place.
    async fn save(&self, document: &Value) -> Result<(), StoreError>;
}

/// The embedded default portfolio as a JSON document.
///
/// # Errors
///
/// Returns [`StoreError::Encode`] if serialization fails.
pub fn default_document() -> Result<Value, StoreError> {
    embedded_portfolio().to_document().map_err(StoreError::Encode)
}
