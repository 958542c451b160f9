//! Application layer for portfolio-server.
//!
//! Contains the endpoint logic: routing a request, checking the shared
//! secret on writes, validating bodies, and mapping every outcome to a
//! status code.  Persistence happens behind the
//! [`ConfigStore`](crate::infrastructure::storage::ConfigStore) trait, so this
//! layer runs unchanged against a file, an in-memory store, or a mock.

pub mod auth;
pub mod config_service;

pub use auth::secret_matches;
pub use config_service::{ConfigService, ServiceError};
