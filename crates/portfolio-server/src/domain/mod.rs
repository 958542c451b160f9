//! Domain layer for portfolio-server.
//!
//! Plain data: what the server is configured with, and what a request and
//! a response look like once the HTTP framework has been peeled away.
//! The only I/O here is [`ServerSettings::load`] reading the TOML settings
//! file.

pub mod api;
pub mod settings;

pub use api::{ApiMethod, ApiRequest, ApiResponse, ADMIN_SECRET_HEADER, CONFIG_ROUTE};
pub use settings::{ServerSettings, SettingsError};
