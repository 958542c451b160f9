//! Server settings.
//!
//! [`ServerSettings`] is the single source of truth for runtime settings.
//! It can be read from a TOML file, then overridden field by field from the
//! command line (see `main.rs`):
//!
//! ```toml
//! bind_address = "127.0.0.1"
//! port = 3000
//! data_file = "/var/lib/portfolio/portfolio-data.json"
//! admin_secret = "change-me"
//! max_body_bytes = 1048576
//! ```
//!
//! Every field has a serde default, so an empty file is a valid settings file.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Secret accepted when none is configured.
///
/// This value has always been shipped in the admin page's client-side code,
/// so anyone who loads that page can read it.  Deployments should configure
/// their own secret; the server logs a warning at startup while this one is
/// in use.
pub const LEGACY_ADMIN_SECRET: &str = "mferreio.qa";

/// Error type for settings operations.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("I/O error reading settings at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse settings TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// `bind_address:port` is not a valid socket address.
    #[error("invalid bind address: '{0}'")]
    InvalidAddress(String),

    /// A configured admin secret is empty.
    #[error("admin secret must not be empty")]
    EmptySecret,
}

/// All runtime settings of the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    /// IP address to bind to.  `"0.0.0.0"` accepts connections on every
    /// interface.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// The JSON file holding the portfolio document.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    /// Shared secret for writes.  `None` falls back to
    /// [`LEGACY_ADMIN_SECRET`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_secret: Option<String>,
    /// Largest request body accepted, in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    3000
}
fn default_data_file() -> PathBuf {
    PathBuf::from("portfolio-data.json")
}
fn default_max_body_bytes() -> usize {
    1024 * 1024
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            data_file: default_data_file(),
            admin_secret: None,
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl ServerSettings {
    /// Reads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Io`] if the file cannot be read (including
    /// when it does not exist) and [`SettingsError::Parse`] if it is not
    /// valid TOML.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// The address to listen on.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidAddress`] if `bind_address` is not an
    /// IP address.
    pub fn socket_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = format!("{}:{}", self.bind_address, self.port);
        raw.parse().map_err(|_| SettingsError::InvalidAddress(raw))
    }

    /// The secret writes are checked against.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::EmptySecret`] when a secret is configured but
    /// empty.
    pub fn admin_secret(&self) -> Result<&str, SettingsError> {
        match self.admin_secret.as_deref() {
            Some("") => Err(SettingsError::EmptySecret),
            Some(secret) => Ok(secret),
            None => Ok(LEGACY_ADMIN_SECRET),
        }
    }

    /// `true` when no secret is configured and the legacy one applies.
    pub fn uses_legacy_secret(&self) -> bool {
        self.admin_secret.is_none()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_default_settings() {
        let s = ServerSettings::default();
        assert_eq!(s.port, 3000);
        assert_eq!(s.bind_address, "0.0.0.0");
        assert_eq!(s.data_file, PathBuf::from("portfolio-data.json"));
        assert_eq!(s.max_body_bytes, 1024 * 1024);
        assert!(s.uses_legacy_secret());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let s: ServerSettings = toml::from_str("").expect("deserialize empty");
        assert_eq!(s, ServerSettings::default());
    }

    #[test]
    fn test_partial_toml_overrides_defaults() {
        // Arrange
        let toml_str = r#"
port = 8080
admin_secret = "s3cret"
"#;

        // Act
        let s: ServerSettings = toml::from_str(toml_str).expect("deserialize partial");

        // Assert
        assert_eq!(s.port, 8080);
        assert_eq!(s.admin_secret().unwrap(), "s3cret");
        assert!(!s.uses_legacy_secret());
        // Unspecified fields keep their defaults
        assert_eq!(s.bind_address, "0.0.0.0");
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        let result: Result<ServerSettings, toml::de::Error> = toml::from_str("port = [");
        assert!(result.is_err());
    }

    #[test]
    fn test_socket_addr_combines_bind_and_port() {
        let s = ServerSettings {
            bind_address: "127.0.0.1".to_string(),
            port: 9000,
            ..ServerSettings::default()
        };
        assert_eq!(s.socket_addr().unwrap().to_string(), "127.0.0.1:9000");
    }

    #[test]
    fn test_socket_addr_rejects_hostname() {
        let s = ServerSettings {
            bind_address: "not.an.ip".to_string(),
            ..ServerSettings::default()
        };
        assert!(matches!(s.socket_addr(), Err(SettingsError::InvalidAddress(_))));
    }

    #[test]
    fn test_admin_secret_falls_back_to_legacy() {
        let s = ServerSettings::default();
        assert_eq!(s.admin_secret().unwrap(), LEGACY_ADMIN_SECRET);
    }

    #[test]
    fn test_empty_admin_secret_is_rejected() {
        let s = ServerSettings {
            admin_secret: Some(String::new()),
            ..ServerSettings::default()
        };
        assert!(matches!(s.admin_secret(), Err(SettingsError::EmptySecret)));
    }

    #[test]
    fn test_load_reads_file_from_disk() {
        // Arrange
        let dir = std::env::temp_dir().join(format!("portfolio_settings_{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("server.toml");
        std::fs::write(&path, "port = 4000\ndata_file = \"data/site.json\"\n").unwrap();

        // Act
        let s = ServerSettings::load(&path).expect("load");

        // Assert
        assert_eq!(s.port, 4000);
        assert_eq!(s.data_file, PathBuf::from("data/site.json"));

        // Cleanup
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let path = PathBuf::from("/nonexistent/path/that/cannot/exist/server.toml");
        assert!(matches!(
            ServerSettings::load(&path),
            Err(SettingsError::Io { .. })
        ));
    }

    #[test]
    fn test_settings_round_trip_through_toml() {
        let s = ServerSettings {
            port: 1234,
            admin_secret: Some("x".to_string()),
            ..ServerSettings::default()
        };
        let text = toml::to_string_pretty(&s).expect("serialize");
        let restored: ServerSettings = toml::from_str(&text).expect("deserialize");
        assert_eq!(s, restored);
    }
}
