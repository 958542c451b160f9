//! Infrastructure layer for portfolio-server.
//!
//! The infrastructure layer handles the runtime I/O: accepting HTTP
//! connections and reading and writing the portfolio document.
//!
//! # Responsibilities
//!
//! - Binding a TCP listener and serving HTTP/1.1 on it
//! - Enforcing the request body size limit
//! - Persisting the document as JSON on disk
//!
//! # What does NOT belong here?
//!
//! - Authentication and status-code decisions (that is the application layer)
//! - Request and response shapes (that is the domain layer)
//! - Settings parsing (that is `domain::settings`)

pub mod http_server;
pub mod storage;

pub use http_server::HttpServer;
pub use storage::{ConfigStore, FileConfigStore, InMemoryConfigStore, StoreError};
