//! portfolio-server library crate.
//!
//! This crate serves the portfolio document over HTTP and persists the
//! operator's edits to a single JSON file.
//!
//! # Architecture (clean architecture)
//!
//! ```text
//! Public page / admin panel (JSON over HTTP)
//!         ↕
//! [portfolio-server]
//!   ├── domain/           Pure types: ServerSettings, API request/response
//!   ├── application/      Routing, shared-secret check, error → status mapping
//!   └── infrastructure/
//!         ├── http_server/ hyper accept loop
//!         └── storage/     ConfigStore trait, JSON file and in-memory stores
//! ```
//!
//! # Layer rules
//!
//! - `domain` has no async; its only I/O is reading the settings file in
//!   [`ServerSettings::load`](domain::ServerSettings::load).
//! - `application` depends on `domain`, `portfolio-core`, and the
//!   [`ConfigStore`](infrastructure::storage::ConfigStore) trait only, so it
//!   can be exercised with an in-memory or mocked store.
//! - `infrastructure` owns sockets and the document file.

/// Domain layer: settings and framework-free API types.
pub mod domain;

/// Application layer: the HTTP endpoint logic.
pub mod application;

/// Infrastructure layer: HTTP server and persistence.
pub mod infrastructure;
