//! # portfolio-core
//!
//! Shared library for the portfolio site containing the content schema, the
//! embedded default portfolio, and the editing operations the admin panel
//! performs on it.
//!
//! This crate has zero dependencies on sockets, files, or async runtimes.
//!
//! # Architecture overview
//!
//! The whole site is driven by one JSON document, the [`PortfolioConfig`].
//! The public page renders it; the admin panel edits a working copy of it and
//! sends the full document back to the server on save.
//!
//! - **`domain`** – The schema types, the embedded default content, and small
//!   pure helpers the presentation layer relies on (icon fallback, labels,
//!   progress clamping).
//!
//! - **`edit`** – Everything that changes a portfolio: path expressions such as
//!   `experience[2].title`, the typed [`ConfigEdit`] they map onto, list
//!   add/remove operations, and the [`EditorDraft`] working copy.

pub mod domain;
pub mod edit;

// Re-export the most-used types at the crate root so callers can write
// `portfolio_core::PortfolioConfig` instead of the full module path.
pub use domain::defaults::embedded_portfolio;
pub use domain::schema::{
    Certification, CodeExample, ExperienceEntry, Learning, Metric, PersonalInfo, PortfolioConfig,
    ProjectInfo, Qualification, QualificationType, TechItem,
};
pub use domain::view::TechIcon;
pub use edit::collections::{append_placeholder, remove_from_document, Collection};
pub use edit::draft::EditorDraft;
pub use edit::field::{parse_feature_list, ConfigEdit, ConfigField, EditError, FieldValue, ValueKind};
pub use edit::path::{update_document, FieldPath, PathError, PathSegment};
