//! Domain entities for the portfolio site.
//!
//! Pure data and pure functions only: no file system, no network, no async.
//!
//! # Sub-modules
//!
//! - **`schema`**   – The [`PortfolioConfig`](schema::PortfolioConfig)
//!   aggregate and every section record it contains.
//! - **`defaults`** – The content shipped inside the binary, used whenever no
//!   persisted document exists yet.
//! - **`view`**     – Helpers that turn raw stored values into what the page
//!   displays (icon fallback, qualification labels, progress clamping).

pub mod defaults;
pub mod schema;
pub mod view;
