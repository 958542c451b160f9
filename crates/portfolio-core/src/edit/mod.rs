//! Editing operations on a portfolio.
//!
//! # Sub-modules
//!
//! - **`path`**        – Parses path expressions such as `experience[2].title`
//!   and applies them to an untyped JSON document.
//! - **`field`**       – The typed counterpart: every editable leaf of the
//!   schema as an enum, so an edit that names a field which does not exist
//!   cannot be constructed.
//! - **`collections`** – Append/remove operations on the list sections.
//! - **`draft`**       – The admin editor's working copy.
//!
//! # Failure policy
//!
//! An edit that addresses something that is not there is an error, never a
//! silent no-op.  Intermediate fields must exist, array indices must be in
//! range, and only the final field of an object may be created.

pub mod collections;
pub mod draft;
pub mod field;
pub mod path;
