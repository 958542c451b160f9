//! The admin editor's working copy.
//!
//! An [`EditorDraft`] holds two documents: the last version known to be on
//! the server and the draft being edited.  Edits only touch the draft.
//! Nothing becomes durable until the caller sends [`EditorDraft::to_document`]
//! to the server and then calls [`EditorDraft::mark_saved`].
//!
//! The draft is kept as the raw JSON document, not as a [`PortfolioConfig`].
//! Every edit changes exactly the addressed leaf; keys the schema does not
//! know, and fields the document never had, go back to the server as they
//! came.  [`EditorDraft::config`] gives the typed view when one is needed.

use serde_json::Value;

use super::collections::{append_placeholder, remove_from_document, Collection};
use super::field::{ConfigEdit, EditError};
use crate::domain::schema::PortfolioConfig;

#[derive(Debug, Clone)]
pub struct EditorDraft {
    saved: Value,
    draft: Value,
}

impl EditorDraft {
    /// Starts editing `document` as fetched from the server, treating it as
    /// the saved version.
    pub fn new(document: Value) -> Self {
        Self {
            saved: document.clone(),
            draft: document,
        }
    }

    /// Starts editing a typed config.
    ///
    /// # Errors
    ///
    /// Propagates `serde_json` serialization errors.
    pub fn from_config(config: &PortfolioConfig) -> Result<Self, serde_json::Error> {
        Ok(Self::new(config.to_document()?))
    }

    /// The draft document.
    pub fn current(&self) -> &Value {
        &self.draft
    }

    /// The last saved document.
    pub fn saved(&self) -> &Value {
        &self.saved
    }

    /// The draft decoded into the schema.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when a present field has the wrong type.
    pub fn config(&self) -> Result<PortfolioConfig, serde_json::Error> {
        PortfolioConfig::from_document(&self.draft)
    }

    /// `true` when the draft differs from the saved version.
    pub fn is_dirty(&self) -> bool {
        self.draft != self.saved
    }

    /// Applies a typed edit.  On error the draft is left as it was.
    ///
    /// # Errors
    ///
    /// See [`ConfigEdit::apply_to_document`].
    pub fn apply(&mut self, edit: &ConfigEdit) -> Result<(), EditError> {
        self.draft = edit.apply_to_document(&self.draft)?;
        Ok(())
    }

    /// Sets the leaf named by a path expression, e.g.
    /// `draft.set("experience[0].title", &json!("Lead"))`.
    ///
    /// # Errors
    ///
    /// See [`ConfigEdit::parse`] and [`ConfigEdit::apply_to_document`].
    pub fn set(&mut self, expression: &str, value: &Value) -> Result<(), EditError> {
        let edit = ConfigEdit::parse(expression, value)?;
        self.apply(&edit)
    }

    /// Appends a placeholder to `collection`, returning its index.
    ///
    /// # Errors
    ///
    /// See [`append_placeholder`].
    pub fn add(&mut self, collection: Collection) -> Result<usize, EditError> {
        let (updated, index) = append_placeholder(&self.draft, collection)?;
        self.draft = updated;
        Ok(index)
    }

    /// Removes an item by position.
    ///
    /// # Errors
    ///
    /// See [`remove_from_document`].
    pub fn remove(&mut self, collection: Collection, index: usize) -> Result<(), EditError> {
        self.draft = remove_from_document(&self.draft, collection, index)?;
        Ok(())
    }

    /// Throws away every unsaved change.
    pub fn discard(&mut self) {
        self.draft = self.saved.clone();
    }

    /// The full document to send on save.
    pub fn to_document(&self) -> Value {
        self.draft.clone()
    }

    /// Records that the current draft has been persisted.
    pub fn mark_saved(&mut self) {
        self.saved = self.draft.clone();
    }
}
