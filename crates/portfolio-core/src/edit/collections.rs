//! Append and remove operations for the list sections.
//!
//! New items start as the same placeholders the admin panel shows, ready to
//! be overwritten field by field.  Removal is positional: every item after
//! the removed one moves down by one index.
//!
//! Both operations exist twice: as methods on the typed [`PortfolioConfig`],
//! and as [`append_placeholder`] / [`remove_from_document`] on an untyped
//! document, which keep every key the schema does not know about.

use std::fmt;

use serde_json::Value;

use super::field::EditError;
use super::path::PathError;
use crate::domain::schema::{
    Certification, ExperienceEntry, Metric, PortfolioConfig, Qualification, QualificationType,
    TechItem,
};

/// A list section of the portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    TechStack,
    Experience,
    Certifications,
    Qualifications,
    Metrics,
}

impl Collection {
    /// The JSON key of the section.
    pub fn key(self) -> &'static str {
        match self {
            Collection::TechStack => "techStack",
            Collection::Experience => "experience",
            Collection::Certifications => "certifications",
            Collection::Qualifications => "qualifications",
            Collection::Metrics => "metrics",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

fn placeholder_experience() -> ExperienceEntry {
    ExperienceEntry {
        year: "20XX - 20XX".into(),
        title: "Novo Cargo".into(),
        company: "Empresa".into(),
        description: "Descrição do cargo...".into(),
        is_active: false,
    }
}

fn placeholder_tech() -> TechItem {
    TechItem {
        name: "Nova Tech".into(),
        icon: "Code2".into(),
    }
}

fn placeholder_metric() -> Metric {
    Metric {
        value: "0+".into(),
        label: "Nova Métrica".into(),
    }
}

fn placeholder_certification() -> Certification {
    Certification {
        name: "Nova Certificação".into(),
        issuer: "Emissor".into(),
        year: "2024".into(),
        credential_url: Some(String::new()),
    }
}

fn placeholder_qualification() -> Qualification {
    Qualification {
        title: "Nova Qualificação".into(),
        institution: "Instituição".into(),
        year: "2024".into(),
        kind: QualificationType::Course,
    }
}

impl PortfolioConfig {
    /// Number of items currently in `collection`.
    pub fn len_of(&self, collection: Collection) -> usize {
        match collection {
            Collection::TechStack => self.tech_stack.len(),
            Collection::Experience => self.experience.len(),
            Collection::Certifications => self.certifications.len(),
            Collection::Qualifications => self.qualifications.len(),
            Collection::Metrics => self.metrics.len(),
        }
    }

    /// Appends a placeholder item to `collection` and returns its index.
    pub fn push_placeholder(&mut self, collection: Collection) -> usize {
        match collection {
            Collection::TechStack => self.tech_stack.push(placeholder_tech()),
            Collection::Experience => self.experience.push(placeholder_experience()),
            Collection::Certifications => self.certifications.push(placeholder_certification()),
            Collection::Qualifications => self.qualifications.push(placeholder_qualification()),
            Collection::Metrics => self.metrics.push(placeholder_metric()),
        }
        self.len_of(collection) - 1
    }

    /// Removes the item at `index` from `collection`.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::IndexOutOfRange`] when `index` is past the end.
    pub fn remove_item(&mut self, collection: Collection, index: usize) -> Result<(), EditError> {
        let len = self.len_of(collection);
        if index >= len {
            return Err(EditError::IndexOutOfRange {
                field: collection.to_string(),
                index,
                len,
            });
        }
        match collection {
            Collection::TechStack => {
                self.tech_stack.remove(index);
            }
            Collection::Experience => {
                self.experience.remove(index);
            }
            Collection::Certifications => {
                self.certifications.remove(index);
            }
            Collection::Qualifications => {
                self.qualifications.remove(index);
            }
            Collection::Metrics => {
                self.metrics.remove(index);
            }
        }
        Ok(())
    }
}

// ── Untyped documents ─────────────────────────────────────────────────────────

impl Collection {
    fn placeholder_json(self) -> Result<Value, EditError> {
        let encoded = match self {
            Collection::TechStack => serde_json::to_value(placeholder_tech()),
            Collection::Experience => serde_json::to_value(placeholder_experience()),
            Collection::Certifications => serde_json::to_value(placeholder_certification()),
            Collection::Qualifications => serde_json::to_value(placeholder_qualification()),
            Collection::Metrics => serde_json::to_value(placeholder_metric()),
        };
        encoded.map_err(|e| EditError::InvalidValue {
            field: self.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Returns a copy of `document` with a placeholder appended to `collection`,
/// together with the index of the new item.  A missing list is created.
///
/// # Errors
///
/// Returns [`PathError::NotAnObject`] when `document` is not an object and
/// [`PathError::NotAnArray`] when the section holds something else than a
/// list.
pub fn append_placeholder(document: &Value, collection: Collection) -> Result<(Value, usize), EditError> {
    let item = collection.placeholder_json()?;
    let key = collection.key();

    let mut updated = document.clone();
    let root = updated.as_object_mut().ok_or_else(|| PathError::NotAnObject {
        at: String::new(),
    })?;
    let items = root
        .entry(key)
        .or_insert_with(|| Value::Array(Vec::new()))
        .as_array_mut()
        .ok_or_else(|| PathError::NotAnArray { at: key.to_string() })?;
    items.push(item);
    let index = items.len() - 1;

    Ok((updated, index))
}

/// Returns a copy of `document` without the item at `index` of `collection`.
///
/// # Errors
///
/// Returns [`EditError::IndexOutOfRange`] when `index` is past the end, and
/// an [`EditError::Path`] when the section is missing or not a list.
pub fn remove_from_document(
    document: &Value,
    collection: Collection,
    index: usize,
) -> Result<Value, EditError> {
    let key = collection.key();

    let mut updated = document.clone();
    let root = updated.as_object_mut().ok_or_else(|| PathError::NotAnObject {
        at: String::new(),
    })?;
    let items = root
        .get_mut(key)
        .ok_or_else(|| PathError::MissingField { at: key.to_string() })?
        .as_array_mut()
        .ok_or_else(|| PathError::NotAnArray { at: key.to_string() })?;
    if index >= items.len() {
        return Err(EditError::IndexOutOfRange {
            field: key.to_string(),
            index,
            len: items.len(),
        });
    }
    items.remove(index);

    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::defaults::embedded_portfolio;
    use serde_json::json;

    #[test]
    fn test_push_placeholder_appends_admin_defaults() {
        // Arrange
        let mut cfg = embedded_portfolio();

        // Act
        let exp = cfg.push_placeholder(Collection::Experience);
        let tech = cfg.push_placeholder(Collection::TechStack);
        let qual = cfg.push_placeholder(Collection::Qualifications);

        // Assert
        assert_eq!(exp, 3);
        assert_eq!(cfg.experience[exp].title, "Novo Cargo");
        assert!(!cfg.experience[exp].is_active);
        assert_eq!(tech, 8);
        assert_eq!(cfg.tech_stack[tech].icon, "Code2");
        assert_eq!(qual, 0);
        assert_eq!(cfg.qualifications[0].kind, QualificationType::Course);
    }

    #[test]
    fn test_remove_item_shifts_later_items() {
        let mut cfg = embedded_portfolio();

        cfg.remove_item(Collection::Experience, 0).expect("remove");

        assert_eq!(cfg.experience.len(), 2);
        assert_eq!(cfg.experience[0].title, "QA Analyst");
        assert_eq!(cfg.experience[1].title, "QA Trainee");
    }

    #[test]
    fn test_remove_item_out_of_range_is_an_error() {
        let mut cfg = embedded_portfolio();

        let err = cfg.remove_item(Collection::Metrics, 3).unwrap_err();

        assert_eq!(
            err,
            EditError::IndexOutOfRange {
                field: "metrics".to_string(),
                index: 3,
                len: 3,
            }
        );
        assert_eq!(cfg.metrics.len(), 3);
    }

    #[test]
    fn test_remove_from_empty_collection_is_an_error() {
        let mut cfg = embedded_portfolio();
        assert!(cfg.remove_item(Collection::Qualifications, 0).is_err());
    }

    #[test]
    fn test_append_placeholder_keeps_unknown_keys() {
        // Arrange
        let doc = json!({ "metrics": [{ "value": "1", "label": "a", "color": "red" }], "theme": "dark" });

        // Act
        let (updated, index) = append_placeholder(&doc, Collection::Metrics).expect("append");

        // Assert
        assert_eq!(index, 1);
        assert_eq!(updated["metrics"][1], json!({ "value": "0+", "label": "Nova Métrica" }));
        assert_eq!(updated["metrics"][0]["color"], "red");
        assert_eq!(updated["theme"], "dark");
        assert_eq!(doc["metrics"].as_array().map(Vec::len), Some(1), "input untouched");
    }

    #[test]
    fn test_append_placeholder_creates_missing_list() {
        let (updated, index) =
            append_placeholder(&json!({}), Collection::Qualifications).expect("append");

        assert_eq!(index, 0);
        assert_eq!(updated["qualifications"][0]["type"], "course");
    }

    #[test]
    fn test_append_placeholder_rejects_non_list_section() {
        let err = append_placeholder(&json!({ "techStack": "none" }), Collection::TechStack)
            .unwrap_err();
        assert!(matches!(err, EditError::Path(PathError::NotAnArray { .. })));
    }

    #[test]
    fn test_remove_from_document_shifts_later_items() {
        let doc = json!({ "techStack": [{ "name": "A" }, { "name": "B" }, { "name": "C" }] });

        let updated = remove_from_document(&doc, Collection::TechStack, 0).expect("remove");

        assert_eq!(updated["techStack"], json!([{ "name": "B" }, { "name": "C" }]));
    }

    #[test]
    fn test_remove_from_document_out_of_range_is_an_error() {
        let doc = json!({ "metrics": [] });

        let err = remove_from_document(&doc, Collection::Metrics, 0).unwrap_err();

        assert_eq!(
            err,
            EditError::IndexOutOfRange {
                field: "metrics".to_string(),
                index: 0,
                len: 0,
            }
        );
        assert!(matches!(
            remove_from_document(&json!({}), Collection::Metrics, 0),
            Err(EditError::Path(PathError::MissingField { .. }))
        ));
    }
}
