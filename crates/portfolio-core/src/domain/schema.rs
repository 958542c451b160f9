//! Portfolio content schema.
//!
//! [`PortfolioConfig`] is the single aggregate describing everything the
//! public page displays.  It is stored on disk as one pretty-printed JSON
//! document whose field names are camelCase:
//!
//! ```json
//! {
//!   "personal": { "firstName": "Matheus", "lastName": "Ferreira", ... },
//!   "project": { "name": "BDD_PyTech", "features": ["..."], ... },
//!   "techStack": [{ "name": "Cypress", "icon": "TestTube2" }],
//!   "experience": [{ "year": "2023 - Presente", "isActive": true, ... }],
//!   ...
//! }
//! ```
//!
//! # Lenient decoding
//!
//! Every field is annotated with `#[serde(default)]`, so a document that is
//! missing whole sections still decodes into a config with empty values.
//! The server never validates the shape of what it stores; missing fields
//! surface as blank content on the page, not as errors.
//!
//! # Identity
//!
//! List items have no identifier beyond their position.  Removing an item
//! shifts every later item down by one.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

/// The whole portfolio: every piece of content the site can display.
///
/// There is intentionally no `Default` impl: the meaningful default is the
/// embedded content returned by
/// [`embedded_portfolio`](crate::domain::defaults::embedded_portfolio).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioConfig {
    #[serde(default)]
    pub personal: PersonalInfo,
    #[serde(default)]
    pub project: ProjectInfo,
    #[serde(default)]
    pub tech_stack: Vec<TechItem>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub qualifications: Vec<Qualification>,
    #[serde(default)]
    pub learning: Learning,
    #[serde(default)]
    pub metrics: Vec<Metric>,
}

/// Name, role, and contact details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub tagline: String,
    pub description: String,
    pub status_badge: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub github: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// The featured project card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectInfo {
    pub name: String,
    pub subtitle: String,
    pub description: String,
    /// Ordered feature labels shown as chips.
    pub features: Vec<String>,
    pub code_example: CodeExample,
}

/// The code sample rendered next to the featured project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeExample {
    pub filename: String,
    pub content: String,
}

/// One entry of the tech stack strip.
///
/// `icon` is a free string; see [`TechIcon`](crate::domain::view::TechIcon)
/// for how it is resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechItem {
    pub name: String,
    pub icon: String,
}

/// One entry of the experience timeline.
///
/// Any number of entries may be active at once, including zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExperienceEntry {
    /// Free-text year range, e.g. `"2023 - Presente"`.
    pub year: String,
    pub title: String,
    pub company: String,
    pub description: String,
    pub is_active: bool,
}

/// A certification with an optional credential link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub year: String,
    /// `None` and `Some("")` both mean "no link".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential_url: Option<String>,
}

/// An academic or professional qualification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Qualification {
    pub title: String,
    pub institution: String,
    pub year: String,
    #[serde(rename = "type")]
    pub kind: QualificationType,
}

/// The closed set of qualification kinds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualificationType {
    Graduation,
    Postgraduate,
    Masters,
    Doctorate,
    Specialization,
    #[default]
    Course,
    Bootcamp,
}

impl QualificationType {
    /// All kinds, in the order the admin panel lists them.
    pub const ALL: [QualificationType; 7] = [
        QualificationType::Graduation,
        QualificationType::Postgraduate,
        QualificationType::Masters,
        QualificationType::Doctorate,
        QualificationType::Specialization,
        QualificationType::Course,
        QualificationType::Bootcamp,
    ];

    /// The identifier used in the JSON document.
    pub fn as_str(self) -> &'static str {
        match self {
            QualificationType::Graduation => "graduation",
            QualificationType::Postgraduate => "postgraduate",
            QualificationType::Masters => "masters",
            QualificationType::Doctorate => "doctorate",
            QualificationType::Specialization => "specialization",
            QualificationType::Course => "course",
            QualificationType::Bootcamp => "bootcamp",
        }
    }
}

impl fmt::Display for QualificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the known qualification kinds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown qualification type: {0:?}")]
pub struct UnknownQualificationType(pub String);

impl FromStr for QualificationType {
    type Err = UnknownQualificationType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QualificationType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownQualificationType(s.to_string()))
    }
}

/// The "always learning" progress card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Learning {
    pub title: String,
    pub subtitle: String,
    /// Intended range is 0–100 but nothing enforces it; see
    /// [`Learning::display_progress`](crate::domain::view).  A fractional
    /// number is rounded to the nearest integer on decode.
    #[serde(deserialize_with = "deserialize_progress")]
    pub progress: i64,
    pub level: String,
}

fn deserialize_progress<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Number::deserialize(deserializer)?;
    number
        .as_i64()
        .or_else(|| number.as_f64().map(|f| f.round() as i64))
        .ok_or_else(|| serde::de::Error::custom(format!("progress {number} is not a finite number")))
}

/// A headline figure such as `"500+"` / `"Casos de Teste Automatizados"`.
///
/// Both fields are display strings; `value` is never parsed as a number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metric {
    pub value: String,
    pub label: String,
}

// ── Document conversion ───────────────────────────────────────────────────────

impl PortfolioConfig {
    /// Decodes a typed config from a raw JSON document.
    ///
    /// Missing fields take empty defaults.  Fields present with the wrong
    /// JSON type still fail.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error when a present field cannot
    /// be decoded into its declared type.
    pub fn from_document(document: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(document)
    }

    /// Encodes this config as a JSON document.
    ///
    /// # Errors
    ///
    /// Propagates `serde_json` serialization errors.
    pub fn to_document(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
