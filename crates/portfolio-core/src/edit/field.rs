//! Typed edits.
//!
//! [`ConfigField`] names every editable leaf of a [`PortfolioConfig`]: one
//! enum per section, with the array position carried alongside for list
//! sections.  Path expressions coming from the outside world are mapped onto
//! it once with [`ConfigField::from_path`]; anything that does not name a
//! real field is rejected there, before any document is touched.
//!
//! ```rust
//! use portfolio_core::{embedded_portfolio, ConfigEdit};
//! use serde_json::json;
//!
//! let edit = ConfigEdit::parse("experience[0].title", &json!("Staff QA")).unwrap();
//! let updated = embedded_portfolio().apply(&edit).unwrap();
//! assert_eq!(updated.experience[0].title, "Staff QA");
//! ```

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use super::path::{update_document, FieldPath, PathError, PathSegment};
use crate::domain::schema::{PortfolioConfig, QualificationType};

/// Errors produced while building or applying an edit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// The path expression itself is malformed or cannot be followed.
    #[error(transparent)]
    Path(#[from] PathError),

    /// The path is well-formed but names no field of the schema.
    #[error("unknown field `{path}`")]
    UnknownField { path: String },

    /// The value has the wrong shape for the field.
    #[error("`{field}` expects {expected}, got {found}")]
    TypeMismatch {
        field: String,
        expected: ValueKind,
        found: String,
    },

    /// The value has the right shape but is not acceptable for the field.
    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue { field: String, reason: String },

    /// The edit addresses a list position that does not exist.
    #[error("index {index} out of range for `{field}` (length {len})")]
    IndexOutOfRange {
        field: String,
        index: usize,
        len: usize,
    },
}

// ── Values ────────────────────────────────────────────────────────────────────

/// The shape of value a field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Text,
    Flag,
    Number,
    List,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::Text => "a string",
            ValueKind::Flag => "a boolean",
            ValueKind::Number => "an integer",
            ValueKind::List => "a list of strings",
        })
    }
}

/// A typed value for a single leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    Number(i64),
    List(Vec<String>),
}

impl FieldValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            FieldValue::Text(_) => ValueKind::Text,
            FieldValue::Flag(_) => ValueKind::Flag,
            FieldValue::Number(_) => ValueKind::Number,
            FieldValue::List(_) => ValueKind::List,
        }
    }

    /// Reads a JSON value as `expected`.  On mismatch, returns a short
    /// description of what was found instead.
    fn from_json(value: &Value, expected: ValueKind) -> Result<Self, String> {
        let found = || describe_json(value);
        match expected {
            ValueKind::Text => value
                .as_str()
                .map(|s| FieldValue::Text(s.to_string()))
                .ok_or_else(found),
            ValueKind::Flag => value.as_bool().map(FieldValue::Flag).ok_or_else(found),
            ValueKind::Number => value.as_i64().map(FieldValue::Number).ok_or_else(found),
            ValueKind::List => value
                .as_array()
                .and_then(|items| {
                    items
                        .iter()
                        .map(|item| item.as_str().map(str::to_string))
                        .collect::<Option<Vec<_>>>()
                })
                .map(FieldValue::List)
                .ok_or_else(found),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Text(s) => Value::from(s.as_str()),
            FieldValue::Flag(b) => Value::from(*b),
            FieldValue::Number(n) => Value::from(*n),
            FieldValue::List(items) => Value::from(items.clone()),
        }
    }
}

fn describe_json(value: &Value) -> String {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(n) if n.is_i64() => "an integer",
        Value::Number(_) => "a non-integer number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
    .to_string()
}

/// Splits the admin panel's comma-separated feature input (`"a, b, c"`).
pub fn parse_feature_list(input: &str) -> Vec<String> {
    input.split(", ").map(str::to_string).collect()
}

// ── Field names ───────────────────────────────────────────────────────────────

/// Declares a section's leaf fields together with their JSON key and kind.
macro_rules! leaf_fields {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $key:literal : $kind:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The JSON key of this field.
            pub fn key(self) -> &'static str {
                match self {
                    $($name::$variant => $key),+
                }
            }

            pub fn kind(self) -> ValueKind {
                match self {
                    $($name::$variant => ValueKind::$kind),+
                }
            }

            fn from_key(key: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|field| field.key() == key)
            }
        }
    };
}

leaf_fields!(
    /// Fields of `personal`.
    PersonalField {
        FirstName => "firstName": Text,
        LastName => "lastName": Text,
        Role => "role": Text,
        Tagline => "tagline": Text,
        Description => "description": Text,
        StatusBadge => "statusBadge": Text,
        Email => "email": Text,
        Phone => "phone": Text,
        Linkedin => "linkedin": Text,
        Github => "github": Text,
        Location => "location": Text,
    }
);

leaf_fields!(
    /// Scalar fields of `project`.
    ProjectField {
        Name => "name": Text,
        Subtitle => "subtitle": Text,
        Description => "description": Text,
        Features => "features": List,
    }
);

leaf_fields!(
    /// Fields of `project.codeExample`.
    CodeExampleField {
        Filename => "filename": Text,
        Content => "content": Text,
    }
);

leaf_fields!(
    /// Fields of a `techStack[]` entry.
    TechField {
        Name => "name": Text,
        Icon => "icon": Text,
    }
);

leaf_fields!(
    /// Fields of an `experience[]` entry.
    ExperienceField {
        Year => "year": Text,
        Title => "title": Text,
        Company => "company": Text,
        Description => "description": Text,
        IsActive => "isActive": Flag,
    }
);

leaf_fields!(
    /// Fields of a `certifications[]` entry.
    CertificationField {
        Name => "name": Text,
        Issuer => "issuer": Text,
        Year => "year": Text,
        CredentialUrl => "credentialUrl": Text,
    }
);

leaf_fields!(
    /// Fields of a `qualifications[]` entry.
    QualificationField {
        Title => "title": Text,
        Institution => "institution": Text,
        Year => "year": Text,
        Kind => "type": Text,
    }
);

leaf_fields!(
    /// Fields of `learning`.
    LearningField {
        Title => "title": Text,
        Subtitle => "subtitle": Text,
        Progress => "progress": Number,
        Level => "level": Text,
    }
);

leaf_fields!(
    /// Fields of a `metrics[]` entry.
    MetricField {
        Value => "value": Text,
        Label => "label": Text,
    }
);

/// One editable leaf of a [`PortfolioConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigField {
    Personal(PersonalField),
    Project(ProjectField),
    /// A single entry of `project.features`.
    ProjectFeature(usize),
    CodeExample(CodeExampleField),
    TechStack(usize, TechField),
    Experience(usize, ExperienceField),
    Certification(usize, CertificationField),
    Qualification(usize, QualificationField),
    Learning(LearningField),
    Metric(usize, MetricField),
}

impl ConfigField {
    /// Maps a parsed path expression onto the schema.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::UnknownField`] when the path does not name a leaf
    /// of [`PortfolioConfig`].
    pub fn from_path(path: &FieldPath) -> Result<Self, EditError> {
        let parts: Vec<(&str, Option<usize>)> = path
            .segments()
            .iter()
            .map(|segment| (segment.key.as_str(), segment.index))
            .collect();

        let field = match parts.as_slice() {
            [("personal", None), (key, None)] => {
                PersonalField::from_key(key).map(ConfigField::Personal)
            }
            [("project", None), ("features", Some(i))] => Some(ConfigField::ProjectFeature(*i)),
            [("project", None), (key, None)] => ProjectField::from_key(key).map(ConfigField::Project),
            [("project", None), ("codeExample", None), (key, None)] => {
                CodeExampleField::from_key(key).map(ConfigField::CodeExample)
            }
            [("techStack", Some(i)), (key, None)] => {
                TechField::from_key(key).map(|f| ConfigField::TechStack(*i, f))
            }
            [("experience", Some(i)), (key, None)] => {
                ExperienceField::from_key(key).map(|f| ConfigField::Experience(*i, f))
            }
            [("certifications", Some(i)), (key, None)] => {
                CertificationField::from_key(key).map(|f| ConfigField::Certification(*i, f))
            }
            [("qualifications", Some(i)), (key, None)] => {
                QualificationField::from_key(key).map(|f| ConfigField::Qualification(*i, f))
            }
            [("learning", None), (key, None)] => {
                LearningField::from_key(key).map(ConfigField::Learning)
            }
            [("metrics", Some(i)), (key, None)] => {
                MetricField::from_key(key).map(|f| ConfigField::Metric(*i, f))
            }
            _ => None,
        };

        field.ok_or_else(|| EditError::UnknownField {
            path: path.to_string(),
        })
    }

    /// The path expression addressing this field.
    pub fn to_path(self) -> FieldPath {
        use PathSegment as S;
        let segments = match self {
            ConfigField::Personal(f) => vec![S::field("personal"), S::field(f.key())],
            ConfigField::Project(f) => vec![S::field("project"), S::field(f.key())],
            ConfigField::ProjectFeature(i) => vec![S::field("project"), S::indexed("features", i)],
            ConfigField::CodeExample(f) => vec![
                S::field("project"),
                S::field("codeExample"),
                S::field(f.key()),
            ],
            ConfigField::TechStack(i, f) => vec![S::indexed("techStack", i), S::field(f.key())],
            ConfigField::Experience(i, f) => vec![S::indexed("experience", i), S::field(f.key())],
            ConfigField::Certification(i, f) => {
                vec![S::indexed("certifications", i), S::field(f.key())]
            }
            ConfigField::Qualification(i, f) => {
                vec![S::indexed("qualifications", i), S::field(f.key())]
            }
            ConfigField::Learning(f) => vec![S::field("learning"), S::field(f.key())],
            ConfigField::Metric(i, f) => vec![S::indexed("metrics", i), S::field(f.key())],
        };
        FieldPath::from_parts(segments)
    }

    /// The shape of value this field accepts.
    pub fn kind(self) -> ValueKind {
        match self {
            ConfigField::Personal(f) => f.kind(),
            ConfigField::Project(f) => f.kind(),
            ConfigField::ProjectFeature(_) => ValueKind::Text,
            ConfigField::CodeExample(f) => f.kind(),
            ConfigField::TechStack(_, f) => f.kind(),
            ConfigField::Experience(_, f) => f.kind(),
            ConfigField::Certification(_, f) => f.kind(),
            ConfigField::Qualification(_, f) => f.kind(),
            ConfigField::Learning(f) => f.kind(),
            ConfigField::Metric(_, f) => f.kind(),
        }
    }
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_path(), f)
    }
}

// ── Edits ─────────────────────────────────────────────────────────────────────

/// A validated "set this leaf to this value" instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEdit {
    field: ConfigField,
    value: FieldValue,
}

impl ConfigEdit {
    /// Pairs a field with a value, checking the value fits the field.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::TypeMismatch`] when the value has the wrong kind,
    /// or [`EditError::InvalidValue`] for a qualification type outside the
    /// known set.
    pub fn new(field: ConfigField, value: FieldValue) -> Result<Self, EditError> {
        if value.kind() != field.kind() {
            return Err(EditError::TypeMismatch {
                field: field.to_string(),
                expected: field.kind(),
                found: value.kind().to_string(),
            });
        }
        if let (ConfigField::Qualification(_, QualificationField::Kind), FieldValue::Text(s)) =
            (&field, &value)
        {
            s.parse::<QualificationType>()
                .map_err(|e| EditError::InvalidValue {
                    field: field.to_string(),
                    reason: e.to_string(),
                })?;
        }
        Ok(Self { field, value })
    }

    /// Builds an edit from a parsed path and a raw JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::UnknownField`] for paths outside the schema and
    /// the errors of [`ConfigEdit::new`] for unsuitable values.
    pub fn from_path(path: &FieldPath, value: &Value) -> Result<Self, EditError> {
        let field = ConfigField::from_path(path)?;
        let value =
            FieldValue::from_json(value, field.kind()).map_err(|found| EditError::TypeMismatch {
                field: field.to_string(),
                expected: field.kind(),
                found,
            })?;
        Self::new(field, value)
    }

    /// Parses a path expression and builds an edit from it.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::Path`] for malformed expressions, otherwise the
    /// errors of [`ConfigEdit::from_path`].
    pub fn parse(expression: &str, value: &Value) -> Result<Self, EditError> {
        Self::from_path(&FieldPath::parse(expression)?, value)
    }

    pub fn field(&self) -> ConfigField {
        self.field
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    /// Applies this edit to an untyped document, leaving every other key
    /// (including ones the schema does not know about) untouched.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::Path`] when the document lacks an intermediate
    /// field or the index is out of range.
    pub fn apply_to_document(&self, document: &Value) -> Result<Value, EditError> {
        Ok(update_document(
            document,
            &self.field.to_path(),
            self.value.to_json(),
        )?)
    }
}

// ── Applying to a typed config ────────────────────────────────────────────────

impl PortfolioConfig {
    /// Returns a copy of this config with the edit applied.  `self` is left
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::IndexOutOfRange`] when the edit addresses a list
    /// position past the end.
    pub fn apply(&self, edit: &ConfigEdit) -> Result<PortfolioConfig, EditError> {
        let mut next = self.clone();
        next.apply_in_place(edit)?;
        Ok(next)
    }

    pub(crate) fn apply_in_place(&mut self, edit: &ConfigEdit) -> Result<(), EditError> {
        let field = edit.field;
        let value = &edit.value;

        match field {
            ConfigField::Personal(f) => {
                let p = &mut self.personal;
                match f {
                    PersonalField::FirstName => set_text(&mut p.first_name, value, field),
                    PersonalField::LastName => set_text(&mut p.last_name, value, field),
                    PersonalField::Role => set_text(&mut p.role, value, field),
                    PersonalField::Tagline => set_text(&mut p.tagline, value, field),
                    PersonalField::Description => set_text(&mut p.description, value, field),
                    PersonalField::StatusBadge => set_text(&mut p.status_badge, value, field),
                    PersonalField::Email => set_text(&mut p.email, value, field),
                    PersonalField::Phone => set_text(&mut p.phone, value, field),
                    PersonalField::Linkedin => set_text(&mut p.linkedin, value, field),
                    PersonalField::Github => set_text(&mut p.github, value, field),
                    PersonalField::Location => {
                        set_text(p.location.get_or_insert_with(String::new), value, field)
                    }
                }
            }
            ConfigField::Project(f) => {
                let p = &mut self.project;
                match f {
                    ProjectField::Name => set_text(&mut p.name, value, field),
                    ProjectField::Subtitle => set_text(&mut p.subtitle, value, field),
                    ProjectField::Description => set_text(&mut p.description, value, field),
                    ProjectField::Features => set_list(&mut p.features, value, field),
                }
            }
            ConfigField::ProjectFeature(i) => {
                let slot = item_mut(&mut self.project.features, i, field)?;
                set_text(slot, value, field)
            }
            ConfigField::CodeExample(f) => {
                let c = &mut self.project.code_example;
                match f {
                    CodeExampleField::Filename => set_text(&mut c.filename, value, field),
                    CodeExampleField::Content => set_text(&mut c.content, value, field),
                }
            }
            ConfigField::TechStack(i, f) => {
                let t = item_mut(&mut self.tech_stack, i, field)?;
                match f {
                    TechField::Name => set_text(&mut t.name, value, field),
                    TechField::Icon => set_text(&mut t.icon, value, field),
                }
            }
            ConfigField::Experience(i, f) => {
                let e = item_mut(&mut self.experience, i, field)?;
                match f {
                    ExperienceField::Year => set_text(&mut e.year, value, field),
                    ExperienceField::Title => set_text(&mut e.title, value, field),
                    ExperienceField::Company => set_text(&mut e.company, value, field),
                    ExperienceField::Description => set_text(&mut e.description, value, field),
                    ExperienceField::IsActive => set_flag(&mut e.is_active, value, field),
                }
            }
            ConfigField::Certification(i, f) => {
                let c = item_mut(&mut self.certifications, i, field)?;
                match f {
                    CertificationField::Name => set_text(&mut c.name, value, field),
                    CertificationField::Issuer => set_text(&mut c.issuer, value, field),
                    CertificationField::Year => set_text(&mut c.year, value, field),
                    CertificationField::CredentialUrl => set_text(
                        c.credential_url.get_or_insert_with(String::new),
                        value,
                        field,
                    ),
                }
            }
            ConfigField::Qualification(i, f) => {
                let q = item_mut(&mut self.qualifications, i, field)?;
                match f {
                    QualificationField::Title => set_text(&mut q.title, value, field),
                    QualificationField::Institution => set_text(&mut q.institution, value, field),
                    QualificationField::Year => set_text(&mut q.year, value, field),
                    QualificationField::Kind => {
                        let mut raw = String::new();
                        set_text(&mut raw, value, field)?;
                        q.kind = raw.parse::<QualificationType>().map_err(|e| {
                            EditError::InvalidValue {
                                field: field.to_string(),
                                reason: e.to_string(),
                            }
                        })?;
                        Ok(())
                    }
                }
            }
            ConfigField::Learning(f) => {
                let l = &mut self.learning;
                match f {
                    LearningField::Title => set_text(&mut l.title, value, field),
                    LearningField::Subtitle => set_text(&mut l.subtitle, value, field),
                    LearningField::Progress => set_number(&mut l.progress, value, field),
                    LearningField::Level => set_text(&mut l.level, value, field),
                }
            }
            ConfigField::Metric(i, f) => {
                let m = item_mut(&mut self.metrics, i, field)?;
                match f {
                    MetricField::Value => set_text(&mut m.value, value, field),
                    MetricField::Label => set_text(&mut m.label, value, field),
                }
            }
        }
    }
}

fn item_mut<T>(items: &mut [T], index: usize, field: ConfigField) -> Result<&mut T, EditError> {
    let len = items.len();
    items.get_mut(index).ok_or_else(|| EditError::IndexOutOfRange {
        field: field.to_string(),
        index,
        len,
    })
}

fn mismatch(field: ConfigField, value: &FieldValue) -> EditError {
    EditError::TypeMismatch {
        field: field.to_string(),
        expected: field.kind(),
        found: value.kind().to_string(),
    }
}

fn set_text(slot: &mut String, value: &FieldValue, field: ConfigField) -> Result<(), EditError> {
    match value {
        FieldValue::Text(s) => {
            slot.clone_from(s);
            Ok(())
        }
        other => Err(mismatch(field, other)),
    }
}

fn set_flag(slot: &mut bool, value: &FieldValue, field: ConfigField) -> Result<(), EditError> {
    match value {
        FieldValue::Flag(b) => {
            *slot = *b;
            Ok(())
        }
        other => Err(mismatch(field, other)),
    }
}

fn set_number(slot: &mut i64, value: &FieldValue, field: ConfigField) -> Result<(), EditError> {
    match value {
        FieldValue::Number(n) => {
            *slot = *n;
            Ok(())
        }
        other => Err(mismatch(field, other)),
    }
}

fn set_list(slot: &mut Vec<String>, value: &FieldValue, field: ConfigField) -> Result<(), EditError> {
    match value {
        FieldValue::List(items) => {
            slot.clone_from(items);
            Ok(())
        }
        other => Err(mismatch(field, other)),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
