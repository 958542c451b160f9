//! Path expressions and copy-on-write document updates.
//!
//! A path expression is a dot-separated list of field names.  Each field name
//! may carry a single trailing index in brackets:
//!
//! ```text
//! personal.firstName
//! project.codeExample.filename
//! experience[2].title
//! project.features[0]
//! ```
//!
//! Nested indexing (`a[0][1]`) is not part of the grammar.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Errors produced while parsing or applying a path expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// The expression was empty.
    #[error("path expression is empty")]
    Empty,

    /// Two dots in a row, or a leading/trailing dot.
    #[error("empty segment at position {position} in {expression:?}")]
    EmptySegment { expression: String, position: usize },

    /// A segment whose bracket syntax is not `name[digits]`.
    #[error("malformed segment {segment:?}: expected `name` or `name[index]`")]
    MalformedSegment { segment: String },

    /// An intermediate value that should contain fields is not an object.
    #[error("expected an object at `{at}`")]
    NotAnObject { at: String },

    /// An indexed segment names a value that is not an array.
    #[error("expected an array at `{at}`")]
    NotAnArray { at: String },

    /// An intermediate or indexed field does not exist.
    #[error("no field at `{at}`")]
    MissingField { at: String },

    /// The index is past the end of the array.
    #[error("index {index} out of range at `{at}` (length {len})")]
    IndexOutOfRange { at: String, index: usize, len: usize },
}

/// One `name` or `name[index]` step of a path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathSegment {
    pub key: String,
    pub index: Option<usize>,
}

impl PathSegment {
    /// A plain field step.
    pub fn field(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            index: None,
        }
    }

    /// A field step followed by an array index.
    pub fn indexed(key: impl Into<String>, index: usize) -> Self {
        Self {
            key: key.into(),
            index: Some(index),
        }
    }

    fn parse(raw: &str) -> Result<Self, PathError> {
        let malformed = || PathError::MalformedSegment {
            segment: raw.to_string(),
        };

        let Some(open) = raw.find('[') else {
            if raw.contains(']') {
                return Err(malformed());
            }
            return Ok(Self::field(raw));
        };

        let key = &raw[..open];
        let digits = raw[open + 1..].strip_suffix(']').ok_or_else(malformed)?;
        if key.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let index = digits.parse::<usize>().map_err(|_| malformed())?;
        Ok(Self::indexed(key, index))
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}[{index}]", self.key),
            None => f.write_str(&self.key),
        }
    }
}

/// A parsed, non-empty path expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Parses a path expression.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::Empty`], [`PathError::EmptySegment`] or
    /// [`PathError::MalformedSegment`] when the expression does not follow
    /// the grammar described in the module docs.
    pub fn parse(expression: &str) -> Result<Self, PathError> {
        if expression.is_empty() {
            return Err(PathError::Empty);
        }
        let segments = expression
            .split('.')
            .enumerate()
            .map(|(position, raw)| {
                if raw.is_empty() {
                    Err(PathError::EmptySegment {
                        expression: expression.to_string(),
                        position,
                    })
                } else {
                    PathSegment::parse(raw)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { segments })
    }

    /// Builds a path from already-validated segments.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::Empty`] when `segments` is empty.
    pub fn from_segments(segments: Vec<PathSegment>) -> Result<Self, PathError> {
        if segments.is_empty() {
            return Err(PathError::Empty);
        }
        Ok(Self { segments })
    }

    /// Builds a path from segments known to be non-empty.
    pub(crate) fn from_parts(segments: Vec<PathSegment>) -> Self {
        debug_assert!(!segments.is_empty());
        Self { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Renders the first `len` segments, used to locate errors.
    fn prefix(&self, len: usize) -> String {
        self.segments[..len.min(self.segments.len())]
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl FromStr for FieldPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prefix(self.segments.len()))
    }
}

// ── Document update ───────────────────────────────────────────────────────────

/// Returns a copy of `document` with the leaf addressed by `path` set to
/// `value`.  `document` itself is never modified, so any reference a caller
/// still holds to it keeps seeing the old content.
///
/// Every intermediate field must exist and every index must be in range.  A
/// final plain field may be absent; it is then created, which is how optional
/// fields such as `personal.location` get their first value.
///
/// # Errors
///
/// Returns [`PathError::MissingField`], [`PathError::NotAnObject`],
/// [`PathError::NotAnArray`] or [`PathError::IndexOutOfRange`] when the path
/// cannot be followed through `document`.
pub fn update_document(document: &Value, path: &FieldPath, value: Value) -> Result<Value, PathError> {
    let (leaf, spine) = path.segments.split_last().ok_or(PathError::Empty)?;

    let mut updated = document.clone();
    let mut node = &mut updated;
    for (depth, segment) in spine.iter().enumerate() {
        node = descend(node, segment, path, depth)?;
    }

    let depth = spine.len();
    match leaf.index {
        Some(_) => *descend(node, leaf, path, depth)? = value,
        None => match node {
            Value::Object(map) => {
                map.insert(leaf.key.clone(), value);
            }
            _ => {
                return Err(PathError::NotAnObject {
                    at: path.prefix(depth),
                })
            }
        },
    }

    debug!(%path, "document updated");
    Ok(updated)
}

/// Steps from `node` into the child named by `segment`.
fn descend<'a>(
    node: &'a mut Value,
    segment: &PathSegment,
    path: &FieldPath,
    depth: usize,
) -> Result<&'a mut Value, PathError> {
    let map = match node {
        Value::Object(map) => map,
        _ => {
            return Err(PathError::NotAnObject {
                at: path.prefix(depth),
            })
        }
    };
    let at = || path.prefix(depth + 1);
    let child = map
        .get_mut(&segment.key)
        .ok_or_else(|| PathError::MissingField { at: at() })?;

    match segment.index {
        None => Ok(child),
        Some(index) => match child {
            Value::Array(items) => {
                let len = items.len();
                items
                    .get_mut(index)
                    .ok_or_else(|| PathError::IndexOutOfRange { at: at(), index, len })
            }
            _ => Err(PathError::NotAnArray { at: at() }),
        },
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
