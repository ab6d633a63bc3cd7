//! Result shapes returned by the term tools.

use serde::ser::{Serialize, Serializer};
use serde::Deserialize;

/// Namespace used when an identifier has no prefix and none was supplied.
pub const UNKNOWN_NAMESPACE: &str = "unknown";

/// Lower-cased prefix before the first `:` of a CURIE.
///
/// `MONDO:0005148` → `mondo`; identifiers without `:` have no namespace.
pub fn namespace_of(id: &str) -> Option<String> {
    id.split_once(':').map(|(prefix, _)| prefix.to_lowercase())
}

/// One search hit. Serializes as a `[id, namespace, label]` triple.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "(String, String, String)")]
pub struct SearchHit {
    pub id: String,
    pub namespace: String,
    pub label: String,
}

impl From<(String, String, String)> for SearchHit {
    fn from((id, namespace, label): (String, String, String)) -> Self {
        Self {
            id,
            namespace,
            label,
        }
    }
}

impl Serialize for SearchHit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.id, &self.namespace, &self.label).serialize(serializer)
    }
}

/// A resolved term.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, Deserialize)]
pub struct TermRecord {
    pub term_id: String,
    pub label: String,
    pub definition: Option<String>,
    pub synonyms: Vec<String>,
    pub namespace: String,
}

/// Outcome of a detail lookup.
///
/// The two shapes are told apart by the presence of the `error` key.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, Deserialize)]
#[serde(untagged)]
pub enum TermDetails {
    Error { error: String },
    Found(TermRecord),
}

impl TermDetails {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }

    pub fn not_found(id: &str) -> Self {
        Self::error(format!("Term '{}' not found or does not exist", id))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    pub fn record(&self) -> Option<&TermRecord> {
        match self {
            Self::Found(record) => Some(record),
            Self::Error { .. } => None,
        }
    }
}
