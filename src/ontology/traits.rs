//! Ontology adapter contract
//!
//! An adapter wraps one ontology backend (a remote lookup service or a
//! local store) behind four primitives: basic search, label, definition
//! and alias lookup. Alias lookup is an optional capability.

use super::selector::Selector;
use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by ontology backends and the resolver.
#[derive(Debug, Error)]
pub enum OntologyError {
    /// The selector names an unknown, malformed or unreachable backend.
    #[error("backend unavailable for '{selector}': {reason}")]
    BackendUnavailable { selector: String, reason: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{service} returned {status}: {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("response parse error: {0}")]
    Parse(String),
}

impl OntologyError {
    pub fn unavailable(selector: impl ToString, reason: impl Into<String>) -> Self {
        Self::BackendUnavailable {
            selector: selector.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for ontology operations
pub type OntologyResult<T> = Result<T, OntologyError>;

/// Outcome of an alias lookup.
///
/// Backends without a synonym model report `Unsupported` instead of failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasLookup {
    Supported(Vec<String>),
    Unsupported,
}

impl AliasLookup {
    /// The aliases, or an empty list when the capability is missing.
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::Supported(aliases) => aliases,
            Self::Unsupported => Vec::new(),
        }
    }
}

/// A handle on one ontology backend, bound to a selector.
#[async_trait]
pub trait OntologyAdapter: Send + Sync {
    /// Search terms by free text, returning `(identifier, label)` pairs in
    /// the backend's relevancy order.
    async fn basic_search(&self, text: &str) -> OntologyResult<Vec<(String, String)>>;

    /// Like `basic_search`, but paged backends fetch at least `wanted` hits.
    /// `0` leaves the backend's default page size in place.
    async fn search_up_to(&self, text: &str, _wanted: usize) -> OntologyResult<Vec<(String, String)>> {
        self.basic_search(text).await
    }

    /// Primary label of a term, `None` if the term is unknown.
    async fn label(&self, id: &str) -> OntologyResult<Option<String>>;

    /// Textual definition of a term, if it has one.
    async fn definition(&self, id: &str) -> OntologyResult<Option<String>>;

    /// Synonyms of a term.
    async fn aliases(&self, _id: &str) -> OntologyResult<AliasLookup> {
        Ok(AliasLookup::Unsupported)
    }
}

/// Turns selectors into adapter handles.
#[async_trait]
pub trait AdapterResolver: Send + Sync {
    async fn resolve(&self, selector: &Selector) -> OntologyResult<Box<dyn OntologyAdapter>>;
}
