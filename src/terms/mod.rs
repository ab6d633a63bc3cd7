//! Term tools — search and detail lookup over an `AdapterResolver`.
//!
//! Both handlers are stateless and never fail: search collapses every
//! backend failure into an empty result, detail lookup into an error record.

mod types;

pub use types::{namespace_of, SearchHit, TermDetails, TermRecord, UNKNOWN_NAMESPACE};

use crate::ontology::{AdapterResolver, OntologyAdapter, OntologyResult, Scheme, Selector};
use std::sync::Arc;

/// Default number of search hits returned.
pub const DEFAULT_LIMIT: usize = 10;

const TOOL_USE: &str = "tool_use";

/// Search and detail handlers bound to one resolver.
#[derive(Clone)]
pub struct TermService {
    resolver: Arc<dyn AdapterResolver>,
}

impl TermService {
    pub fn new(resolver: Arc<dyn AdapterResolver>) -> Self {
        Self { resolver }
    }

    /// Search for terms matching `text`, optionally within one namespace.
    ///
    /// `limit == 0` disables truncation. Backend failures are logged and
    /// reported as no results.
    pub async fn search(&self, text: &str, namespace: Option<&str>, limit: usize) -> Vec<SearchHit> {
        let namespace = namespace.filter(|ns| !ns.is_empty());
        let selector = Selector::for_namespace(Scheme::Ols, namespace);
        tracing::info!(target: TOOL_USE, term = text, selector = %selector, "searching ontology");

        let pairs = match self.raw_search(&selector, text, limit).await {
            Ok(pairs) => pairs,
            Err(e) => {
                tracing::warn!(target: TOOL_USE, selector = %selector, error = %e, "unable to search ontology");
                return Vec::new();
            }
        };

        let hits: Vec<SearchHit> = truncate(pairs, limit)
            .into_iter()
            .map(|(id, label)| {
                let ns = namespace_of(&id)
                    .or_else(|| namespace.map(str::to_string))
                    .unwrap_or_else(|| UNKNOWN_NAMESPACE.to_string());
                SearchHit {
                    id,
                    namespace: ns,
                    label,
                }
            })
            .collect();

        tracing::info!(target: TOOL_USE, term = text, results = hits.len(), "search complete");
        hits
    }

    /// Search through an arbitrary selector string (`ols:hp`,
    /// `sqlite:obo:hgnc`, ...), returning raw `(id, label)` pairs.
    ///
    /// `None` when the selector cannot be parsed, resolved or searched.
    pub async fn search_selector(
        &self,
        text: &str,
        selector: &str,
        limit: usize,
    ) -> Option<Vec<(String, String)>> {
        let result = match selector.parse::<Selector>() {
            Ok(sel) => self.raw_search(&sel, text, limit).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(pairs) => {
                let pairs = truncate(pairs, limit);
                tracing::info!(target: TOOL_USE, term = text, selector, results = pairs.len(), "searched ontology");
                Some(pairs)
            }
            Err(e) => {
                tracing::warn!(target: TOOL_USE, selector, error = %e, "unable to search ontology");
                None
            }
        }
    }

    /// Look up label, definition and synonyms for one identifier.
    pub async fn term_details(&self, id: &str) -> TermDetails {
        let namespace = namespace_of(id);
        let selector = Selector::for_namespace(Scheme::Ols, namespace.as_deref());
        tracing::info!(target: TOOL_USE, term_id = id, selector = %selector, "fetching term details");

        let adapter = match self.resolver.resolve(&selector).await {
            Ok(adapter) => adapter,
            Err(e) => {
                tracing::warn!(target: TOOL_USE, selector = %selector, error = %e, "unable to resolve ontology");
                return TermDetails::error(e.to_string());
            }
        };

        let label = match adapter.label(id).await {
            Ok(Some(label)) => label,
            Ok(None) => return TermDetails::not_found(id),
            Err(e) => {
                tracing::warn!(target: TOOL_USE, term_id = id, error = %e, "label lookup failed");
                return TermDetails::error(e.to_string());
            }
        };

        let definition = adapter.definition(id).await.unwrap_or_else(|e| {
            tracing::warn!(target: TOOL_USE, term_id = id, error = %e, "definition lookup failed");
            None
        });

        let synonyms = lookup_synonyms(adapter.as_ref(), id).await;

        TermDetails::Found(TermRecord {
            term_id: id.to_string(),
            label,
            definition,
            synonyms,
            namespace: namespace.unwrap_or_else(|| UNKNOWN_NAMESPACE.to_string()),
        })
    }

    async fn raw_search(
        &self,
        selector: &Selector,
        text: &str,
        limit: usize,
    ) -> OntologyResult<Vec<(String, String)>> {
        let adapter = self.resolver.resolve(selector).await?;
        adapter.search_up_to(text, limit).await
    }
}

async fn lookup_synonyms(adapter: &dyn OntologyAdapter, id: &str) -> Vec<String> {
    match adapter.aliases(id).await {
        Ok(lookup) => lookup.into_vec(),
        Err(e) => {
            tracing::debug!(target: TOOL_USE, term_id = id, error = %e, "alias lookup failed");
            Vec::new()
        }
    }
}

/// Keep the first `limit` entries; `0` keeps everything.
fn truncate<T>(mut items: Vec<T>, limit: usize) -> Vec<T> {
    if limit != 0 {
        items.truncate(limit);
    }
    items
}
