//! Backend registry — dispatches selectors to OLS or local SQLite adapters.

use super::ols::{is_valid_ontology_id, OlsAdapter};
use super::selector::{Scheme, Selector};
use super::sqlite::SqliteOntology;
use super::traits::{AdapterResolver, OntologyAdapter, OntologyError, OntologyResult};
use crate::config::OakConfig;
use async_trait::async_trait;
use reqwest::Client;
use std::path::PathBuf;

/// Resolves selectors against the configured backends.
///
/// Holds the shared HTTP client; every resolved adapter is a fresh,
/// request-scoped handle.
pub struct BackendRegistry {
    config: OakConfig,
    http: Client,
}

impl BackendRegistry {
    pub fn new(config: OakConfig) -> OntologyResult<Self> {
        let http = OlsAdapter::http_client(&config.ols)?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &OakConfig {
        &self.config
    }

    fn resolve_ols(&self, selector: &Selector) -> OntologyResult<OlsAdapter> {
        let ontology = selector.namespace().map(str::to_ascii_lowercase);
        if let Some(ns) = &ontology {
            if !is_valid_ontology_id(ns) {
                return Err(OntologyError::unavailable(
                    selector,
                    format!("'{}' is not a valid OLS ontology id", ns),
                ));
            }
        }
        Ok(OlsAdapter::new(self.http.clone(), &self.config.ols, ontology))
    }

    /// `obo:<ns>` maps to `<data_dir>/<ns>.db`; anything else is a path.
    fn store_path(&self, selector: &Selector) -> OntologyResult<PathBuf> {
        let target = selector.target();
        if target.is_empty() {
            return Err(OntologyError::unavailable(
                selector,
                "local stores need a namespace or a file path",
            ));
        }
        match target.strip_prefix("obo:") {
            Some(ns) if !ns.is_empty() && is_valid_ontology_id(ns) => Ok(self
                .config
                .local
                .data_dir
                .join(format!("{}.db", ns.to_ascii_lowercase()))),
            Some(ns) => Err(OntologyError::unavailable(
                selector,
                format!("'{}' is not a valid ontology namespace", ns),
            )),
            None => Ok(PathBuf::from(target)),
        }
    }
}

#[async_trait]
impl AdapterResolver for BackendRegistry {
    async fn resolve(&self, selector: &Selector) -> OntologyResult<Box<dyn OntologyAdapter>> {
        match selector.scheme() {
            Scheme::Ols => Ok(Box::new(self.resolve_ols(selector)?)),
            Scheme::Sqlite => {
                let path = self.store_path(selector)?;
                tracing::debug!(path = %path.display(), "opening local ontology store");
                let store = SqliteOntology::open(&path)
                    .map_err(|e| OntologyError::unavailable(selector, e.to_string()))?;
                Ok(Box::new(store))
            }
        }
    }
}
