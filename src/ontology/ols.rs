//! OLS backend — the EBI Ontology Lookup Service REST API.
//!
//! Endpoints used:
//! - `GET /api/search?q=..&rows=..&start=0[&ontology=ns]` for basic search
//! - `GET /api/terms?obo_id=..` or `/api/ontologies/{ns}/terms?obo_id=..`
//!   for label, definition and synonyms

use super::traits::{AliasLookup, OntologyAdapter, OntologyError, OntologyResult};
use crate::config::OlsConfig;
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Mutex;

const SERVICE: &str = "OLS";

// ── Wire types ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    response: SearchBody,
}

#[derive(Debug, Deserialize)]
struct SearchBody {
    #[serde(default)]
    docs: Vec<SearchDoc>,
}

#[derive(Debug, Deserialize)]
struct SearchDoc {
    #[serde(default)]
    obo_id: Option<String>,
    #[serde(default)]
    short_form: Option<String>,
    #[serde(default)]
    iri: Option<String>,
    #[serde(default)]
    label: Option<String>,
}

impl SearchDoc {
    /// CURIE for the hit: `obo_id`, then `short_form` (`HP_0001` → `HP:0001`),
    /// then the raw IRI.
    fn identifier(&self) -> Option<String> {
        if let Some(id) = self.obo_id.as_deref().filter(|s| !s.is_empty()) {
            return Some(id.to_string());
        }
        if let Some(sf) = self.short_form.as_deref().filter(|s| !s.is_empty()) {
            return Some(sf.replacen('_', ":", 1));
        }
        self.iri.clone()
    }
}

#[derive(Debug, Deserialize)]
struct TermsEnvelope {
    #[serde(rename = "_embedded", default)]
    embedded: Option<TermsEmbedded>,
}

#[derive(Debug, Deserialize)]
struct TermsEmbedded {
    #[serde(default)]
    terms: Vec<OlsTerm>,
}

#[derive(Debug, Clone, Deserialize)]
struct OlsTerm {
    #[serde(default)]
    obo_id: Option<String>,
    #[serde(default)]
    short_form: Option<String>,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    description: Option<Vec<String>>,
    #[serde(default)]
    synonyms: Option<Vec<String>>,
    #[serde(default)]
    is_defining_ontology: bool,
}

impl OlsTerm {
    fn curie(&self) -> Option<String> {
        if let Some(id) = self.obo_id.as_deref().filter(|s| !s.is_empty()) {
            return Some(id.to_string());
        }
        self.short_form
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|sf| sf.replacen('_', ":", 1))
    }

    fn is(&self, id: &str) -> bool {
        self.curie().as_deref() == Some(id)
    }
}

// ── Adapter ─────────────────────────────────────────────────────────────

/// Adapter over one OLS ontology, or all of them when `ontology` is `None`.
pub struct OlsAdapter {
    client: Client,
    base_url: String,
    search_rows: usize,
    ontology: Option<String>,
    /// Last term fetched by this handle, so one detail lookup is one request.
    last_term: Mutex<Option<(String, Option<OlsTerm>)>>,
}

impl OlsAdapter {
    pub fn new(client: Client, config: &OlsConfig, ontology: Option<String>) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            search_rows: config.search_rows,
            ontology,
            last_term: Mutex::new(None),
        }
    }

    /// Build a client with the configured request timeout.
    pub fn http_client(config: &OlsConfig) -> OntologyResult<Client> {
        Ok(Client::builder().timeout(config.timeout()).build()?)
    }

    pub fn ontology(&self) -> Option<&str> {
        self.ontology.as_deref()
    }

    /// Check the status, turning 404 into `None`.
    async fn check(response: Response) -> OntologyResult<Option<Response>> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(OntologyError::Status {
                service: SERVICE,
                status: status.as_u16(),
                body,
            });
        }
        Ok(Some(response))
    }

    /// The record for `id`, fetched once per adapter handle.
    async fn term(&self, id: &str) -> OntologyResult<Option<OlsTerm>> {
        let cached = self
            .last_term
            .lock()
            .unwrap()
            .as_ref()
            .filter(|(cached_id, _)| cached_id == id)
            .map(|(_, term)| term.clone());
        if let Some(term) = cached {
            return Ok(term);
        }
        let term = self.fetch_term(id).await?;
        *self.last_term.lock().unwrap() = Some((id.to_string(), term.clone()));
        Ok(term)
    }

    /// Fetch the record for a term, preferring the defining ontology's copy.
    /// Terms whose CURIE differs from `id` are ignored.
    async fn fetch_term(&self, id: &str) -> OntologyResult<Option<OlsTerm>> {
        if id.is_empty() {
            return Ok(None);
        }
        let url = match &self.ontology {
            Some(ns) => format!("{}/api/ontologies/{}/terms", self.base_url, ns),
            None => format!("{}/api/terms", self.base_url),
        };
        let response = self
            .client
            .get(url)
            .query(&[("obo_id", id)])
            .send()
            .await?;

        let Some(response) = Self::check(response).await? else {
            return Ok(None);
        };
        let envelope: TermsEnvelope = response
            .json()
            .await
            .map_err(|e| OntologyError::Parse(e.to_string()))?;

        let terms: Vec<OlsTerm> = envelope
            .embedded
            .map(|e| e.terms)
            .unwrap_or_default()
            .into_iter()
            .filter(|t| t.is(id))
            .collect();
        let chosen = terms
            .iter()
            .find(|t| t.is_defining_ontology)
            .or_else(|| terms.first())
            .cloned();
        Ok(chosen)
    }
}

#[async_trait]
impl OntologyAdapter for OlsAdapter {
    async fn basic_search(&self, text: &str) -> OntologyResult<Vec<(String, String)>> {
        self.search_up_to(text, 0).await
    }

    async fn search_up_to(&self, text: &str, wanted: usize) -> OntologyResult<Vec<(String, String)>> {
        let rows = self.search_rows.max(wanted).to_string();
        let mut query: Vec<(&str, &str)> = vec![("q", text), ("rows", rows.as_str()), ("start", "0")];
        if let Some(ns) = &self.ontology {
            query.push(("ontology", ns.as_str()));
        }

        let response = self
            .client
            .get(format!("{}/api/search", self.base_url))
            .query(&query)
            .send()
            .await?;
        let Some(response) = Self::check(response).await? else {
            return Err(OntologyError::NotFound(format!(
                "search endpoint for '{}'",
                self.ontology.as_deref().unwrap_or("all ontologies")
            )));
        };
        let envelope: SearchEnvelope = response
            .json()
            .await
            .map_err(|e| OntologyError::Parse(e.to_string()))?;

        // The same term shows up once per importing ontology; keep the first.
        let mut seen = HashSet::new();
        let hits = envelope
            .response
            .docs
            .into_iter()
            .filter_map(|doc| {
                let id = doc.identifier()?;
                let label = doc.label.unwrap_or_default();
                Some((id, label))
            })
            .filter(|(id, _)| seen.insert(id.clone()))
            .collect();
        Ok(hits)
    }

    async fn label(&self, id: &str) -> OntologyResult<Option<String>> {
        Ok(self.term(id).await?.and_then(|t| t.label))
    }

    async fn definition(&self, id: &str) -> OntologyResult<Option<String>> {
        Ok(self
            .term(id)
            .await?
            .and_then(|t| t.description)
            .and_then(|d| d.into_iter().next()))
    }

    async fn aliases(&self, id: &str) -> OntologyResult<AliasLookup> {
        let synonyms = self
            .term(id)
            .await?
            .and_then(|t| t.synonyms)
            .unwrap_or_default();
        Ok(AliasLookup::Supported(synonyms))
    }
}

/// OLS ontology IDs are short alphanumeric tokens (`mondo`, `hp`, `ncbitaxon`).
pub fn is_valid_ontology_id(ns: &str) -> bool {
    ns.chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}
