//! In-memory ontology backend for handler tests
//!
//! Terms are kept in insertion order, which doubles as relevancy order for
//! `basic_search`. Resolution is keyed on the selector's target.

use async_trait::async_trait;
use oak_mcp::{
    AdapterResolver, AliasLookup, OntologyAdapter, OntologyError, OntologyResult, Selector,
};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub struct FakeTerm {
    pub id: String,
    pub label: String,
    pub definition: Option<String>,
    pub synonyms: Vec<String>,
}

pub fn term(id: &str, label: &str) -> FakeTerm {
    FakeTerm {
        id: id.to_string(),
        label: label.to_string(),
        definition: None,
        synonyms: Vec::new(),
    }
}

impl FakeTerm {
    pub fn with_definition(mut self, def: &str) -> Self {
        self.definition = Some(def.to_string());
        self
    }

    pub fn with_synonyms(mut self, synonyms: &[&str]) -> Self {
        self.synonyms = synonyms.iter().map(|s| s.to_string()).collect();
        self
    }
}

/// One backend's worth of terms.
#[derive(Debug, Clone, Default)]
pub struct FakeOntology {
    terms: Vec<FakeTerm>,
    supports_aliases: bool,
    failing_search: bool,
    failing_definition: bool,
    failing_aliases: bool,
}

impl FakeOntology {
    pub fn new(terms: Vec<FakeTerm>) -> Self {
        Self {
            terms,
            supports_aliases: true,
            ..Self::default()
        }
    }

    pub fn without_aliases(mut self) -> Self {
        self.supports_aliases = false;
        self
    }

    pub fn failing_search(mut self) -> Self {
        self.failing_search = true;
        self
    }

    pub fn failing_definition(mut self) -> Self {
        self.failing_definition = true;
        self
    }

    pub fn failing_aliases(mut self) -> Self {
        self.failing_aliases = true;
        self
    }

    fn find(&self, id: &str) -> Option<&FakeTerm> {
        self.terms.iter().find(|t| t.id == id)
    }
}

#[async_trait]
impl OntologyAdapter for FakeOntology {
    async fn basic_search(&self, text: &str) -> OntologyResult<Vec<(String, String)>> {
        if self.failing_search {
            return Err(OntologyError::Parse("connection reset".to_string()));
        }
        let needle = text.to_lowercase();
        Ok(self
            .terms
            .iter()
            .filter(|t| t.label.to_lowercase().contains(&needle))
            .map(|t| (t.id.clone(), t.label.clone()))
            .collect())
    }

    async fn label(&self, id: &str) -> OntologyResult<Option<String>> {
        Ok(self.find(id).map(|t| t.label.clone()))
    }

    async fn definition(&self, id: &str) -> OntologyResult<Option<String>> {
        if self.failing_definition {
            return Err(OntologyError::Parse("truncated definition payload".to_string()));
        }
        Ok(self.find(id).and_then(|t| t.definition.clone()))
    }

    async fn aliases(&self, id: &str) -> OntologyResult<AliasLookup> {
        if self.failing_aliases {
            return Err(OntologyError::Parse("connection reset".to_string()));
        }
        if !self.supports_aliases {
            return Ok(AliasLookup::Unsupported);
        }
        Ok(AliasLookup::Supported(
            self.find(id).map(|t| t.synonyms.clone()).unwrap_or_default(),
        ))
    }
}

/// Resolver over named fake backends.
///
/// `ols:<ns>` resolves the backend registered under `<ns>`; `ols:` resolves
/// a backend holding every registered term. Like OLS, unknown namespaces
/// resolve to an empty backend unless marked unavailable. Every requested
/// selector is recorded.
#[derive(Default)]
pub struct FakeResolver {
    backends: HashMap<String, FakeOntology>,
    cross: Option<FakeOntology>,
    unavailable: HashSet<String>,
    requested: Mutex<Vec<String>>,
    resolves: AtomicUsize,
}

impl FakeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_backend(mut self, namespace: &str, ontology: FakeOntology) -> Self {
        self.backends.insert(namespace.to_string(), ontology);
        self
    }

    /// Backend answering cross-namespace (`ols:`) selectors.
    pub fn with_cross(mut self, ontology: FakeOntology) -> Self {
        self.cross = Some(ontology);
        self
    }

    /// Make selectors for `namespace` fail to resolve.
    pub fn with_unavailable(mut self, namespace: &str) -> Self {
        self.unavailable.insert(namespace.to_string());
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }

    pub fn resolve_count(&self) -> usize {
        self.resolves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AdapterResolver for FakeResolver {
    async fn resolve(&self, selector: &Selector) -> OntologyResult<Box<dyn OntologyAdapter>> {
        self.resolves.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(selector.to_string());

        let backend = match selector.namespace() {
            None => self.cross.clone().unwrap_or_default(),
            Some(ns) => {
                let ns = ns.to_lowercase();
                if self.unavailable.contains(&ns) {
                    return Err(OntologyError::unavailable(selector, "service unreachable"));
                }
                self.backends.get(&ns).cloned().unwrap_or_default()
            }
        };
        Ok(Box::new(backend))
    }
}

/// A small MONDO/HP/UBERON corpus.
pub fn biomedical_resolver() -> Arc<FakeResolver> {
    let mondo = vec![
        term("MONDO:0005015", "diabetes mellitus")
            .with_definition("A metabolic disease characterized by chronic hyperglycemia.")
            .with_synonyms(&["diabetes"]),
        term("MONDO:0005148", "type 2 diabetes mellitus").with_synonyms(&["T2DM", "NIDDM"]),
        term("MONDO:0005147", "type 1 diabetes mellitus"),
        term("MONDO:0011027", "maturity-onset diabetes of the young"),
        term("MONDO:0004992", "cancer"),
        term("MONDO:0005560", "brain disease"),
    ];
    let hp = vec![
        term("HP:0001627", "Abnormal heart morphology").with_synonyms(&["heart defect"]),
        term("HP:0001629", "Ventricular septal defect"),
        term("HP:0030680", "Abnormal cardiovascular system morphology"),
    ];
    let uberon = vec![term("UBERON:0000955", "brain"), term("UBERON:0002298", "brainstem")];

    let mut all = Vec::new();
    all.extend(uberon.iter().cloned());
    all.extend(mondo.iter().cloned());
    all.extend(hp.iter().cloned());

    Arc::new(
        FakeResolver::new()
            .with_backend("mondo", FakeOntology::new(mondo))
            .with_backend("hp", FakeOntology::new(hp).without_aliases())
            .with_backend("uberon", FakeOntology::new(uberon))
            .with_cross(FakeOntology::new(all)),
    )
}
