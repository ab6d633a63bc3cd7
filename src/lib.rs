//! oak-mcp: Ontology Term Tools over MCP
//!
//! Exposes ontology term search and term-detail lookup as Model Context
//! Protocol tools, backed by the EBI Ontology Lookup Service or local
//! semantic-sql SQLite stores.
//!
//! # Core Concepts
//!
//! - **Selectors**: `"<scheme>:<target>"` strings naming a backend, such as
//!   `ols:mondo` or `sqlite:obo:hgnc`
//! - **Adapters**: per-selector handles offering search, label, definition
//!   and (optionally) synonym lookup
//! - **Term tools**: handlers that reshape adapter output into fixed result
//!   shapes and never fail
//!
//! # Example
//!
//! ```no_run
//! use oak_mcp::{BackendRegistry, OakConfig, TermService};
//! use std::sync::Arc;
//!
//! # async fn demo() -> Result<(), oak_mcp::OntologyError> {
//! let registry = BackendRegistry::new(OakConfig::default())?;
//! let terms = TermService::new(Arc::new(registry));
//! let hits = terms.search("diabetes", Some("mondo"), 3).await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod mcp;
pub mod ontology;
pub mod terms;

pub use config::{ConfigError, OakConfig};
pub use ontology::{
    AdapterResolver, AliasLookup, BackendRegistry, OntologyAdapter, OntologyError, OntologyResult,
    Scheme, Selector,
};
pub use terms::{SearchHit, TermDetails, TermRecord, TermService};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
