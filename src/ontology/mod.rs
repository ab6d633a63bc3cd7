//! Ontology backends
//!
//! Handlers talk to ontologies through the `OntologyAdapter` trait. A
//! selector string picks the backend; the `BackendRegistry` turns it into an
//! adapter handle.

mod ols;
mod registry;
mod selector;
mod sqlite;
mod traits;

pub use ols::OlsAdapter;
pub use registry::BackendRegistry;
pub use selector::{Scheme, Selector};
pub use sqlite::SqliteOntology;
pub use traits::{AdapterResolver, AliasLookup, OntologyAdapter, OntologyError, OntologyResult};
