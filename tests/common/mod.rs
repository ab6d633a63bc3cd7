//! Shared fixtures for the term tool harnesses.

pub mod fake_ontology;

#[allow(unused_imports)]
pub use fake_ontology::{biomedical_resolver, term, FakeOntology, FakeResolver, FakeTerm};
