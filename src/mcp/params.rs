//! MCP tool parameter structs with schemars-derived JSON schemas.

use schemars::JsonSchema;
use serde::Deserialize;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchParams {
    #[serde(alias = "text")]
    #[schemars(description = "Free-text term to search for, e.g. 'diabetes' or 'heart defect'")]
    pub term: String,
    #[serde(alias = "namespace")]
    #[schemars(
        description = "Ontology namespace to search, e.g. 'mondo', 'hp', 'go', 'chebi', 'uberon', 'cl'. Omit to search across all ontologies"
    )]
    pub ontology_id: Option<String>,
    #[serde(alias = "limit")]
    #[schemars(
        description = "Maximum number of results (default 10). 0 disables truncation but returns at most one OLS page (100 hits by default)"
    )]
    pub n: Option<usize>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct TermDetailsParams {
    #[schemars(description = "Term identifier (CURIE), e.g. 'MONDO:0005148'")]
    pub term_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchOntologyParams {
    #[schemars(description = "The term to search for")]
    pub term: String,
    #[schemars(
        description = "Backend selector: 'ols:<ontology>' (e.g. 'ols:mondo', 'ols:hp') or 'sqlite:obo:<ontology>' for a local store (e.g. 'sqlite:obo:hgnc')"
    )]
    pub ontology: String,
    #[schemars(
        description = "Maximum number of results (default 10). 0 disables truncation but returns at most one OLS page (100 hits by default)"
    )]
    pub n: Option<usize>,
}
