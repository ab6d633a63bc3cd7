//! Selector-driven search against local semantic-sql stores.

use oak_mcp::{AdapterResolver, BackendRegistry, OakConfig, Selector, TermService};
use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;

fn write_hgnc_store(dir: &Path) {
    let conn = Connection::open(dir.join("hgnc.db")).unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE statements (
            stanza TEXT, subject TEXT, predicate TEXT,
            object TEXT, value TEXT, datatype TEXT, language TEXT
        );
        INSERT INTO statements (subject, predicate, value) VALUES
            ('HGNC:1100', 'rdfs:label', 'BRCA1'),
            ('HGNC:1100', 'oio:hasExactSynonym', 'breast cancer 1'),
            ('HGNC:1100', 'IAO:0000115', 'BRCA1 DNA repair associated'),
            ('HGNC:1101', 'rdfs:label', 'BRCA2'),
            ('HGNC:1101', 'oio:hasExactSynonym', 'breast cancer 2'),
            ('HGNC:11998', 'rdfs:label', 'TP53');
        "#,
    )
    .unwrap();
}

fn registry(dir: &Path) -> BackendRegistry {
    let mut config = OakConfig::default();
    config.local.data_dir = dir.to_path_buf();
    BackendRegistry::new(config).unwrap()
}

#[tokio::test]
async fn obo_selector_searches_store_in_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    write_hgnc_store(dir.path());
    let terms = TermService::new(Arc::new(registry(dir.path())));

    let pairs = terms
        .search_selector("brca", "sqlite:obo:hgnc", 10)
        .await
        .unwrap();
    assert_eq!(
        pairs,
        vec![
            ("HGNC:1100".to_string(), "BRCA1".to_string()),
            ("HGNC:1101".to_string(), "BRCA2".to_string()),
        ]
    );
}

#[tokio::test]
async fn selector_search_truncates() {
    let dir = tempfile::tempdir().unwrap();
    write_hgnc_store(dir.path());
    let terms = TermService::new(Arc::new(registry(dir.path())));

    let pairs = terms
        .search_selector("breast cancer", "sqlite:obo:hgnc", 1)
        .await
        .unwrap();
    assert_eq!(pairs, vec![("HGNC:1100".to_string(), "BRCA1".to_string())]);
}

#[tokio::test]
async fn path_selector_opens_store_directly() {
    let dir = tempfile::tempdir().unwrap();
    write_hgnc_store(dir.path());
    let reg = registry(Path::new("/nonexistent"));

    let selector: Selector = format!("sqlite:{}", dir.path().join("hgnc.db").display())
        .parse()
        .unwrap();
    let adapter = reg.resolve(&selector).await.unwrap();

    assert_eq!(adapter.label("HGNC:11998").await.unwrap().as_deref(), Some("TP53"));
    assert_eq!(
        adapter.definition("HGNC:1100").await.unwrap().as_deref(),
        Some("BRCA1 DNA repair associated")
    );
    assert_eq!(
        adapter.aliases("HGNC:1101").await.unwrap().into_vec(),
        vec!["breast cancer 2".to_string()]
    );
}

#[tokio::test]
async fn missing_store_yields_none() {
    let dir = tempfile::tempdir().unwrap();
    let terms = TermService::new(Arc::new(registry(dir.path())));

    assert!(terms
        .search_selector("brca", "sqlite:obo:hgnc", 10)
        .await
        .is_none());
}
