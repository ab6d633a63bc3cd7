//! Local ontology backend over semantic-sql SQLite stores
//!
//! A semantic-sql store keeps every triple in a `statements` table; literal
//! objects live in `value`. Stores are opened read-only and never written.

use super::traits::{AliasLookup, OntologyAdapter, OntologyError, OntologyResult};
use async_trait::async_trait;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const LABEL: &str = "rdfs:label";
const DEFINITION: &str = "IAO:0000115";
const SYNONYM_PREDICATES: [&str; 4] = [
    "oio:hasExactSynonym",
    "oio:hasRelatedSynonym",
    "oio:hasBroadSynonym",
    "oio:hasNarrowSynonym",
];

/// Read-only adapter over one semantic-sql database file.
///
/// Thread-safe via internal mutex on the connection.
pub struct SqliteOntology {
    conn: Mutex<Connection>,
    path: PathBuf,
}

impl SqliteOntology {
    /// Open an existing store. Fails if the file is missing or lacks a
    /// `statements` table.
    pub fn open(path: impl AsRef<Path>) -> OntologyResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(OntologyError::unavailable(
                path.display(),
                "no such ontology store",
            ));
        }
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Self::from_connection(conn, path.to_path_buf())
    }

    fn from_connection(conn: Connection, path: PathBuf) -> OntologyResult<Self> {
        let has_statements: Option<String> = conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type IN ('table', 'view') AND name = 'statements'",
                [],
                |row| row.get(0),
            )
            .optional()?;
        if has_statements.is_none() {
            return Err(OntologyError::unavailable(
                path.display(),
                "not a semantic-sql store (missing statements table)",
            ));
        }
        Ok(Self {
            conn: Mutex::new(conn),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn first_value(&self, id: &str, predicate: &str) -> OntologyResult<Option<String>> {
        let conn = self.conn.lock().unwrap();
        let value = conn
            .query_row(
                "SELECT value FROM statements
                 WHERE subject = ?1 AND predicate = ?2 AND value IS NOT NULL
                 ORDER BY value LIMIT 1",
                params![id, predicate],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }
}

#[async_trait]
impl OntologyAdapter for SqliteOntology {
    async fn basic_search(&self, text: &str) -> OntologyResult<Vec<(String, String)>> {
        let conn = self.conn.lock().unwrap();
        let pattern = format!("%{}%", escape_like(text));
        // Terms may carry several labels; report the one `label()` returns.
        let mut stmt = conn.prepare(
            "SELECT l.subject, MIN(l.value)
             FROM statements l
             WHERE l.predicate = ?1
               AND l.value IS NOT NULL
               AND l.subject IN (
                   SELECT s.subject FROM statements s
                   WHERE s.predicate IN (?1, ?4, ?5, ?6, ?7)
                     AND s.value LIKE ?2 ESCAPE '\\')
             GROUP BY l.subject
             ORDER BY MAX(lower(l.value) = lower(?3)) DESC, l.subject",
        )?;
        let rows = stmt.query_map(
            params![
                LABEL,
                pattern,
                text,
                SYNONYM_PREDICATES[0],
                SYNONYM_PREDICATES[1],
                SYNONYM_PREDICATES[2],
                SYNONYM_PREDICATES[3],
            ],
            |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
        )?;
        let hits = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(hits)
    }

    async fn label(&self, id: &str) -> OntologyResult<Option<String>> {
        self.first_value(id, LABEL)
    }

    async fn definition(&self, id: &str) -> OntologyResult<Option<String>> {
        self.first_value(id, DEFINITION)
    }

    async fn aliases(&self, id: &str) -> OntologyResult<AliasLookup> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT DISTINCT value FROM statements
             WHERE subject = ?1 AND predicate IN (?2, ?3, ?4, ?5) AND value IS NOT NULL
             ORDER BY value",
        )?;
        let rows = stmt.query_map(
            params![
                id,
                SYNONYM_PREDICATES[0],
                SYNONYM_PREDICATES[1],
                SYNONYM_PREDICATES[2],
                SYNONYM_PREDICATES[3],
            ],
            |row| row.get::<_, String>(0),
        )?;
        let aliases = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(AliasLookup::Supported(aliases))
    }
}

/// Escape LIKE metacharacters so `text` matches literally under `ESCAPE '\'`.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
