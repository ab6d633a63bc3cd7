//! Adapter selectors: `"<scheme>:<target>"` strings naming a backend.
//!
//! `ols:mondo` targets one OLS ontology, `ols:` searches across all of them,
//! `sqlite:obo:hgnc` and `sqlite:/path/to/store.db` name local stores.

use super::traits::OntologyError;
use std::fmt;
use std::str::FromStr;

/// The closed set of backend schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// EBI Ontology Lookup Service
    Ols,
    /// Local semantic-sql SQLite store
    Sqlite,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ols => "ols",
            Self::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A backend scheme plus its target (namespace or store location).
///
/// An empty target means "all namespaces under this scheme".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector {
    scheme: Scheme,
    target: String,
}

impl Selector {
    pub fn new(scheme: Scheme, target: impl Into<String>) -> Self {
        Self {
            scheme,
            target: target.into(),
        }
    }

    /// Selector spanning every namespace of a scheme.
    pub fn all(scheme: Scheme) -> Self {
        Self::new(scheme, "")
    }

    /// Selector for an optional namespace; `None` spans every namespace.
    pub fn for_namespace(scheme: Scheme, namespace: Option<&str>) -> Self {
        Self::new(scheme, namespace.unwrap_or_default())
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// The bound namespace, `None` for cross-namespace selectors.
    pub fn namespace(&self) -> Option<&str> {
        if self.target.is_empty() {
            None
        } else {
            Some(&self.target)
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.scheme, self.target)
    }
}

impl FromStr for Selector {
    type Err = OntologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (scheme, target) = s
            .split_once(':')
            .ok_or_else(|| OntologyError::unavailable(s, "selector has no scheme prefix"))?;
        let scheme = match scheme.to_ascii_lowercase().as_str() {
            "ols" => Scheme::Ols,
            "sqlite" => Scheme::Sqlite,
            other => {
                return Err(OntologyError::unavailable(
                    s,
                    format!("unknown backend scheme '{}'", other),
                ))
            }
        };
        Ok(Self::new(scheme, target))
    }
}
