//! Configuration for the target Cypher dialect and the value codec.
//!
//! A [`BuilderConfig`] travels with every [`QueryBuilder`](crate::QueryBuilder)
//! and decides two things: which dialect-specific clauses are allowed, and how
//! edge-case values (NaN floats, booleans) are written as literals.

use serde::{Deserialize, Serialize};

use crate::CypherGraphError;

/// Target database dialect.
///
/// # Default Behavior
///
/// The default dialect is [`Dialect::Memgraph`], which accepts the full clause
/// set including `LOAD CSV`, `project()` subgraphs and traversal algorithms.
///
/// # Examples
///
/// ```rust
/// use cyphergraph::{BuilderConfig, Dialect};
///
/// let cfg = BuilderConfig::memgraph();
/// assert_eq!(cfg.dialect, Dialect::Memgraph);
///
/// let cfg = BuilderConfig::neo4j();
/// assert_eq!(cfg.dialect, Dialect::Neo4j);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Memgraph-flavoured openCypher
    ///
    /// **Supports:**
    /// - `LOAD CSV FROM ... AS row`
    /// - `MATCH p=... WITH project(p) AS graph` subgraph projection
    /// - `*BFS`, `*`, `*WSHORTEST`, `*ALLSHORTEST` relationship quantifiers
    #[default]
    Memgraph,

    /// Neo4j openCypher
    ///
    /// Memgraph-only clauses are rejected with
    /// [`CypherGraphError::UnsupportedFeature`] at the builder call site.
    Neo4j,
}

impl Dialect {
    pub fn name(&self) -> &'static str {
        match self {
            Dialect::Memgraph => "memgraph",
            Dialect::Neo4j => "neo4j",
        }
    }

    pub fn supports_load_csv(&self) -> bool {
        matches!(self, Dialect::Memgraph)
    }

    pub fn supports_projection(&self) -> bool {
        matches!(self, Dialect::Memgraph)
    }

    pub fn supports_traversal_algorithms(&self) -> bool {
        matches!(self, Dialect::Memgraph)
    }
}

/// What the codec does with NaN and infinite floats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NanPolicy {
    /// Fail with [`CypherGraphError::ValueEncoding`].
    #[default]
    Reject,
    /// Write `null`, which removes the property when used in `SET`.
    Null,
}

/// Spelling of boolean literals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BooleanStyle {
    /// `True` / `False`
    #[default]
    Capitalized,
    /// `true` / `false`
    Lowercase,
}

/// Codec options.
///
/// # Default Configuration
///
/// ```rust
/// use cyphergraph::{BooleanStyle, CodecConfig, NanPolicy};
/// let config = CodecConfig::default();
/// assert_eq!(config.nan_policy, NanPolicy::Reject);
/// assert_eq!(config.boolean_style, BooleanStyle::Capitalized);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub nan_policy: NanPolicy,
    pub boolean_style: BooleanStyle,
}

impl CodecConfig {
    /// Lowercase booleans and `null` for NaN.
    pub fn strict_cypher() -> Self {
        Self {
            nan_policy: NanPolicy::Null,
            boolean_style: BooleanStyle::Lowercase,
        }
    }
}

/// Complete builder configuration.
///
/// # Examples
///
/// ```rust
/// use cyphergraph::{BuilderConfig, Dialect, NanPolicy};
///
/// let cfg = BuilderConfig::from_json_str(
///     r#"{"dialect": "neo4j", "codec": {"nan_policy": "null"}}"#,
/// )?;
/// assert_eq!(cfg.dialect, Dialect::Neo4j);
/// assert_eq!(cfg.codec.nan_policy, NanPolicy::Null);
/// # Ok::<(), cyphergraph::CypherGraphError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    pub dialect: Dialect,
    pub codec: CodecConfig,
}

impl BuilderConfig {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            codec: CodecConfig::default(),
        }
    }

    pub fn memgraph() -> Self {
        Self::new(Dialect::Memgraph)
    }

    pub fn neo4j() -> Self {
        Self::new(Dialect::Neo4j)
    }

    pub fn with_codec(mut self, codec: CodecConfig) -> Self {
        self.codec = codec;
        self
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CypherGraphError> {
        serde_json::from_str(raw)
            .map_err(|e| CypherGraphError::configuration(format!("invalid builder config: {e}")))
    }

    pub fn to_json_string(&self) -> Result<String, CypherGraphError> {
        serde_json::to_string(self).map_err(|e| CypherGraphError::configuration(e.to_string()))
    }

    /// Fails with `UnsupportedFeature` unless `supported` holds for this dialect.
    pub(crate) fn require(&self, supported: bool, feature: &str) -> Result<(), CypherGraphError> {
        if supported {
            Ok(())
        } else {
            Err(CypherGraphError::unsupported(format!(
                "{feature} is not supported by the {} dialect",
                self.dialect.name()
            )))
        }
    }
}
