use thiserror::Error;

/// Error type for query construction, value encoding and execution.
#[derive(Debug, Error)]
pub enum CypherGraphError {
    #[error("invalid chain: {0}")]
    InvalidChain(String),
    #[error("{clause}: either `literal` or `expression` must be provided")]
    MissingLiteralOrExpression { clause: String },
    #[error("{clause}: `literal` and `expression` cannot both be provided")]
    ConflictingLiteralAndExpression { clause: String },
    #[error("unsupported result spec: {0}")]
    UnsupportedResultSpec(String),
    #[error("invalid order spec: {0}")]
    InvalidOrderSpec(String),
    #[error("invalid operator: {0}")]
    InvalidOperator(String),
    #[error("invalid subgraph: {0}")]
    InvalidSubgraph(String),
    #[error("value encoding error: {0}")]
    ValueEncoding(String),
    #[error("unsupported feature: {0}")]
    UnsupportedFeature(String),
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("connection error: {0}")]
    Connection(String),
    #[error("query error: {0}")]
    Query(String),
}

impl CypherGraphError {
    pub fn invalid_chain<T: Into<String>>(msg: T) -> Self {
        CypherGraphError::InvalidChain(msg.into())
    }

    pub fn missing_operand<T: Into<String>>(clause: T) -> Self {
        CypherGraphError::MissingLiteralOrExpression {
            clause: clause.into(),
        }
    }

    pub fn conflicting_operand<T: Into<String>>(clause: T) -> Self {
        CypherGraphError::ConflictingLiteralAndExpression {
            clause: clause.into(),
        }
    }

    pub fn result_spec<T: Into<String>>(msg: T) -> Self {
        CypherGraphError::UnsupportedResultSpec(msg.into())
    }

    pub fn order_spec<T: Into<String>>(msg: T) -> Self {
        CypherGraphError::InvalidOrderSpec(msg.into())
    }

    pub fn operator<T: Into<String>>(msg: T) -> Self {
        CypherGraphError::InvalidOperator(msg.into())
    }

    pub fn subgraph<T: Into<String>>(msg: T) -> Self {
        CypherGraphError::InvalidSubgraph(msg.into())
    }

    pub fn encoding<T: Into<String>>(msg: T) -> Self {
        CypherGraphError::ValueEncoding(msg.into())
    }

    pub fn unsupported<T: Into<String>>(msg: T) -> Self {
        CypherGraphError::UnsupportedFeature(msg.into())
    }

    pub fn configuration<T: Into<String>>(msg: T) -> Self {
        CypherGraphError::Configuration(msg.into())
    }

    pub fn connection<T: Into<String>>(msg: T) -> Self {
        CypherGraphError::Connection(msg.into())
    }

    pub fn query<T: Into<String>>(msg: T) -> Self {
        CypherGraphError::Query(msg.into())
    }
}
