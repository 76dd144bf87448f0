//! Contract with the database driver, plus the optional process-wide default.
//!
//! The builder never opens, closes or retries connections; it only hands a
//! rendered query to [`Connection::execute`] or [`Connection::execute_and_fetch`].

use std::collections::VecDeque;
use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::{Mutex, RwLock};

use crate::errors::CypherGraphError;
use crate::value::CypherValue;

/// One result row, column name to value.
pub type Record = AHashMap<String, CypherValue>;

/// Query parameters passed through to the driver.
pub type Parameters = AHashMap<String, CypherValue>;

/// Lazily produced result rows.
pub type Records<'a> = Box<dyn Iterator<Item = Result<Record, CypherGraphError>> + 'a>;

pub trait Connection {
    fn execute(&self, query: &str, parameters: &Parameters) -> Result<(), CypherGraphError>;

    fn execute_and_fetch(
        &self,
        query: &str,
        parameters: &Parameters,
    ) -> Result<Records<'_>, CypherGraphError>;
}

impl<'a, C> Connection for &'a C
where
    C: Connection + ?Sized,
{
    fn execute(&self, query: &str, parameters: &Parameters) -> Result<(), CypherGraphError> {
        (*self).execute(query, parameters)
    }

    fn execute_and_fetch(
        &self,
        query: &str,
        parameters: &Parameters,
    ) -> Result<Records<'_>, CypherGraphError> {
        (*self).execute_and_fetch(query, parameters)
    }
}

impl<C> Connection for Arc<C>
where
    C: Connection + ?Sized,
{
    fn execute(&self, query: &str, parameters: &Parameters) -> Result<(), CypherGraphError> {
        self.as_ref().execute(query, parameters)
    }

    fn execute_and_fetch(
        &self,
        query: &str,
        parameters: &Parameters,
    ) -> Result<Records<'_>, CypherGraphError> {
        self.as_ref().execute_and_fetch(query, parameters)
    }
}

/// What [`QueryBuilder::execute`](crate::QueryBuilder::execute) got back.
pub enum QueryOutcome<'c> {
    /// The query ran through `execute`; there is nothing to read.
    Executed,
    Records(Records<'c>),
}

impl<'c> QueryOutcome<'c> {
    pub fn is_fetch(&self) -> bool {
        matches!(self, QueryOutcome::Records(_))
    }

    pub fn into_records(self) -> Records<'c> {
        match self {
            QueryOutcome::Executed => Box::new(std::iter::empty()),
            QueryOutcome::Records(records) => records,
        }
    }

    pub fn collect_records(self) -> Result<Vec<Record>, CypherGraphError> {
        self.into_records().collect()
    }
}

impl std::fmt::Debug for QueryOutcome<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryOutcome::Executed => f.write_str("Executed"),
            QueryOutcome::Records(_) => f.write_str("Records(..)"),
        }
    }
}

pub type SharedConnection = Arc<dyn Connection + Send + Sync>;

static DEFAULT_CONNECTION: RwLock<Option<SharedConnection>> = parking_lot::const_rwlock(None);

/// Installs the connection used by [`QueryBuilder::from_default`](crate::QueryBuilder::from_default).
pub fn set_default_connection(connection: SharedConnection) {
    *DEFAULT_CONNECTION.write() = Some(connection);
}

pub fn clear_default_connection() {
    DEFAULT_CONNECTION.write().take();
}

pub fn default_connection() -> Result<SharedConnection, CypherGraphError> {
    DEFAULT_CONNECTION.read().clone().ok_or_else(|| {
        CypherGraphError::configuration("no default connection has been set")
    })
}

/// Builds a [`Record`] from column/value pairs.
pub fn record<I, K, V>(columns: I) -> Record
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<CypherValue>,
{
    columns
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecordedQuery {
    pub query: String,
    pub parameters: Parameters,
    pub fetched: bool,
}

/// In-memory [`Connection`] that remembers every query and replays queued rows.
///
/// ```rust
/// use cyphergraph::{QueryBuilder, RecordingConnection, record};
///
/// let conn = RecordingConnection::new();
/// conn.push_rows(vec![record([("n", 1)])]);
/// let value = QueryBuilder::new(&conn)
///     .match_(false)
///     .add_custom_cypher("(n) RETURN n")
///     .get_single("n")?;
/// assert_eq!(value, Some(1.into()));
/// assert_eq!(conn.queries(), vec!["MATCH (n) RETURN n".to_string()]);
/// # Ok::<(), cyphergraph::CypherGraphError>(())
/// ```
#[derive(Default)]
pub struct RecordingConnection {
    recorded: Mutex<Vec<RecordedQuery>>,
    responses: Mutex<VecDeque<Vec<Record>>>,
    failure: Mutex<Option<CypherGraphError>>,
}

impl RecordingConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows handed out by the next `execute_and_fetch`; later calls get the following batch.
    pub fn push_rows(&self, rows: Vec<Record>) {
        self.responses.lock().push_back(rows);
    }

    /// Makes the next call of either kind fail with `error`.
    pub fn fail_next(&self, error: CypherGraphError) {
        *self.failure.lock() = Some(error);
    }

    pub fn recorded(&self) -> Vec<RecordedQuery> {
        self.recorded.lock().clone()
    }

    pub fn queries(&self) -> Vec<String> {
        self.recorded
            .lock()
            .iter()
            .map(|entry| entry.query.clone())
            .collect()
    }

    pub fn last_query(&self) -> Option<String> {
        self.recorded.lock().last().map(|entry| entry.query.clone())
    }

    pub fn clear(&self) {
        self.recorded.lock().clear();
        self.responses.lock().clear();
    }

    fn record_call(
        &self,
        query: &str,
        parameters: &Parameters,
        fetched: bool,
    ) -> Result<(), CypherGraphError> {
        self.recorded.lock().push(RecordedQuery {
            query: query.to_string(),
            parameters: parameters.clone(),
            fetched,
        });
        match self.failure.lock().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl Connection for RecordingConnection {
    fn execute(&self, query: &str, parameters: &Parameters) -> Result<(), CypherGraphError> {
        self.record_call(query, parameters, false)
    }

    fn execute_and_fetch(
        &self,
        query: &str,
        parameters: &Parameters,
    ) -> Result<Records<'_>, CypherGraphError> {
        self.record_call(query, parameters, true)?;
        let rows = self.responses.lock().pop_front().unwrap_or_default();
        Ok(Box::new(rows.into_iter().map(Ok)))
    }
}
