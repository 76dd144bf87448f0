//! Fluent query composer.
//!
//! Each chained call appends one [`PartialQuery`] and hands the builder back.
//! Nothing touches the database until [`QueryBuilder::execute`] or
//! [`QueryBuilder::get_single`].

use std::fmt::Display;

use tracing::debug;

use crate::algorithm::IntegratedAlgorithm;
use crate::codec::{CallArguments, LabelSpec, render_call_arguments, render_labels, render_properties};
use crate::config::BuilderConfig;
use crate::connection::{Connection, Parameters, QueryOutcome, SharedConnection, default_connection};
use crate::errors::CypherGraphError;
use crate::mapped::{MappedNode, MappedRelationship};
use crate::partial::{
    Connective, Direction, IntoOperator, IntoOrderItem, Operand, PartialQuery, QueryKind,
    ResultSpec,
};
use crate::projection::{GRAPH_VARIABLE, PATH_VARIABLE, SubgraphProjection};
use crate::value::{CypherValue, Properties};

/// Inputs for a `(var:Label {props})` pattern.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodePattern {
    pub variable: Option<String>,
    pub labels: LabelSpec,
    pub properties: Properties,
}

impl NodePattern {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn labeled<L: Into<LabelSpec>>(labels: L) -> Self {
        Self {
            labels: labels.into(),
            ..Self::default()
        }
    }

    pub fn variable<T: Into<String>>(mut self, variable: T) -> Self {
        self.variable = Some(variable.into());
        self
    }

    pub fn labels<L: Into<LabelSpec>>(mut self, labels: L) -> Self {
        self.labels = labels.into();
        self
    }

    pub fn property<K: Into<String>, V: Into<CypherValue>>(mut self, key: K, value: V) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }
}

/// Inputs for a `-[var:TYPE algorithm {props}]-` pattern.
#[derive(Clone, Debug, PartialEq)]
pub struct RelationshipPattern {
    pub variable: Option<String>,
    pub relationship_type: Option<String>,
    pub properties: Properties,
    pub directed: bool,
    pub algorithm: Option<IntegratedAlgorithm>,
}

impl Default for RelationshipPattern {
    fn default() -> Self {
        Self {
            variable: None,
            relationship_type: None,
            properties: Properties::new(),
            directed: true,
            algorithm: None,
        }
    }
}

impl RelationshipPattern {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn typed<T: Into<String>>(relationship_type: T) -> Self {
        Self {
            relationship_type: Some(relationship_type.into()),
            ..Self::default()
        }
    }

    pub fn variable<T: Into<String>>(mut self, variable: T) -> Self {
        self.variable = Some(variable.into());
        self
    }

    pub fn property<K: Into<String>, V: Into<CypherValue>>(mut self, key: K, value: V) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    pub fn directed(mut self, directed: bool) -> Self {
        self.directed = directed;
        self
    }

    pub fn undirected(self) -> Self {
        self.directed(false)
    }

    pub fn algorithm<A: Into<IntegratedAlgorithm>>(mut self, algorithm: A) -> Self {
        self.algorithm = Some(algorithm.into());
        self
    }
}

impl From<&str> for RelationshipPattern {
    fn from(relationship_type: &str) -> Self {
        RelationshipPattern::typed(relationship_type)
    }
}

impl From<String> for RelationshipPattern {
    fn from(relationship_type: String) -> Self {
        RelationshipPattern::typed(relationship_type)
    }
}

impl From<()> for RelationshipPattern {
    fn from(_: ()) -> Self {
        RelationshipPattern::new()
    }
}

/// Chained builder over an ordered, append-only fragment sequence.
///
/// ```rust
/// use cyphergraph::{NodePattern, QueryBuilder, RecordingConnection};
///
/// let conn = RecordingConnection::new();
/// let query = QueryBuilder::new(&conn)
///     .match_(false)
///     .node(NodePattern::labeled("L1").variable("n"))?
///     .to("TO")?
///     .node(NodePattern::labeled("L2"))?
///     .return_(())
///     .construct_query();
/// assert_eq!(query, "MATCH (n:L1)-[:TO]->(:L2) RETURN *");
/// # Ok::<(), cyphergraph::CypherGraphError>(())
/// ```
pub struct QueryBuilder<C: Connection> {
    connection: C,
    config: BuilderConfig,
    parameters: Parameters,
    query: Vec<PartialQuery>,
    fetch_results: bool,
}

impl<C: Connection> std::fmt::Debug for QueryBuilder<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryBuilder")
            .field("config", &self.config)
            .field("query", &self.query)
            .field("fetch_results", &self.fetch_results)
            .finish_non_exhaustive()
    }
}

impl QueryBuilder<SharedConnection> {
    /// Builder over the connection installed with
    /// [`set_default_connection`](crate::set_default_connection).
    pub fn from_default() -> Result<Self, CypherGraphError> {
        Ok(Self::new(default_connection()?))
    }
}

impl<C: Connection> QueryBuilder<C> {
    pub fn new(connection: C) -> Self {
        Self::with_config(connection, BuilderConfig::memgraph())
    }

    pub fn neo4j(connection: C) -> Self {
        Self::with_config(connection, BuilderConfig::neo4j())
    }

    pub fn with_config(connection: C, config: BuilderConfig) -> Self {
        Self {
            connection,
            config,
            parameters: Parameters::new(),
            query: Vec::new(),
            fetch_results: false,
        }
    }

    pub fn new_match(connection: C, optional: bool) -> Self {
        Self::new(connection).match_(optional)
    }

    pub fn new_create(connection: C) -> Self {
        Self::new(connection).create()
    }

    pub fn new_merge(connection: C) -> Self {
        Self::new(connection).merge()
    }

    pub fn new_call<A: Into<CallArguments>>(
        connection: C,
        procedure: &str,
        arguments: A,
    ) -> Result<Self, CypherGraphError> {
        Self::new(connection).call(procedure, arguments)
    }

    pub fn new_unwind(connection: C, list_expression: &str, variable: &str) -> Self {
        Self::new(connection).unwind(list_expression, variable)
    }

    pub fn new_with<R: Into<ResultSpec>>(connection: C, results: R) -> Self {
        Self::new(connection).with_(results)
    }

    pub fn new_foreach<I, T>(connection: C, variable: &str, expression: &str, update_clauses: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::new(connection).foreach(variable, expression, update_clauses)
    }

    pub fn new_return<R: Into<ResultSpec>>(connection: C, results: R) -> Self {
        Self::new(connection).return_(results)
    }

    pub fn new_load_csv(
        connection: C,
        path: &str,
        header: bool,
        row: &str,
    ) -> Result<Self, CypherGraphError> {
        Self::new(connection).load_csv(path, header, row)
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn connection(&self) -> &C {
        &self.connection
    }

    pub fn partial_queries(&self) -> &[PartialQuery] {
        &self.query
    }

    pub fn fetches_results(&self) -> bool {
        self.fetch_results
    }

    /// Adds a `$name` parameter sent along with the query.
    pub fn parameter<K: Into<String>, V: Into<CypherValue>>(mut self, name: K, value: V) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    pub fn match_(self, optional: bool) -> Self {
        self.push(PartialQuery::Match { optional })
    }

    pub fn merge(self) -> Self {
        self.push(PartialQuery::Merge)
    }

    pub fn create(self) -> Self {
        self.push(PartialQuery::Create)
    }

    pub fn node(self, pattern: NodePattern) -> Result<Self, CypherGraphError> {
        self.ensure_not_after(QueryKind::Node)?;
        let labels = render_labels(&pattern.labels);
        let properties = render_properties(&pattern.properties, &self.config.codec)?;
        Ok(self.push(PartialQuery::Node {
            variable: pattern.variable,
            labels,
            properties,
        }))
    }

    pub fn mapped_node<N>(self, object: &N, variable: Option<&str>) -> Result<Self, CypherGraphError>
    where
        N: MappedNode + ?Sized,
    {
        let mut pattern = NodePattern::labeled(object.labels()).properties(object.properties());
        pattern.variable = variable.map(str::to_string);
        self.node(pattern)
    }

    pub fn to<R: Into<RelationshipPattern>>(self, pattern: R) -> Result<Self, CypherGraphError> {
        let pattern = pattern.into();
        let direction = if pattern.directed {
            Direction::Right
        } else {
            Direction::Undirected
        };
        self.relationship(pattern, direction)
    }

    pub fn from_<R: Into<RelationshipPattern>>(self, pattern: R) -> Result<Self, CypherGraphError> {
        let pattern = pattern.into();
        let direction = if pattern.directed {
            Direction::Left
        } else {
            Direction::Undirected
        };
        self.relationship(pattern, direction)
    }

    pub fn mapped_to<R>(self, object: &R, variable: Option<&str>) -> Result<Self, CypherGraphError>
    where
        R: MappedRelationship + ?Sized,
    {
        self.to(mapped_relationship_pattern(object, variable))
    }

    pub fn mapped_from<R>(self, object: &R, variable: Option<&str>) -> Result<Self, CypherGraphError>
    where
        R: MappedRelationship + ?Sized,
    {
        self.from_(mapped_relationship_pattern(object, variable))
    }

    pub fn where_<O: IntoOperator>(
        self,
        item: &str,
        operator: O,
        operand: Operand,
    ) -> Result<Self, CypherGraphError> {
        self.push_where(Connective::Where, false, item, operator, operand)
    }

    pub fn where_not<O: IntoOperator>(
        self,
        item: &str,
        operator: O,
        operand: Operand,
    ) -> Result<Self, CypherGraphError> {
        self.push_where(Connective::Where, true, item, operator, operand)
    }

    pub fn and_where<O: IntoOperator>(
        self,
        item: &str,
        operator: O,
        operand: Operand,
    ) -> Result<Self, CypherGraphError> {
        self.push_where(Connective::And, false, item, operator, operand)
    }

    pub fn and_not_where<O: IntoOperator>(
        self,
        item: &str,
        operator: O,
        operand: Operand,
    ) -> Result<Self, CypherGraphError> {
        self.push_where(Connective::And, true, item, operator, operand)
    }

    pub fn or_where<O: IntoOperator>(
        self,
        item: &str,
        operator: O,
        operand: Operand,
    ) -> Result<Self, CypherGraphError> {
        self.push_where(Connective::Or, false, item, operator, operand)
    }

    pub fn or_not_where<O: IntoOperator>(
        self,
        item: &str,
        operator: O,
        operand: Operand,
    ) -> Result<Self, CypherGraphError> {
        self.push_where(Connective::Or, true, item, operator, operand)
    }

    pub fn xor_where<O: IntoOperator>(
        self,
        item: &str,
        operator: O,
        operand: Operand,
    ) -> Result<Self, CypherGraphError> {
        self.push_where(Connective::Xor, false, item, operator, operand)
    }

    pub fn xor_not_where<O: IntoOperator>(
        self,
        item: &str,
        operator: O,
        operand: Operand,
    ) -> Result<Self, CypherGraphError> {
        self.push_where(Connective::Xor, true, item, operator, operand)
    }

    pub fn unwind(self, list_expression: &str, variable: &str) -> Self {
        self.push(PartialQuery::Unwind {
            list_expression: list_expression.to_string(),
            variable: variable.to_string(),
        })
    }

    pub fn with_<R: Into<ResultSpec>>(self, results: R) -> Self {
        self.push(PartialQuery::With(results.into()))
    }

    pub fn union(self, include_duplicates: bool) -> Self {
        self.push(PartialQuery::Union { include_duplicates })
    }

    pub fn delete<I, T>(self, items: I, detach: bool) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.push(PartialQuery::Delete {
            items: items.into_iter().map(Into::into).collect(),
            detach,
        })
    }

    pub fn remove<I, T>(self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.push(PartialQuery::Remove {
            items: items.into_iter().map(Into::into).collect(),
        })
    }

    pub fn yield_<R: Into<ResultSpec>>(self, results: R) -> Self {
        self.push(PartialQuery::Yield(results.into()))
    }

    pub fn return_<R: Into<ResultSpec>>(mut self, results: R) -> Self {
        self.fetch_results = true;
        self.push(PartialQuery::Return(results.into()))
    }

    pub fn order_by<I, T>(self, properties: I) -> Result<Self, CypherGraphError>
    where
        I: IntoIterator<Item = T>,
        T: IntoOrderItem,
    {
        let items = properties
            .into_iter()
            .map(IntoOrderItem::into_order_item)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.push(PartialQuery::OrderBy(items)))
    }

    pub fn limit<T: Display>(self, limit: T) -> Self {
        self.push(PartialQuery::Limit(limit.to_string()))
    }

    pub fn skip<T: Display>(self, skip: T) -> Self {
        self.push(PartialQuery::Skip(skip.to_string()))
    }

    /// `FOREACH ( var IN expr | clause clause ... )`; clauses are usually
    /// another builder's [`construct_query`](Self::construct_query).
    pub fn foreach<I, T>(self, variable: &str, expression: &str, update_clauses: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let clauses: Vec<String> = update_clauses.into_iter().map(Into::into).collect();
        self.push(PartialQuery::Foreach {
            variable: variable.to_string(),
            expression: expression.to_string(),
            update_clauses: clauses.join(" "),
        })
    }

    pub fn set_<O: IntoOperator>(
        self,
        item: &str,
        operator: O,
        operand: Operand,
    ) -> Result<Self, CypherGraphError> {
        let operator = operator.into_operator()?;
        let value = operand.render("SET", &self.config.codec)?;
        Ok(self.push(PartialQuery::Set {
            item: item.to_string(),
            operator,
            value,
        }))
    }

    pub fn call<A: Into<CallArguments>>(
        self,
        procedure: &str,
        arguments: A,
    ) -> Result<Self, CypherGraphError> {
        let arguments = render_call_arguments(&arguments.into(), &self.config.codec)?;
        Ok(self.push(PartialQuery::Call {
            procedure: procedure.to_string(),
            arguments,
        }))
    }

    /// Projects a subgraph into `graph` and calls `procedure` with it as the
    /// first argument.
    pub fn call_on_subgraph<A: Into<CallArguments>>(
        self,
        procedure: &str,
        arguments: A,
        projection: &SubgraphProjection,
    ) -> Result<Self, CypherGraphError> {
        self.config
            .require(self.config.dialect.supports_projection(), "project()")?;
        let path = projection.path_clause()?;
        let arguments: CallArguments = arguments.into();
        let projected = (format!("project({PATH_VARIABLE})"), GRAPH_VARIABLE.to_string());
        self.match_(false)
            .push(PartialQuery::Raw(format!(" {path} ")))
            .with_(vec![projected])
            .call(procedure, arguments.prepend_variable(GRAPH_VARIABLE))
    }

    pub fn load_csv(self, path: &str, header: bool, row: &str) -> Result<Self, CypherGraphError> {
        self.config
            .require(self.config.dialect.supports_load_csv(), "LOAD CSV")?;
        Ok(self.push(PartialQuery::LoadCsv {
            path: path.to_string(),
            header,
            row: row.to_string(),
        }))
    }

    /// Appends raw Cypher. Text containing `RETURN` switches execution to
    /// `execute_and_fetch`.
    pub fn add_custom_cypher(mut self, text: &str) -> Self {
        if text.contains("RETURN") {
            self.fetch_results = true;
        }
        self.push(PartialQuery::Raw(text.to_string()))
    }

    pub fn construct_query(&self) -> String {
        let raw: String = self.query.iter().map(PartialQuery::render).collect();
        collapse_whitespace(&raw)
    }

    pub fn execute(&self) -> Result<QueryOutcome<'_>, CypherGraphError> {
        let query = self.construct_query();
        debug!(query = %query, fetch = self.fetch_results, "executing query");
        if self.fetch_results {
            let records = self.connection.execute_and_fetch(&query, &self.parameters)?;
            Ok(QueryOutcome::Records(records))
        } else {
            self.connection.execute(&query, &self.parameters)?;
            Ok(QueryOutcome::Executed)
        }
    }

    /// Column `name` of the first row, or `None` when there are no rows.
    pub fn get_single(&self, name: &str) -> Result<Option<CypherValue>, CypherGraphError> {
        let query = self.construct_query();
        debug!(query = %query, column = name, "fetching single value");
        let mut records = self.connection.execute_and_fetch(&query, &self.parameters)?;
        let Some(first) = records.next() else {
            return Ok(None);
        };
        let mut row = first?;
        row.remove(name).map(Some).ok_or_else(|| {
            CypherGraphError::query(format!("column `{name}` is missing from the result"))
        })
    }

    fn relationship(
        self,
        pattern: RelationshipPattern,
        direction: Direction,
    ) -> Result<Self, CypherGraphError> {
        self.ensure_not_after(QueryKind::Relationship)?;
        let algorithm = match pattern.algorithm {
            Some(algorithm) => {
                self.config.require(
                    self.config.dialect.supports_traversal_algorithms(),
                    "traversal algorithms",
                )?;
                Some(algorithm.to_string())
            }
            None => None,
        };
        let properties = render_properties(&pattern.properties, &self.config.codec)?;
        Ok(self.push(PartialQuery::Relationship {
            variable: pattern.variable,
            relationship_type: pattern.relationship_type,
            algorithm,
            properties,
            direction,
        }))
    }

    fn push_where<O: IntoOperator>(
        self,
        connective: Connective,
        negated: bool,
        item: &str,
        operator: O,
        operand: Operand,
    ) -> Result<Self, CypherGraphError> {
        let operator = operator.into_operator()?;
        let value = operand.render(connective.keyword(), &self.config.codec)?;
        Ok(self.push(PartialQuery::Where {
            connective,
            negated,
            item: item.to_string(),
            operator,
            value,
        }))
    }

    fn ensure_not_after(&self, kind: QueryKind) -> Result<(), CypherGraphError> {
        match self.query.last() {
            Some(last) if last.kind() == kind => Err(CypherGraphError::invalid_chain(format!(
                "{kind:?} cannot directly follow another {kind:?}"
            ))),
            _ => Ok(()),
        }
    }

    fn push(mut self, partial: PartialQuery) -> Self {
        self.query.push(partial);
        self
    }
}

fn mapped_relationship_pattern<R>(object: &R, variable: Option<&str>) -> RelationshipPattern
where
    R: MappedRelationship + ?Sized,
{
    let mut pattern = RelationshipPattern::typed(object.relationship_type())
        .properties(object.properties());
    pattern.variable = variable.map(str::to_string);
    pattern
}

/// Replaces every run of two or more whitespace characters with one space and
/// trims both ends.
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if !ch.is_whitespace() {
            out.push(ch);
            continue;
        }
        let mut run = 1;
        while chars.peek().is_some_and(|next| next.is_whitespace()) {
            chars.next();
            run += 1;
        }
        out.push(if run > 1 { ' ' } else { ch });
    }
    out.trim().to_string()
}
