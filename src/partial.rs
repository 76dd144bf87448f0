//! Partial query fragments.
//!
//! Every fragment stores already-encoded text, so [`PartialQuery::render`] is a
//! pure and infallible function of its own fields. Renders are padded with
//! spaces on purpose; the builder collapses whitespace once the whole
//! sequence is concatenated.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde_json::Value as JsonValue;

use crate::codec::{quote_string, render_value};
use crate::config::CodecConfig;
use crate::errors::CypherGraphError;
use crate::value::CypherValue;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QueryKind {
    Match,
    Merge,
    Create,
    Call,
    Node,
    Relationship,
    Where,
    Unwind,
    With,
    Union,
    Delete,
    Remove,
    Yield,
    Return,
    OrderBy,
    Limit,
    Skip,
    Foreach,
    Set,
    LoadCsv,
    Raw,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `=`, used both for comparison and assignment.
    Equal,
    GreaterEqual,
    Greater,
    /// `<>`
    Inequal,
    /// `:`, label test in WHERE and label assignment in SET.
    Label,
    Less,
    LessEqual,
    /// `!=`
    NotEqual,
    /// `+=`
    Increment,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::GreaterEqual => ">=",
            Operator::Greater => ">",
            Operator::Inequal => "<>",
            Operator::Label => ":",
            Operator::Less => "<",
            Operator::LessEqual => "<=",
            Operator::NotEqual => "!=",
            Operator::Increment => "+=",
        }
    }

    fn join(&self, item: &str, value: &str) -> String {
        match self {
            Operator::Label => format!("{item}:{value}"),
            op => format!("{item} {} {value}", op.as_str()),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts the symbol (`">="`) or the snake_case name (`"greater_equal"`).
impl FromStr for Operator {
    type Err = CypherGraphError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let op = match raw.trim().to_ascii_lowercase().as_str() {
            "=" | "equal" | "assignment" => Operator::Equal,
            ">=" | "greater_equal" => Operator::GreaterEqual,
            ">" | "greater" => Operator::Greater,
            "<>" | "inequal" => Operator::Inequal,
            ":" | "label" | "label_filter" => Operator::Label,
            "<" | "less" => Operator::Less,
            "<=" | "less_equal" => Operator::LessEqual,
            "!=" | "not_equal" => Operator::NotEqual,
            "+=" | "increment" => Operator::Increment,
            _ => return Err(CypherGraphError::operator(raw)),
        };
        Ok(op)
    }
}

/// Conversion into an [`Operator`] at the public API boundary.
pub trait IntoOperator {
    fn into_operator(self) -> Result<Operator, CypherGraphError>;
}

impl IntoOperator for Operator {
    fn into_operator(self) -> Result<Operator, CypherGraphError> {
        Ok(self)
    }
}

impl IntoOperator for &str {
    fn into_operator(self) -> Result<Operator, CypherGraphError> {
        self.parse()
    }
}

impl IntoOperator for String {
    fn into_operator(self) -> Result<Operator, CypherGraphError> {
        self.parse()
    }
}

/// Boolean keyword that opens a WHERE-family fragment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Connective {
    Where,
    And,
    Or,
    Xor,
}

impl Connective {
    pub fn keyword(&self) -> &'static str {
        match self {
            Connective::Where => "WHERE",
            Connective::And => "AND",
            Connective::Or => "OR",
            Connective::Xor => "XOR",
        }
    }
}

/// Right-hand side of a WHERE or SET fragment: a value to encode, or raw
/// Cypher text. Exactly one of the two must be present.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Operand {
    pub literal: Option<CypherValue>,
    pub expression: Option<String>,
}

impl Operand {
    pub fn literal<T: Into<CypherValue>>(value: T) -> Self {
        Self {
            literal: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn expression<T: Into<String>>(expression: T) -> Self {
        Self {
            expression: Some(expression.into()),
            ..Self::default()
        }
    }

    pub fn render(&self, clause: &str, config: &CodecConfig) -> Result<String, CypherGraphError> {
        match (&self.literal, &self.expression) {
            (Some(value), None) => render_value(value, config),
            (None, Some(expression)) => Ok(expression.clone()),
            (None, None) => Err(CypherGraphError::missing_operand(clause)),
            (Some(_), Some(_)) => Err(CypherGraphError::conflicting_operand(clause)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Order {
    Asc,
    Ascending,
    Desc,
    Descending,
}

impl Order {
    pub fn as_str(&self) -> &'static str {
        match self {
            Order::Asc => "ASC",
            Order::Ascending => "ASCENDING",
            Order::Desc => "DESC",
            Order::Descending => "DESCENDING",
        }
    }
}

impl FromStr for Order {
    type Err = CypherGraphError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "ASC" => Ok(Order::Asc),
            "ASCENDING" => Ok(Order::Ascending),
            "DESC" => Ok(Order::Desc),
            "DESCENDING" => Ok(Order::Descending),
            _ => Err(CypherGraphError::order_spec(format!(
                "`{raw}` is not a sort direction"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderItem {
    pub property: String,
    pub order: Option<Order>,
}

impl OrderItem {
    fn render(&self) -> String {
        match self.order {
            Some(order) => format!("{} {}", self.property, order.as_str()),
            None => self.property.clone(),
        }
    }
}

pub trait IntoOrderItem {
    fn into_order_item(self) -> Result<OrderItem, CypherGraphError>;
}

impl IntoOrderItem for OrderItem {
    fn into_order_item(self) -> Result<OrderItem, CypherGraphError> {
        Ok(self)
    }
}

impl IntoOrderItem for &str {
    fn into_order_item(self) -> Result<OrderItem, CypherGraphError> {
        Ok(OrderItem {
            property: self.to_string(),
            order: None,
        })
    }
}

impl IntoOrderItem for String {
    fn into_order_item(self) -> Result<OrderItem, CypherGraphError> {
        Ok(OrderItem {
            property: self,
            order: None,
        })
    }
}

impl IntoOrderItem for (&str, Order) {
    fn into_order_item(self) -> Result<OrderItem, CypherGraphError> {
        Ok(OrderItem {
            property: self.0.to_string(),
            order: Some(self.1),
        })
    }
}

impl IntoOrderItem for (&str, &str) {
    fn into_order_item(self) -> Result<OrderItem, CypherGraphError> {
        Ok(OrderItem {
            property: self.0.to_string(),
            order: Some(self.1.parse()?),
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    Right,
    Left,
    Undirected,
}

impl Direction {
    /// Opening and closing arrow pieces around a `[...]` body.
    pub fn arrows(&self) -> (&'static str, &'static str) {
        match self {
            Direction::Right => ("-", "->"),
            Direction::Left => ("<-", "-"),
            Direction::Undirected => ("-", "-"),
        }
    }
}

/// One projected expression with an optional alias.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultItem {
    pub expression: String,
    pub alias: Option<String>,
}

impl ResultItem {
    pub fn new<T: Into<String>>(expression: T) -> Self {
        Self {
            expression: expression.into(),
            alias: None,
        }
    }

    pub fn aliased<T: Into<String>, A: Into<String>>(expression: T, alias: A) -> Self {
        Self {
            expression: expression.into(),
            alias: Some(alias.into()),
        }
    }

    /// `expr AS alias`, or bare `expr` when the alias is empty or equal to it.
    pub fn render(&self) -> String {
        match self.alias.as_deref() {
            Some(alias) if !alias.is_empty() && alias != self.expression => {
                format!("{} AS {alias}", self.expression)
            }
            _ => self.expression.clone(),
        }
    }
}

impl From<&str> for ResultItem {
    fn from(expression: &str) -> Self {
        ResultItem::new(expression)
    }
}

impl From<String> for ResultItem {
    fn from(expression: String) -> Self {
        ResultItem::new(expression)
    }
}

impl From<(&str, &str)> for ResultItem {
    fn from((expression, alias): (&str, &str)) -> Self {
        ResultItem::aliased(expression, alias)
    }
}

impl From<(String, String)> for ResultItem {
    fn from((expression, alias): (String, String)) -> Self {
        ResultItem::aliased(expression, alias)
    }
}

/// Projection of a WITH, RETURN or YIELD clause.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ResultSpec {
    /// `*`
    #[default]
    All,
    Raw(String),
    Items(Vec<ResultItem>),
}

impl ResultSpec {
    pub fn is_all(&self) -> bool {
        match self {
            ResultSpec::All => true,
            ResultSpec::Raw(text) => text.trim().is_empty(),
            ResultSpec::Items(items) => items.is_empty(),
        }
    }

    fn render(&self, keyword: &str) -> String {
        if self.is_all() {
            return format!(" {keyword} * ");
        }
        let body = match self {
            ResultSpec::Raw(text) => text.clone(),
            ResultSpec::Items(items) => items
                .iter()
                .map(ResultItem::render)
                .collect::<Vec<_>>()
                .join(", "),
            ResultSpec::All => String::new(),
        };
        format!(" {keyword} {body} ")
    }
}

impl From<()> for ResultSpec {
    fn from(_: ()) -> Self {
        ResultSpec::All
    }
}

impl From<&str> for ResultSpec {
    fn from(text: &str) -> Self {
        ResultSpec::Raw(text.to_string())
    }
}

impl From<String> for ResultSpec {
    fn from(text: String) -> Self {
        ResultSpec::Raw(text)
    }
}

impl From<(&str, &str)> for ResultSpec {
    fn from(pair: (&str, &str)) -> Self {
        ResultSpec::Items(vec![pair.into()])
    }
}

impl<T: Into<ResultItem>> From<Vec<T>> for ResultSpec {
    fn from(items: Vec<T>) -> Self {
        ResultSpec::Items(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ResultItem>, const N: usize> From<[T; N]> for ResultSpec {
    fn from(items: [T; N]) -> Self {
        ResultSpec::Items(items.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<String>> From<IndexMap<K, V>> for ResultSpec {
    fn from(map: IndexMap<K, V>) -> Self {
        ResultSpec::Items(
            map.into_iter()
                .map(|(expression, alias)| ResultItem::aliased(expression, alias))
                .collect(),
        )
    }
}

impl<T: Into<ResultSpec>> From<Option<T>> for ResultSpec {
    fn from(spec: Option<T>) -> Self {
        spec.map_or(ResultSpec::All, Into::into)
    }
}

/// Loosely typed result specs as they arrive from JSON configuration.
impl TryFrom<JsonValue> for ResultSpec {
    type Error = CypherGraphError;

    fn try_from(value: JsonValue) -> Result<Self, Self::Error> {
        match value {
            JsonValue::Null => Ok(ResultSpec::All),
            JsonValue::String(text) => Ok(ResultSpec::Raw(text)),
            JsonValue::Array(entries) => {
                if let Some(pair) = string_pair(&entries) {
                    return Ok(ResultSpec::Items(vec![pair]));
                }
                entries
                    .into_iter()
                    .map(json_result_item)
                    .collect::<Result<Vec<_>, _>>()
                    .map(ResultSpec::Items)
            }
            JsonValue::Object(map) => map
                .into_iter()
                .map(|(expression, alias)| match alias {
                    JsonValue::String(alias) => Ok(ResultItem::aliased(expression, alias)),
                    other => Err(CypherGraphError::result_spec(format!(
                        "alias for `{expression}` must be a string, got {other}"
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(ResultSpec::Items),
            other => Err(CypherGraphError::result_spec(other.to_string())),
        }
    }
}

fn string_pair(entries: &[JsonValue]) -> Option<ResultItem> {
    match entries {
        [JsonValue::String(expression), JsonValue::String(alias)] => {
            Some(ResultItem::aliased(expression.as_str(), alias.as_str()))
        }
        _ => None,
    }
}

fn json_result_item(entry: JsonValue) -> Result<ResultItem, CypherGraphError> {
    match entry {
        JsonValue::String(expression) => Ok(ResultItem::new(expression)),
        JsonValue::Array(parts) => match parts.as_slice() {
            [JsonValue::String(expression)] => Ok(ResultItem::new(expression.as_str())),
            _ => string_pair(&parts).ok_or_else(|| {
                CypherGraphError::result_spec(format!(
                    "expected [expression, alias], got {}",
                    JsonValue::Array(parts.clone())
                ))
            }),
        },
        other => Err(CypherGraphError::result_spec(other.to_string())),
    }
}

/// One fragment of a query sequence.
#[derive(Clone, Debug, PartialEq)]
pub enum PartialQuery {
    Match {
        optional: bool,
    },
    Merge,
    Create,
    Call {
        procedure: String,
        arguments: String,
    },
    Node {
        variable: Option<String>,
        labels: String,
        properties: String,
    },
    Relationship {
        variable: Option<String>,
        relationship_type: Option<String>,
        algorithm: Option<String>,
        properties: String,
        direction: Direction,
    },
    Where {
        connective: Connective,
        negated: bool,
        item: String,
        operator: Operator,
        value: String,
    },
    Unwind {
        list_expression: String,
        variable: String,
    },
    With(ResultSpec),
    Union {
        include_duplicates: bool,
    },
    Delete {
        items: Vec<String>,
        detach: bool,
    },
    Remove {
        items: Vec<String>,
    },
    Yield(ResultSpec),
    Return(ResultSpec),
    OrderBy(Vec<OrderItem>),
    Limit(String),
    Skip(String),
    Foreach {
        variable: String,
        expression: String,
        update_clauses: String,
    },
    Set {
        item: String,
        operator: Operator,
        value: String,
    },
    LoadCsv {
        path: String,
        header: bool,
        row: String,
    },
    Raw(String),
}

impl PartialQuery {
    pub fn kind(&self) -> QueryKind {
        match self {
            PartialQuery::Match { .. } => QueryKind::Match,
            PartialQuery::Merge => QueryKind::Merge,
            PartialQuery::Create => QueryKind::Create,
            PartialQuery::Call { .. } => QueryKind::Call,
            PartialQuery::Node { .. } => QueryKind::Node,
            PartialQuery::Relationship { .. } => QueryKind::Relationship,
            PartialQuery::Where { .. } => QueryKind::Where,
            PartialQuery::Unwind { .. } => QueryKind::Unwind,
            PartialQuery::With(_) => QueryKind::With,
            PartialQuery::Union { .. } => QueryKind::Union,
            PartialQuery::Delete { .. } => QueryKind::Delete,
            PartialQuery::Remove { .. } => QueryKind::Remove,
            PartialQuery::Yield(_) => QueryKind::Yield,
            PartialQuery::Return(_) => QueryKind::Return,
            PartialQuery::OrderBy(_) => QueryKind::OrderBy,
            PartialQuery::Limit(_) => QueryKind::Limit,
            PartialQuery::Skip(_) => QueryKind::Skip,
            PartialQuery::Foreach { .. } => QueryKind::Foreach,
            PartialQuery::Set { .. } => QueryKind::Set,
            PartialQuery::LoadCsv { .. } => QueryKind::LoadCsv,
            PartialQuery::Raw(_) => QueryKind::Raw,
        }
    }

    pub fn render(&self) -> String {
        match self {
            PartialQuery::Match { optional: true } => " OPTIONAL MATCH ".to_string(),
            PartialQuery::Match { optional: false } => " MATCH ".to_string(),
            PartialQuery::Merge => " MERGE ".to_string(),
            PartialQuery::Create => " CREATE ".to_string(),
            PartialQuery::Call {
                procedure,
                arguments,
            } => format!(" CALL {procedure}({arguments}) "),
            PartialQuery::Node {
                variable,
                labels,
                properties,
            } => {
                let head = format!("{}{labels}", variable.as_deref().unwrap_or_default());
                format!("({})", join_present(&[&head, properties]))
            }
            PartialQuery::Relationship {
                variable,
                relationship_type,
                algorithm,
                properties,
                direction,
            } => {
                let mut head = variable.clone().unwrap_or_default();
                if let Some(rel_type) = relationship_type.as_deref().filter(|t| !t.is_empty()) {
                    head.push(':');
                    head.push_str(rel_type);
                }
                let body = join_present(&[
                    &head,
                    algorithm.as_deref().unwrap_or_default(),
                    properties,
                ]);
                let (open, close) = direction.arrows();
                format!("{open}[{body}]{close}")
            }
            PartialQuery::Where {
                connective,
                negated,
                item,
                operator,
                value,
            } => {
                let not = if *negated { " NOT" } else { "" };
                format!(
                    " {}{not} {} ",
                    connective.keyword(),
                    operator.join(item, value)
                )
            }
            PartialQuery::Unwind {
                list_expression,
                variable,
            } => format!(" UNWIND {list_expression} AS {variable} "),
            PartialQuery::With(spec) => spec.render("WITH"),
            PartialQuery::Union {
                include_duplicates: true,
            } => " UNION ALL ".to_string(),
            PartialQuery::Union {
                include_duplicates: false,
            } => " UNION ".to_string(),
            PartialQuery::Delete { items, detach } => {
                let detach = if *detach { " DETACH" } else { "" };
                format!("{detach} DELETE {} ", items.join(", "))
            }
            PartialQuery::Remove { items } => format!(" REMOVE {} ", items.join(", ")),
            PartialQuery::Yield(spec) => spec.render("YIELD"),
            PartialQuery::Return(spec) => spec.render("RETURN"),
            PartialQuery::OrderBy(items) => {
                let rendered: Vec<String> = items.iter().map(OrderItem::render).collect();
                format!(" ORDER BY {} ", rendered.join(", "))
            }
            PartialQuery::Limit(limit) => format!(" LIMIT {limit} "),
            PartialQuery::Skip(skip) => format!(" SKIP {skip} "),
            PartialQuery::Foreach {
                variable,
                expression,
                update_clauses,
            } => format!(" FOREACH ( {variable} IN {expression} | {update_clauses} ) "),
            PartialQuery::Set {
                item,
                operator,
                value,
            } => format!(" SET {}", operator.join(item, value)),
            PartialQuery::LoadCsv { path, header, row } => {
                let header = if *header { "WITH" } else { "NO" };
                format!(" LOAD CSV FROM {} {header} HEADER AS {row} ", quote_string(path))
            }
            PartialQuery::Raw(text) => text.clone(),
        }
    }
}

fn join_present(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}
