//! Index and constraint statements plus reconciliation against `SHOW ... INFO`.

use ahash::AHashSet;
use tracing::trace;

use crate::connection::{Connection, Parameters, Record};
use crate::errors::CypherGraphError;
use crate::value::CypherValue;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IndexKind {
    /// Label or label+property index.
    Label,
    Point,
    /// Edge-type or edge-type+property index.
    Edge,
    /// Property index across every edge type.
    GlobalEdge,
}

impl IndexKind {
    fn keyword(&self) -> &'static str {
        match self {
            IndexKind::Label => "INDEX",
            IndexKind::Point => "POINT INDEX",
            IndexKind::Edge => "EDGE INDEX",
            IndexKind::GlobalEdge => "GLOBAL EDGE INDEX",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Index {
    /// Node label or edge type; empty for global edge indexes.
    pub label: String,
    pub property: Option<String>,
    pub kind: IndexKind,
}

impl Index {
    pub fn label<T: Into<String>>(label: T) -> Self {
        Self {
            label: label.into(),
            property: None,
            kind: IndexKind::Label,
        }
    }

    pub fn label_property<T: Into<String>, P: Into<String>>(label: T, property: P) -> Self {
        Self {
            label: label.into(),
            property: Some(property.into()),
            kind: IndexKind::Label,
        }
    }

    pub fn point<T: Into<String>, P: Into<String>>(label: T, property: P) -> Self {
        Self {
            label: label.into(),
            property: Some(property.into()),
            kind: IndexKind::Point,
        }
    }

    pub fn edge<T: Into<String>>(edge_type: T) -> Self {
        Self {
            label: edge_type.into(),
            property: None,
            kind: IndexKind::Edge,
        }
    }

    pub fn edge_property<T: Into<String>, P: Into<String>>(edge_type: T, property: P) -> Self {
        Self {
            label: edge_type.into(),
            property: Some(property.into()),
            kind: IndexKind::Edge,
        }
    }

    pub fn global_edge<P: Into<String>>(property: P) -> Self {
        Self {
            label: String::new(),
            property: Some(property.into()),
            kind: IndexKind::GlobalEdge,
        }
    }

    fn target(&self) -> String {
        match &self.property {
            Some(property) => format!(":{}({property})", self.label),
            None => format!(":{}", self.label),
        }
    }

    pub fn to_create_query(&self) -> String {
        format!("CREATE {} ON {};", self.kind.keyword(), self.target())
    }

    pub fn to_drop_query(&self) -> String {
        format!("DROP {} ON {};", self.kind.keyword(), self.target())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Constraint {
    Unique { label: String, properties: Vec<String> },
    Exists { label: String, property: String },
}

impl Constraint {
    pub fn unique<T, I, P>(label: T, properties: I) -> Self
    where
        T: Into<String>,
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Constraint::Unique {
            label: label.into(),
            properties: properties.into_iter().map(Into::into).collect(),
        }
    }

    pub fn exists<T: Into<String>, P: Into<String>>(label: T, property: P) -> Self {
        Constraint::Exists {
            label: label.into(),
            property: property.into(),
        }
    }

    fn assertion(&self) -> String {
        match self {
            Constraint::Unique { label, properties } => {
                let props: Vec<String> = properties.iter().map(|p| format!("n.{p}")).collect();
                format!("(n:{label}) ASSERT {} IS UNIQUE", props.join(", "))
            }
            Constraint::Exists { label, property } => {
                format!("(n:{label}) ASSERT EXISTS (n.{property})")
            }
        }
    }

    pub fn to_create_query(&self) -> String {
        format!("CREATE CONSTRAINT ON {};", self.assertion())
    }

    pub fn to_drop_query(&self) -> String {
        format!("DROP CONSTRAINT ON {};", self.assertion())
    }
}

pub fn create_index<C: Connection + ?Sized>(conn: &C, index: &Index) -> Result<(), CypherGraphError> {
    run_statement(conn, &index.to_create_query())
}

pub fn drop_index<C: Connection + ?Sized>(conn: &C, index: &Index) -> Result<(), CypherGraphError> {
    run_statement(conn, &index.to_drop_query())
}

/// Indexes reported by `SHOW INDEX INFO;`. Index types this crate does not
/// model are skipped.
pub fn get_indexes<C: Connection + ?Sized>(conn: &C) -> Result<Vec<Index>, CypherGraphError> {
    let mut indexes = Vec::new();
    for row in conn.execute_and_fetch("SHOW INDEX INFO;", &Parameters::new())? {
        let row = row?;
        let index_type = text_column(&row, "index type")?;
        let label = optional_text_column(&row, "label")?.unwrap_or_default();
        let property = optional_text_column(&row, "property")?;
        let kind = match index_type.as_str() {
            "label" | "label+property" => IndexKind::Label,
            "point" => IndexKind::Point,
            "edge-type" | "edge-type+property" => IndexKind::Edge,
            "edge-property" => IndexKind::GlobalEdge,
            other => {
                trace!(index_type = other, "skipping unsupported index type");
                continue;
            }
        };
        indexes.push(Index {
            label,
            property,
            kind,
        });
    }
    Ok(indexes)
}

/// Drops indexes missing from `desired` and creates the ones not yet present.
pub fn ensure_indexes<C: Connection + ?Sized>(
    conn: &C,
    desired: &[Index],
) -> Result<(), CypherGraphError> {
    let existing: AHashSet<Index> = get_indexes(conn)?.into_iter().collect();
    let wanted: AHashSet<&Index> = desired.iter().collect();
    for obsolete in existing.iter().filter(|index| !wanted.contains(index)) {
        drop_index(conn, obsolete)?;
    }
    for missing in desired.iter().filter(|index| !existing.contains(*index)) {
        create_index(conn, missing)?;
    }
    Ok(())
}

pub fn create_constraint<C: Connection + ?Sized>(
    conn: &C,
    constraint: &Constraint,
) -> Result<(), CypherGraphError> {
    run_statement(conn, &constraint.to_create_query())
}

pub fn drop_constraint<C: Connection + ?Sized>(
    conn: &C,
    constraint: &Constraint,
) -> Result<(), CypherGraphError> {
    run_statement(conn, &constraint.to_drop_query())
}

pub fn get_constraints<C: Connection + ?Sized>(
    conn: &C,
) -> Result<Vec<Constraint>, CypherGraphError> {
    let mut constraints = Vec::new();
    for row in conn.execute_and_fetch("SHOW CONSTRAINT INFO;", &Parameters::new())? {
        let row = row?;
        let constraint_type = text_column(&row, "constraint type")?;
        let label = text_column(&row, "label")?;
        let properties = list_column(&row, "properties")?;
        match constraint_type.as_str() {
            "unique" => constraints.push(Constraint::Unique { label, properties }),
            "exists" => {
                let property = properties.into_iter().next().ok_or_else(|| {
                    CypherGraphError::query(format!("exists constraint on {label} has no property"))
                })?;
                constraints.push(Constraint::Exists { label, property });
            }
            other => trace!(constraint_type = other, "skipping unsupported constraint type"),
        }
    }
    Ok(constraints)
}

pub fn ensure_constraints<C: Connection + ?Sized>(
    conn: &C,
    desired: &[Constraint],
) -> Result<(), CypherGraphError> {
    let existing: AHashSet<Constraint> = get_constraints(conn)?.into_iter().collect();
    let wanted: AHashSet<&Constraint> = desired.iter().collect();
    for obsolete in existing.iter().filter(|c| !wanted.contains(c)) {
        drop_constraint(conn, obsolete)?;
    }
    for missing in desired.iter().filter(|c| !existing.contains(*c)) {
        create_constraint(conn, missing)?;
    }
    Ok(())
}

pub(crate) fn run_statement<C: Connection + ?Sized>(
    conn: &C,
    statement: &str,
) -> Result<(), CypherGraphError> {
    trace!(statement, "running schema statement");
    conn.execute(statement, &Parameters::new())
}

pub(crate) fn text_column(row: &Record, column: &str) -> Result<String, CypherGraphError> {
    optional_text_column(row, column)?
        .ok_or_else(|| CypherGraphError::query(format!("column `{column}` is missing or null")))
}

pub(crate) fn optional_text_column(
    row: &Record,
    column: &str,
) -> Result<Option<String>, CypherGraphError> {
    match row.get(column) {
        None | Some(CypherValue::Null) => Ok(None),
        Some(CypherValue::String(text)) => Ok(Some(text.clone())),
        Some(CypherValue::List(items)) if items.len() == 1 => match &items[0] {
            CypherValue::String(text) => Ok(Some(text.clone())),
            other => Err(unexpected(column, other)),
        },
        Some(other) => Err(unexpected(column, other)),
    }
}

fn list_column(row: &Record, column: &str) -> Result<Vec<String>, CypherGraphError> {
    match row.get(column) {
        None | Some(CypherValue::Null) => Ok(Vec::new()),
        Some(CypherValue::String(text)) => Ok(vec![text.clone()]),
        Some(CypherValue::List(items)) => items
            .iter()
            .map(|item| match item {
                CypherValue::String(text) => Ok(text.clone()),
                other => Err(unexpected(column, other)),
            })
            .collect(),
        Some(other) => Err(unexpected(column, other)),
    }
}

fn unexpected(column: &str, value: &CypherValue) -> CypherGraphError {
    CypherGraphError::query(format!("unexpected value in column `{column}`: {value:?}"))
}
