//! Subgraph selection ahead of a procedure call.
//!
//! A projection turns into `MATCH p=<path> [WHERE <label tests>] WITH project(p)
//! AS graph`, binding `graph` for the procedure that follows.

use crate::errors::CypherGraphError;
use crate::partial::Direction;

pub const PATH_VARIABLE: &str = "p";
pub const GRAPH_VARIABLE: &str = "graph";

const MAX_HOP_NODES: usize = 26;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubgraphProjection {
    /// Caller-supplied path pattern, used verbatim after `p=`.
    Path(String),
    /// Path synthesised hop by hop. `node_labels[i]` holds alternative labels
    /// for the i-th node, `relationship_types[i]` alternative types for the
    /// i-th relationship.
    Hops {
        node_labels: Vec<Vec<String>>,
        relationship_types: Vec<Vec<String>>,
        relationship_directions: Vec<Direction>,
    },
}

impl SubgraphProjection {
    pub fn path<T: Into<String>>(path: T) -> Self {
        SubgraphProjection::Path(path.into())
    }

    /// One relationship hop with the same label alternatives on both ends.
    pub fn single_hop<L, T>(labels: L, relationship_types: T, direction: Direction) -> Self
    where
        L: IntoIterator,
        L::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        SubgraphProjection::Hops {
            node_labels: vec![labels.clone(), labels],
            relationship_types: vec![relationship_types.into_iter().map(Into::into).collect()],
            relationship_directions: vec![direction],
        }
    }

    /// The `p=...` pattern plus its optional `WHERE` clause.
    pub fn path_clause(&self) -> Result<String, CypherGraphError> {
        match self {
            SubgraphProjection::Path(path) => Ok(format!("{PATH_VARIABLE}={path}")),
            SubgraphProjection::Hops {
                node_labels,
                relationship_types,
                relationship_directions,
            } => hops_clause(node_labels, relationship_types, relationship_directions),
        }
    }

    pub fn render(&self) -> Result<String, CypherGraphError> {
        Ok(format!(
            "MATCH {} WITH project({PATH_VARIABLE}) AS {GRAPH_VARIABLE}",
            self.path_clause()?
        ))
    }
}

fn hops_clause(
    node_labels: &[Vec<String>],
    relationship_types: &[Vec<String>],
    relationship_directions: &[Direction],
) -> Result<String, CypherGraphError> {
    if node_labels.len() != relationship_types.len() + 1 {
        return Err(CypherGraphError::subgraph(format!(
            "{} node label lists need {} relationship type lists, got {}",
            node_labels.len(),
            node_labels.len().saturating_sub(1),
            relationship_types.len()
        )));
    }
    if relationship_directions.len() != relationship_types.len() {
        return Err(CypherGraphError::subgraph(format!(
            "{} relationship type lists need as many directions, got {}",
            relationship_types.len(),
            relationship_directions.len()
        )));
    }
    if node_labels.len() > MAX_HOP_NODES {
        return Err(CypherGraphError::subgraph(format!(
            "at most {MAX_HOP_NODES} hop nodes are supported, got {}",
            node_labels.len()
        )));
    }

    let variables: Vec<char> = ('a'..='z').take(node_labels.len()).collect();

    let mut path = format!("{PATH_VARIABLE}=({})", variables[0]);
    for (hop, (types, direction)) in relationship_types
        .iter()
        .zip(relationship_directions)
        .enumerate()
    {
        path.push_str(&relationship_term(types, *direction));
        path.push('(');
        path.push(variables[hop + 1]);
        path.push(')');
    }

    let conditions: Vec<String> = node_labels
        .iter()
        .zip(&variables)
        .filter(|(labels, _)| !labels.is_empty())
        .map(|(labels, var)| {
            let tests: Vec<String> = labels.iter().map(|label| format!("{var}:{label}")).collect();
            format!("({})", tests.join(" or "))
        })
        .collect();

    if conditions.is_empty() {
        Ok(path)
    } else {
        Ok(format!("{path} WHERE {}", conditions.join(" AND ")))
    }
}

fn relationship_term(types: &[String], direction: Direction) -> String {
    let (open, close) = direction.arrows();
    if types.is_empty() {
        return format!("{open}{close}");
    }
    let alternatives: Vec<String> = types.iter().map(|t| format!(":{t}")).collect();
    format!("{open}[{}]{close}", alternatives.join(" | "))
}
