#![allow(dead_code)]

use cyphergraph::{CypherValue, GraphNode, GraphRelationship, Record, RecordingConnection};

pub fn connection() -> RecordingConnection {
    RecordingConnection::new()
}

pub fn row(columns: &[(&str, CypherValue)]) -> Record {
    columns
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

pub fn text(value: &str) -> CypherValue {
    CypherValue::String(value.to_string())
}

pub fn texts(values: &[&str]) -> CypherValue {
    CypherValue::List(values.iter().map(|v| text(v)).collect())
}

pub fn person() -> GraphNode {
    GraphNode::new(["Person"])
        .with_property("name", "Ann")
        .with_property("age", 34)
}

pub fn knows() -> GraphRelationship {
    GraphRelationship::new("KNOWS").with_property("since", 2020)
}

pub fn has_whitespace_run(query: &str) -> bool {
    query
        .chars()
        .zip(query.chars().skip(1))
        .any(|(a, b)| a.is_whitespace() && b.is_whitespace())
}
