use cyphergraph::{CypherGraphError, Direction, SubgraphProjection};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn test_single_hop_projection() {
    let projection =
        SubgraphProjection::single_hop(["LABEL"], ["TYPE1", "TYPE2"], Direction::Right);
    assert_eq!(
        projection.render().unwrap(),
        "MATCH p=(a)-[:TYPE1 | :TYPE2]->(b) WHERE (a:LABEL) AND (b:LABEL) WITH project(p) AS graph"
    );
}

#[test]
fn test_explicit_path_projection() {
    let projection = SubgraphProjection::path("(n)-->(m)");
    assert_eq!(
        projection.render().unwrap(),
        "MATCH p=(n)-->(m) WITH project(p) AS graph"
    );
}

#[test]
fn test_multi_hop_mixed_directions() {
    let projection = SubgraphProjection::Hops {
        node_labels: vec![strings(&["A", "B"]), Vec::new(), strings(&["C"])],
        relationship_types: vec![Vec::new(), strings(&["T"])],
        relationship_directions: vec![Direction::Left, Direction::Undirected],
    };
    assert_eq!(
        projection.path_clause().unwrap(),
        "p=(a)<--(b)-[:T]-(c) WHERE (a:A or a:B) AND (c:C)"
    );
}

#[test]
fn test_no_labels_no_where() {
    let projection = SubgraphProjection::Hops {
        node_labels: vec![Vec::new(), Vec::new()],
        relationship_types: vec![strings(&["T"])],
        relationship_directions: vec![Direction::Right],
    };
    assert_eq!(
        projection.render().unwrap(),
        "MATCH p=(a)-[:T]->(b) WITH project(p) AS graph"
    );
}

#[test]
fn test_label_count_mismatch() {
    let projection = SubgraphProjection::Hops {
        node_labels: vec![strings(&["A"])],
        relationship_types: vec![strings(&["T"])],
        relationship_directions: vec![Direction::Right],
    };
    assert!(matches!(
        projection.render(),
        Err(CypherGraphError::InvalidSubgraph(_))
    ));
}

#[test]
fn test_direction_count_mismatch() {
    let projection = SubgraphProjection::Hops {
        node_labels: vec![strings(&["A"]), strings(&["B"])],
        relationship_types: vec![strings(&["T"])],
        relationship_directions: Vec::new(),
    };
    assert!(matches!(
        projection.path_clause(),
        Err(CypherGraphError::InvalidSubgraph(_))
    ));
}

#[test]
fn test_too_many_hops() {
    let projection = SubgraphProjection::Hops {
        node_labels: vec![Vec::new(); 27],
        relationship_types: vec![Vec::new(); 26],
        relationship_directions: vec![Direction::Right; 26],
    };
    assert!(matches!(
        projection.render(),
        Err(CypherGraphError::InvalidSubgraph(_))
    ));

    let projection = SubgraphProjection::Hops {
        node_labels: vec![Vec::new(); 26],
        relationship_types: vec![Vec::new(); 25],
        relationship_directions: vec![Direction::Right; 25],
    };
    let clause = projection.path_clause().unwrap();
    assert!(clause.ends_with("-->(z)"));
}
