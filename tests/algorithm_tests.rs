mod common;

use common::connection;
use cyphergraph::{
    AllShortestPath, BreadthFirstSearch, DepthFirstSearch, IntegratedAlgorithm, NodePattern,
    QueryBuilder, RelationshipPattern, WeightedShortestPath,
};

#[test]
fn test_bfs_bounds_and_condition() {
    let bfs = BreadthFirstSearch::new()
        .bounds(1, 15)
        .condition("r.x > 12 AND n.y < 3");
    assert_eq!(bfs.to_string(), "*BFS 1..15 (r, n | r.x > 12 AND n.y < 3)");
}

#[test]
fn test_bfs_partial_bounds() {
    assert_eq!(BreadthFirstSearch::new().to_string(), "*BFS");
    assert_eq!(BreadthFirstSearch::new().upper_bound(10).to_string(), "*BFS ..10");
    assert_eq!(BreadthFirstSearch::new().lower_bound(3).to_string(), "*BFS 3..");
    assert_eq!(
        BreadthFirstSearch::new().condition("n.ok").to_string(),
        "*BFS (r, n | n.ok)"
    );
}

#[test]
fn test_dfs() {
    assert_eq!(DepthFirstSearch::new().to_string(), "*");
    assert_eq!(
        DepthFirstSearch::new()
            .bounds(2, 4)
            .condition("r.active")
            .to_string(),
        "* 2..4 (r, n | r.active)"
    );
}

#[test]
fn test_weighted_shortest_defaults() {
    assert_eq!(
        WeightedShortestPath::new().to_string(),
        "*WSHORTEST (r, n | r.weight) total_weight"
    );
}

#[test]
fn test_weighted_shortest_full() {
    let wsp = WeightedShortestPath::new()
        .upper_bound(10)
        .weight_property("cost")
        .total_weight_var("w")
        .condition("n.x > 1");
    assert_eq!(
        wsp.to_string(),
        "*WSHORTEST 10 (r, n | r.cost) w (r, n | n.x > 1)"
    );
}

#[test]
fn test_all_shortest_keeps_qualified_weight() {
    let asp = AllShortestPath::new().weight_property("edge.length");
    assert_eq!(
        asp.to_string(),
        "*ALLSHORTEST (r, n | edge.length) total_weight"
    );
    assert_eq!(asp.0.weight_expression(), "edge.length");
}

#[test]
fn test_integrated_algorithm_display_matches_variant() {
    let wsp = WeightedShortestPath::new().upper_bound(3);
    let wrapped = IntegratedAlgorithm::from(wsp.clone());
    assert_eq!(wrapped.to_string(), wsp.to_string());
    let dfs: IntegratedAlgorithm = DepthFirstSearch::new().into();
    assert_eq!(dfs.to_string(), "*");
}

#[test]
fn test_weighted_path_in_query() {
    let conn = connection();
    let query = QueryBuilder::new_match(&conn, false)
        .node(NodePattern::labeled("City").variable("a").property("name", "Split"))
        .unwrap()
        .to(RelationshipPattern::typed("ROAD")
            .variable("e")
            .algorithm(WeightedShortestPath::new().weight_property("km")))
        .unwrap()
        .node(NodePattern::labeled("City").variable("b").property("name", "Osijek"))
        .unwrap()
        .return_(vec!["total_weight"])
        .construct_query();
    assert_eq!(
        query,
        "MATCH (a:City {name: 'Split'})-[e:ROAD *WSHORTEST (r, n | r.km) total_weight]->\
         (b:City {name: 'Osijek'}) RETURN total_weight"
    );
}
