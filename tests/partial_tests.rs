use cyphergraph::{
    CodecConfig, Connective, CypherGraphError, Direction, Operand, Operator, Order, PartialQuery,
    QueryKind, ResultItem, ResultSpec,
};
use serde_json::json;

#[test]
fn test_operator_aliases() {
    assert_eq!("=".parse::<Operator>().unwrap(), Operator::Equal);
    assert_eq!(">=".parse::<Operator>().unwrap(), Operator::GreaterEqual);
    assert_eq!("<>".parse::<Operator>().unwrap(), Operator::Inequal);
    assert_eq!("!=".parse::<Operator>().unwrap(), Operator::NotEqual);
    assert_eq!(":".parse::<Operator>().unwrap(), Operator::Label);
    assert_eq!("+=".parse::<Operator>().unwrap(), Operator::Increment);
    assert_eq!("Less_Equal".parse::<Operator>().unwrap(), Operator::LessEqual);
    assert!(matches!(
        "=>".parse::<Operator>(),
        Err(CypherGraphError::InvalidOperator(_))
    ));
}

#[test]
fn test_order_aliases() {
    assert_eq!("desc".parse::<Order>().unwrap(), Order::Desc);
    assert_eq!("Ascending".parse::<Order>().unwrap(), Order::Ascending);
    assert!(matches!(
        "sideways".parse::<Order>(),
        Err(CypherGraphError::InvalidOrderSpec(_))
    ));
}

#[test]
fn test_keyword_fragments() {
    assert_eq!(PartialQuery::Match { optional: true }.render(), " OPTIONAL MATCH ");
    assert_eq!(PartialQuery::Match { optional: false }.render(), " MATCH ");
    assert_eq!(PartialQuery::Merge.render(), " MERGE ");
    assert_eq!(PartialQuery::Create.render(), " CREATE ");
    assert_eq!(PartialQuery::Union { include_duplicates: true }.render(), " UNION ALL ");
    assert_eq!(PartialQuery::Union { include_duplicates: false }.render(), " UNION ");
}

#[test]
fn test_node_fragment_omits_absent_parts() {
    let full = PartialQuery::Node {
        variable: Some("n".into()),
        labels: ":L1:L2".into(),
        properties: "{a: 1}".into(),
    };
    assert_eq!(full.render(), "(n:L1:L2 {a: 1})");

    let bare = PartialQuery::Node {
        variable: None,
        labels: String::new(),
        properties: String::new(),
    };
    assert_eq!(bare.render(), "()");

    let props_only = PartialQuery::Node {
        variable: None,
        labels: String::new(),
        properties: "{a: 1}".into(),
    };
    assert_eq!(props_only.render(), "({a: 1})");
}

#[test]
fn test_relationship_fragment_directions() {
    let rel = |direction| PartialQuery::Relationship {
        variable: Some("r".into()),
        relationship_type: Some("KNOWS".into()),
        algorithm: None,
        properties: String::new(),
        direction,
    };
    assert_eq!(rel(Direction::Right).render(), "-[r:KNOWS]->");
    assert_eq!(rel(Direction::Left).render(), "<-[r:KNOWS]-");
    assert_eq!(rel(Direction::Undirected).render(), "-[r:KNOWS]-");

    let with_algorithm = PartialQuery::Relationship {
        variable: None,
        relationship_type: None,
        algorithm: Some("*BFS ..3".into()),
        properties: "{w: 2}".into(),
        direction: Direction::Undirected,
    };
    assert_eq!(with_algorithm.render(), "-[*BFS ..3 {w: 2}]-");
}

#[test]
fn test_where_fragment() {
    let plain = PartialQuery::Where {
        connective: Connective::Where,
        negated: false,
        item: "n.age".into(),
        operator: Operator::Greater,
        value: "18".into(),
    };
    assert_eq!(plain.render(), " WHERE n.age > 18 ");

    let label = PartialQuery::Where {
        connective: Connective::And,
        negated: true,
        item: "n".into(),
        operator: Operator::Label,
        value: "Admin".into(),
    };
    assert_eq!(label.render(), " AND NOT n:Admin ");
}

#[test]
fn test_update_fragments() {
    let delete = PartialQuery::Delete {
        items: vec!["a".into(), "b".into()],
        detach: true,
    };
    assert_eq!(delete.render(), " DETACH DELETE a, b ");
    let remove = PartialQuery::Remove {
        items: vec!["n.age".into()],
    };
    assert_eq!(remove.render(), " REMOVE n.age ");
    let set = PartialQuery::Set {
        item: "n".into(),
        operator: Operator::Increment,
        value: "{a: 1}".into(),
    };
    assert_eq!(set.render(), " SET n += {a: 1}");
}

#[test]
fn test_load_csv_and_foreach_fragments() {
    let csv = PartialQuery::LoadCsv {
        path: "/data/a.csv".into(),
        header: false,
        row: "row".into(),
    };
    assert_eq!(csv.render(), " LOAD CSV FROM '/data/a.csv' NO HEADER AS row ");

    let foreach = PartialQuery::Foreach {
        variable: "x".into(),
        expression: "[1, 2]".into(),
        update_clauses: "CREATE (:N {v: x})".into(),
    };
    assert_eq!(foreach.render(), " FOREACH ( x IN [1, 2] | CREATE (:N {v: x}) ) ");
}

#[test]
fn test_load_csv_path_is_escaped() {
    let csv = PartialQuery::LoadCsv {
        path: r"C:\data\it's.csv".into(),
        header: true,
        row: "row".into(),
    };
    assert_eq!(
        csv.render(),
        r" LOAD CSV FROM 'C:\\data\\it\'s.csv' WITH HEADER AS row "
    );

    let literal_name = PartialQuery::LoadCsv {
        path: "null".into(),
        header: false,
        row: "row".into(),
    };
    assert_eq!(literal_name.render(), " LOAD CSV FROM 'null' NO HEADER AS row ");
}

#[test]
fn test_kinds() {
    assert_eq!(PartialQuery::Return(ResultSpec::All).kind(), QueryKind::Return);
    assert_eq!(PartialQuery::Raw("x".into()).kind(), QueryKind::Raw);
    assert_eq!(PartialQuery::Limit("3".into()).kind(), QueryKind::Limit);
}

#[test]
fn test_result_alias_rule() {
    assert_eq!(ResultItem::from(("L1", "L1")).render(), "L1");
    assert_eq!(ResultItem::from(("L1", "")).render(), "L1");
    assert_eq!(ResultItem::from(("L1", "first")).render(), "L1 AS first");
}

#[test]
fn test_result_specs_render_star_when_empty() {
    assert_eq!(PartialQuery::Return(ResultSpec::All).render(), " RETURN * ");
    assert_eq!(PartialQuery::With(ResultSpec::from("")).render(), " WITH * ");
    assert_eq!(
        PartialQuery::Yield(ResultSpec::Items(Vec::new())).render(),
        " YIELD * "
    );
    assert_eq!(
        PartialQuery::Return(ResultSpec::from("n, m")).render(),
        " RETURN n, m "
    );
}

#[test]
fn test_result_spec_from_json() {
    assert_eq!(ResultSpec::try_from(json!(null)).unwrap(), ResultSpec::All);
    assert_eq!(
        ResultSpec::try_from(json!("n")).unwrap(),
        ResultSpec::Raw("n".into())
    );
    assert_eq!(
        ResultSpec::try_from(json!(["n", "m"])).unwrap(),
        ResultSpec::Items(vec![ResultItem::aliased("n", "m")])
    );
    assert_eq!(
        ResultSpec::try_from(json!([["n", "a"], "m", ["k"]])).unwrap(),
        ResultSpec::Items(vec![
            ResultItem::aliased("n", "a"),
            ResultItem::new("m"),
            ResultItem::new("k"),
        ])
    );
    assert_eq!(
        ResultSpec::try_from(json!({"count(n)": "total"})).unwrap(),
        ResultSpec::Items(vec![ResultItem::aliased("count(n)", "total")])
    );
}

#[test]
fn test_result_spec_rejects_bad_shapes() {
    for bad in [json!(5), json!(true), json!([["a", "b", "c"]]), json!([1]), json!({"n": 1})] {
        assert!(matches!(
            ResultSpec::try_from(bad),
            Err(CypherGraphError::UnsupportedResultSpec(_))
        ));
    }
}

#[test]
fn test_operand_contract() {
    let config = CodecConfig::default();
    assert_eq!(Operand::literal("x").render("WHERE", &config).unwrap(), "'x'");
    assert_eq!(Operand::expression("m.x").render("WHERE", &config).unwrap(), "m.x");
    assert!(matches!(
        Operand::default().render("WHERE", &config),
        Err(CypherGraphError::MissingLiteralOrExpression { .. })
    ));
    let both = Operand {
        literal: Some(1.into()),
        expression: Some("m.x".into()),
    };
    assert!(matches!(
        both.render("WHERE", &config),
        Err(CypherGraphError::ConflictingLiteralAndExpression { .. })
    ));
}
