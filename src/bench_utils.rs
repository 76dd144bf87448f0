use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    BreadthFirstSearch, Connection, CypherGraphError, CypherValue, NodePattern, Operand,
    QueryBuilder, RelationshipPattern,
};

const LABELS: &[&str] = &["Person", "City", "Company", "Post", "Tag"];
const REL_TYPES: &[&str] = &["KNOWS", "LIVES_IN", "WORKS_AT", "LIKES", "TAGGED"];
const PROPERTIES: &[&str] = &["name", "age", "score", "since", "active"];

#[derive(Clone, Copy, Debug)]
pub enum ChainShape {
    /// `MATCH (a)-[]->(b)-...` with `hops` relationships, then `RETURN *`.
    Path { hops: usize },
    /// A single node pattern followed by `conditions` WHERE-family fragments.
    Filtered { conditions: usize },
    /// Random clause mix; every fragment is padded with random whitespace.
    Mixed { steps: usize },
}

/// Deterministic builder chain for a given `seed`.
pub fn generate_chain<C: Connection>(
    connection: C,
    shape: ChainShape,
    seed: u64,
) -> Result<QueryBuilder<C>, CypherGraphError> {
    let mut rng = StdRng::seed_from_u64(seed);
    match shape {
        ChainShape::Path { hops } => path_chain(connection, hops, &mut rng),
        ChainShape::Filtered { conditions } => filtered_chain(connection, conditions, &mut rng),
        ChainShape::Mixed { steps } => mixed_chain(connection, steps, &mut rng),
    }
}

fn path_chain<C: Connection>(
    connection: C,
    hops: usize,
    rng: &mut StdRng,
) -> Result<QueryBuilder<C>, CypherGraphError> {
    let mut builder = QueryBuilder::new(connection)
        .match_(false)
        .node(random_node(rng, 0))?;
    for hop in 0..hops {
        let mut rel = RelationshipPattern::typed(pick(rng, REL_TYPES));
        if rng.gen_bool(0.2) {
            rel = rel.undirected().algorithm(
                BreadthFirstSearch::new()
                    .bounds(1, rng.gen_range(2..10))
                    .condition("n.active = true"),
            );
        }
        builder = if rng.gen_bool(0.5) {
            builder.to(rel)?
        } else {
            builder.from_(rel)?
        };
        builder = builder.node(random_node(rng, hop + 1))?;
    }
    Ok(builder.return_(()))
}

fn filtered_chain<C: Connection>(
    connection: C,
    conditions: usize,
    rng: &mut StdRng,
) -> Result<QueryBuilder<C>, CypherGraphError> {
    let mut builder = QueryBuilder::new(connection)
        .match_(false)
        .node(NodePattern::labeled(pick(rng, LABELS)).variable("n"))?;
    for idx in 0..conditions {
        let item = format!("n.{}", pick(rng, PROPERTIES));
        let operand = Operand::literal(random_value(rng));
        builder = match (idx, rng.gen_range(0..4)) {
            (0, _) => builder.where_(&item, "=", operand)?,
            (_, 0) => builder.and_where(&item, ">=", operand)?,
            (_, 1) => builder.or_where(&item, "<>", operand)?,
            (_, 2) => builder.xor_not_where(&item, "<", operand)?,
            _ => builder.and_not_where(&item, "!=", operand)?,
        };
    }
    Ok(builder.return_(vec![("n", "")]).limit(rng.gen_range(1..100)))
}

fn mixed_chain<C: Connection>(
    connection: C,
    steps: usize,
    rng: &mut StdRng,
) -> Result<QueryBuilder<C>, CypherGraphError> {
    let mut builder = QueryBuilder::new(connection).match_(rng.gen_bool(0.3));
    for step in 0..steps {
        builder = builder.add_custom_cypher(&padding(rng));
        builder = match rng.gen_range(0..8) {
            0 => builder.node(random_node(rng, step))?,
            1 => builder.to(RelationshipPattern::typed(pick(rng, REL_TYPES)))?,
            2 => builder.with_(vec![(format!("v{step}"), format!("w{step}"))]),
            3 => builder.unwind("[1, 2, 3]", &format!("x{step}")),
            4 => builder.set_(
                &format!("n.{}", pick(rng, PROPERTIES)),
                "=",
                Operand::literal(random_value(rng)),
            )?,
            5 => builder.order_by([(format!("n.{}", pick(rng, PROPERTIES)).as_str(), "DESC")])?,
            6 => builder.skip(rng.gen_range(0..50)),
            _ => builder.delete([format!("v{step}")], rng.gen_bool(0.5)),
        };
    }
    Ok(builder.add_custom_cypher(&padding(rng)).return_(()))
}

fn random_node(rng: &mut StdRng, idx: usize) -> NodePattern {
    let mut node = NodePattern::labeled(pick(rng, LABELS)).variable(format!("n{idx}"));
    if rng.gen_bool(0.5) {
        node = node.property(pick(rng, PROPERTIES), random_value(rng));
    }
    node
}

fn random_value(rng: &mut StdRng) -> CypherValue {
    match rng.gen_range(0..5) {
        0 => CypherValue::Int(rng.gen_range(-1_000..1_000)),
        1 => CypherValue::Float(rng.gen_range(-100.0..100.0)),
        2 => CypherValue::Bool(rng.gen_bool(0.5)),
        3 => CypherValue::String(format!("it's  value {}", rng.gen_range(0..10))),
        _ => CypherValue::List(vec![
            CypherValue::Int(rng.gen_range(0..10)),
            CypherValue::Null,
        ]),
    }
}

fn padding(rng: &mut StdRng) -> String {
    const BLANKS: &[char] = &[' ', '\t', '\n'];
    (0..rng.gen_range(0..4))
        .map(|_| BLANKS[rng.gen_range(0..BLANKS.len())])
        .collect()
}

fn pick<'a>(rng: &mut StdRng, options: &'a [&'a str]) -> &'a str {
    options[rng.gen_range(0..options.len())]
}
