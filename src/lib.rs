//! Fluent openCypher query builder for Memgraph and Neo4j.
//! Run Criterion benchmarks with `cargo bench` to inspect reports under `target/criterion`.

pub mod algorithm;
pub mod bench_utils;
pub mod builder;
pub mod codec;
pub mod config;
pub mod connection;
pub mod errors;
pub mod index;
pub mod mapped;
pub mod partial;
pub mod projection;
pub mod trigger;
pub mod value;

pub use crate::algorithm::{
    AllShortestPath, BreadthFirstSearch, DepthFirstSearch, IntegratedAlgorithm,
    WeightedShortestPath, WeightedTraversal,
};
pub use crate::bench_utils::{ChainShape, generate_chain};
pub use crate::builder::{NodePattern, QueryBuilder, RelationshipPattern, collapse_whitespace};
pub use crate::codec::{
    CallArguments, LabelSpec, render_call_arguments, render_labels, render_properties,
    render_value,
};
pub use crate::config::{BooleanStyle, BuilderConfig, CodecConfig, Dialect, NanPolicy};
pub use crate::connection::{
    Connection, Parameters, QueryOutcome, Record, RecordedQuery, Records, RecordingConnection,
    SharedConnection, clear_default_connection, default_connection, record,
    set_default_connection,
};
pub use crate::errors::CypherGraphError;
pub use crate::index::{
    Constraint, Index, IndexKind, create_constraint, create_index, drop_constraint, drop_index,
    ensure_constraints, ensure_indexes, get_constraints, get_indexes,
};
pub use crate::mapped::{GraphNode, GraphRelationship, MappedNode, MappedRelationship};
pub use crate::partial::{
    Connective, Direction, IntoOperator, IntoOrderItem, Operand, Operator, Order, OrderItem,
    PartialQuery, QueryKind, ResultItem, ResultSpec,
};
pub use crate::projection::SubgraphProjection;
pub use crate::trigger::{
    Trigger, TriggerEvent, TriggerObject, TriggerPhase, create_trigger, drop_trigger,
    drop_triggers, get_triggers,
};
pub use crate::value::{CypherValue, Properties};
