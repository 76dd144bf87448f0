use std::time::Duration;

use criterion::{Criterion, criterion_group, criterion_main};
use cyphergraph::{
    CodecConfig, CypherValue, Properties, QueryBuilder, RecordingConnection,
    bench_utils::{ChainShape, generate_chain},
    render_value,
};

const PATH_SEED: u64 = 0xA11C;
const FILTER_SEED: u64 = 0xB22D;
const MIXED_SEED: u64 = 0xC33E;
const SAMPLE_SIZE: usize = 20;
const WARM_UP: Duration = Duration::from_millis(300);
const MEASURE: Duration = Duration::from_millis(500);

struct PreparedChain<'c> {
    builder: QueryBuilder<&'c RecordingConnection>,
    label: &'static str,
}

fn bench_scale() -> usize {
    #[cfg(feature = "bench-ci")]
    {
        50
    }
    #[cfg(not(feature = "bench-ci"))]
    {
        500
    }
}

fn prepared_chains(conn: &RecordingConnection) -> Vec<PreparedChain<'_>> {
    let steps = bench_scale();
    vec![
        PreparedChain {
            builder: generate_chain(conn, ChainShape::Path { hops: steps }, PATH_SEED)
                .expect("path chain"),
            label: "path",
        },
        PreparedChain {
            builder: generate_chain(conn, ChainShape::Filtered { conditions: steps }, FILTER_SEED)
                .expect("filtered chain"),
            label: "filtered",
        },
        PreparedChain {
            builder: generate_chain(conn, ChainShape::Mixed { steps }, MIXED_SEED)
                .expect("mixed chain"),
            label: "mixed",
        },
    ]
}

fn bench_construct_query(c: &mut Criterion) {
    let conn = RecordingConnection::new();
    let chains = prepared_chains(&conn);
    let mut group = c.benchmark_group("construct_query");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP);
    group.measurement_time(MEASURE);
    for prepared in &chains {
        group.bench_function(prepared.label, |b| {
            b.iter(|| prepared.builder.construct_query());
        });
    }
    group.finish();
}

fn bench_compose(c: &mut Criterion) {
    let conn = RecordingConnection::new();
    let steps = bench_scale();
    let mut group = c.benchmark_group("compose");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP);
    group.measurement_time(MEASURE);
    group.bench_function("path", |b| {
        b.iter(|| generate_chain(&conn, ChainShape::Path { hops: steps }, PATH_SEED).expect("path"));
    });
    group.bench_function("mixed", |b| {
        b.iter(|| generate_chain(&conn, ChainShape::Mixed { steps }, MIXED_SEED).expect("mixed"));
    });
    group.finish();
}

fn bench_render_value(c: &mut Criterion) {
    let config = CodecConfig::default();
    let mut map = Properties::new();
    for idx in 0..bench_scale() {
        map.insert(
            format!("k{idx}"),
            CypherValue::List(vec![
                CypherValue::Int(idx as i64),
                CypherValue::String(format!("it's value {idx}")),
                CypherValue::Float(idx as f64 / 3.0),
                CypherValue::Null,
            ]),
        );
    }
    let nested = CypherValue::Map(map);
    let mut group = c.benchmark_group("render_value");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP);
    group.measurement_time(MEASURE);
    group.bench_function("nested_map", |b| {
        b.iter(|| render_value(&nested, &config).expect("render"));
    });
    group.finish();
}

criterion_group!(
    name = render_benches;
    config = Criterion::default();
    targets = bench_construct_query, bench_compose, bench_render_value
);
criterion_main!(render_benches);
