use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nfgrapher_contract::{
    add_commands, AudioParamInfo, AutomationTimeline, ContractOptions, TypedGraph,
};
use nfgrapher_score::{parse_score_str, Command, CommandArgs, Graph, Node, Score, Value};

fn automated_gain(index: usize) -> Node {
    let commands = (0..64)
        .map(|step| {
            Command::new(
                "linearRampToValueAtTime",
                CommandArgs::from([
                    ("value".to_string(), Value::from(step as f64 / 64.0)),
                    ("endTime".to_string(), Value::from(step as i64 * 250_000_000)),
                ]),
            )
        })
        .collect();
    let mut node = Node::new(format!("gain-{index}"), "com.nativeformat.plugin.waa.gain");
    node.params = Some([("gain".to_string(), commands)].into_iter().collect());
    node
}

fn score_with_tracks(tracks: usize) -> String {
    let mut graph = Graph::new("bench");
    graph.nodes = Some((0..tracks).map(automated_gain).collect());
    Score::new(graph).to_json().expect("serialize bench score")
}

fn typing(c: &mut Criterion) {
    let mut group = c.benchmark_group("contracts");
    let json = score_with_tracks(48);
    let score = parse_score_str(&json).expect("parse bench score");
    let options = ContractOptions::default();

    group.bench_function("parse_48_tracks", |b| {
        b.iter(|| parse_score_str(black_box(&json)).expect("parse"));
    });

    group.bench_function("type_48_tracks", |b| {
        b.iter(|| TypedGraph::from_graph(black_box(&score.graph), &options).expect("type"));
    });

    group.finish();
}

fn replay(c: &mut Criterion) {
    let mut builder = AudioParamInfo::builder(0.0);
    for step in 0..256_i64 {
        builder = builder.linear_ramp_to_value_at_time(step as f64, step * 10_000_000);
    }
    let info = builder.build();

    c.bench_function("replay_256_ramps", |b| {
        b.iter(|| {
            let mut timeline = AutomationTimeline::new(0.0);
            add_commands(&mut timeline, black_box(&info));
            timeline.value_for_time(1.5)
        });
    });
}

criterion_group!(benches, typing, replay);
criterion_main!(benches);
