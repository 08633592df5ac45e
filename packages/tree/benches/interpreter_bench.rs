use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;
use streamui_catalog::{space_mission, SPACE_MISSION_EXAMPLE};
use streamui_protocol::{Element, Operation};
use streamui_tree::Interpreter;

fn wide_stream(items: usize) -> Vec<String> {
    let mut root = Element::new("grid", "Grid").with_prop("columns", 4);
    root.children = (0..items).map(|i| format!("stat-{}", i)).collect();

    let mut lines = vec![Operation::set_root("grid").to_line(), Operation::add(&root).to_line()];
    for i in 0..items {
        let stat = Element::new(format!("stat-{}", i), "MissionStat")
            .with_prop("value", format!("{}K", i))
            .with_prop("label", "KM FROM EARTH")
            .with_prop("size", "md");
        lines.push(Operation::add(&stat).to_line());
    }
    lines
}

fn bench_apply(c: &mut Criterion) {
    let catalog = Arc::new(space_mission());

    c.bench_function("apply_example_stream", |b| {
        b.iter(|| {
            let mut interp = Interpreter::new(catalog.clone());
            black_box(interp.apply_all(SPACE_MISSION_EXAMPLE.lines()))
        })
    });

    let lines = wide_stream(500);
    c.bench_function("apply_500_stats", |b| {
        b.iter(|| {
            let mut interp = Interpreter::new(catalog.clone());
            black_box(interp.apply_all(&lines))
        })
    });

    c.bench_function("snapshot_during_stream", |b| {
        b.iter(|| {
            let mut interp = Interpreter::new(catalog.clone());
            for line in &lines {
                if interp.apply(line).changed() {
                    black_box(interp.snapshot());
                }
            }
        })
    });
}

criterion_group!(benches, bench_apply);
criterion_main!(benches);
