use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use streamui_protocol::{Element, LineAssembler, Operation};

fn sample_stream(elements: usize) -> String {
    let mut out = Operation::set_root("root").to_line();
    out.push('\n');
    let children: Vec<String> = (0..elements).map(|i| format!("item-{}", i)).collect();
    let mut root = Element::new("root", "Stack").with_prop("direction", "vertical");
    root.children = children;
    out.push_str(&Operation::add(&root).to_line());
    out.push('\n');
    for i in 0..elements {
        let text = Element::new(format!("item-{}", i), "Text")
            .with_prop("content", format!("Line number {} of the generated page", i));
        out.push_str(&Operation::add(&text).to_line());
        out.push('\n');
    }
    out
}

fn bench_assembler(c: &mut Criterion) {
    let stream = sample_stream(200);
    let mut group = c.benchmark_group("line_assembler");

    for chunk_size in [1usize, 16, 256, 4096] {
        group.bench_with_input(
            BenchmarkId::from_parameter(chunk_size),
            &chunk_size,
            |b, &chunk_size| {
                b.iter(|| {
                    let mut assembler = LineAssembler::new();
                    let mut count = 0;
                    for chunk in stream.as_bytes().chunks(chunk_size) {
                        count += assembler.feed_bytes(chunk).len();
                    }
                    count += assembler.finish().into_iter().count();
                    black_box(count)
                })
            },
        );
    }

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let stream = sample_stream(200);
    let lines: Vec<&str> = stream.lines().collect();

    c.bench_function("operation_parse", |b| {
        b.iter(|| {
            for line in &lines {
                black_box(Operation::parse(line).ok());
            }
        })
    });
}

criterion_group!(benches, bench_assembler, bench_parse);
criterion_main!(benches);
