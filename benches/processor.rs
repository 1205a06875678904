use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use dev_utils::{build_example_processor, get_example_input, get_example_queries};
use tramfare::Processor;

fn queries_benchmark(c: &mut Criterion) {
    let mut processor = build_example_processor();
    let queries = get_example_queries();
    c.bench_function("Queries", |b| {
        b.iter(|| {
            for query in &queries {
                processor
                    .process_line(black_box(query), &mut std::io::sink(), &mut std::io::sink())
                    .unwrap();
            }
        })
    });
}

fn input_benchmark(c: &mut Criterion) {
    let mut input = get_example_input();
    for query in get_example_queries() {
        input += query;
        input.push('\n');
    }
    c.bench_function("Whole input", |b| {
        b.iter(|| {
            Processor::new()
                .run(black_box(input.as_bytes()), &mut std::io::sink(), &mut std::io::sink())
                .unwrap()
        })
    });
}

criterion_group!(benches, queries_benchmark, input_benchmark);
criterion_main!(benches);
