//! Reader benchmarks
//!
//! Three document shapes are benchmarked:
//! 1. Scene - many small objects, the typical scene file
//! 2. Numbers - one long flat array of numbers
//! 3. Nested - deeply nested arrays close to the default depth limit
//!
//! Run with: cargo bench --bench reader

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use scenemark::{Reader, ReaderConfig};

fn scene_document(objects: usize) -> String {
    let mut out = String::new();
    for i in 0..objects {
        out.push_str(&format!(
            "{{\n  \"type\": \"mesh\",\n  \"name\": \"object_{i}\",\n  \"position\": [{i} {}.5 -{i}],\n  \"scale\": [1, 1, 1],\n  \"visible\": {}\n}}\n",
            i % 7,
            i % 2 == 0
        ));
    }
    out
}

fn number_document(count: usize) -> String {
    let body = (0..count)
        .map(|i| format!("{}.{}", i, i % 100))
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{}]", body)
}

fn nested_document(depth: usize) -> String {
    format!("{}1{}", "[".repeat(depth), "]".repeat(depth))
}

fn bench_scene(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene");
    for objects in [10, 100, 1000] {
        let input = scene_document(objects);
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(objects), &input, |b, input| {
            b.iter(|| Reader::parse(black_box(input.as_bytes()), "bench").unwrap())
        });
    }
    group.finish();
}

fn bench_numbers(c: &mut Criterion) {
    let input = number_document(10_000);
    let mut group = c.benchmark_group("numbers");
    group.throughput(Throughput::Bytes(input.len() as u64));
    group.bench_function("flat_10k", |b| {
        b.iter(|| Reader::parse(black_box(input.as_bytes()), "bench").unwrap())
    });
    group.finish();
}

fn bench_nested(c: &mut Criterion) {
    let input = nested_document(200);
    let config = ReaderConfig::default();
    c.bench_function("nested_200", |b| {
        b.iter(|| Reader::parse_with_config(black_box(input.as_bytes()), "bench", &config).unwrap())
    });
}

criterion_group!(benches, bench_scene, bench_numbers, bench_nested);
criterion_main!(benches);
