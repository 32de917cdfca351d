/*!
Criterion benchmarks for graph generation, the label-setting engine, and the
Lagrangian relaxation baseline.
*/

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use pathina::core::generators::arbitrary_wc_graph;
use pathina::labeling::engine::{LabelSetting, LabelSettingConfig};
use pathina::relaxation::lagrangian::lagrangian_shortest_path;
use std::hint::black_box;

fn bench_graph_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("arbitrary_wc_graph");

    for size in [50, 100, 200, 500].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let graph = arbitrary_wc_graph(size, 20.0, 50.0, 5.0, 10.0, 5, 42).unwrap();
                black_box(graph)
            });
        });
    }
    group.finish();
}

fn bench_label_setting(c: &mut Criterion) {
    let mut group = c.benchmark_group("label_setting_run");

    for size in [20, 50, 100, 200].iter() {
        let graph = arbitrary_wc_graph(*size, 3.0, 3.0, 1.0, 1.0, 5, 42).unwrap();
        let max_weight = *size as u64;
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let run =
                    LabelSetting::run(&graph, 0, LabelSettingConfig::new(max_weight)).unwrap();
                black_box(run)
            });
        });
    }
    group.finish();
}

fn bench_lagrangian(c: &mut Criterion) {
    let mut group = c.benchmark_group("lagrangian_shortest_path");

    for size in [100, 500, 1000].iter() {
        let graph = arbitrary_wc_graph(*size, 20.0, 50.0, 5.0, 10.0, 5, 42).unwrap();
        let target = (*size - 1) as u32;
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let path = lagrangian_shortest_path(&graph, 0, target, 0.5).unwrap();
                black_box(path)
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_graph_generation,
    bench_label_setting,
    bench_lagrangian
);
criterion_main!(benches);
