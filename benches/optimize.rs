use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use cutlay_core::prelude::*;

fn generate_parts(count: usize, min_size: u32, max_size: u32) -> Vec<Part> {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| match i % 3 {
            0 => Part::Rectangular {
                largura: rng.gen_range(min_size..=max_size),
                altura: rng.gen_range(min_size..=max_size),
                rotacao: 0,
            },
            1 => Part::Circular {
                r: rng.gen_range(min_size..=max_size) / 2,
            },
            _ => Part::Diamond {
                largura: rng.gen_range(min_size..=max_size),
                altura: rng.gen_range(min_size..=max_size),
                rotacao: 0,
            },
        })
        .collect()
}

fn bench_pack(c: &mut Criterion) {
    let mut group = c.benchmark_group("pack");
    let sheet = Sheet::new(1024, 1024);

    for count in [50, 100, 200] {
        let parts = generate_parts(count, 16, 64);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("flexible", count), &parts, |b, parts| {
            b.iter(|| black_box(pack(sheet, parts, &ScanConfig::default())));
        });
    }

    group.finish();
}

fn bench_aco_optimize(c: &mut Criterion) {
    let mut group = c.benchmark_group("aco_optimize");
    let sheet = Sheet::new(512, 512);

    for count in [20, 50] {
        let parts = generate_parts(count, 16, 64);
        group.bench_with_input(BenchmarkId::new("ants_10_iters_10", count), &parts, |b, parts| {
            let cfg = AcoConfig {
                num_ants: 10,
                num_iterations: 10,
                margin: 1,
                seed: 1,
            };
            b.iter(|| black_box(aco_optimize(sheet, parts, &cfg).unwrap()));
        });
    }

    group.finish();
}

fn bench_ga_optimize(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_optimize");
    let sheet = Sheet::new(512, 512);

    for count in [20, 50] {
        let parts = generate_parts(count, 16, 64);
        group.bench_with_input(
            BenchmarkId::new("pop_30_gens_20", count),
            &parts,
            |b, parts| {
                let cfg = GaConfig {
                    population_size: 30,
                    num_generations: 20,
                    seed: 1,
                };
                b.iter(|| black_box(ga_optimize(sheet, parts, &cfg).unwrap()));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_pack, bench_aco_optimize, bench_ga_optimize);
criterion_main!(benches);
