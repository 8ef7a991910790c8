//! Criterion benchmarks for tesauro.
//!
//! Covers the three hot paths: clustering term groups into concepts,
//! building the inverted index and expanding query terms.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use tesauro::cluster::{RawTermGroup, cluster};
use tesauro::inverted::build_index;
use tesauro::thesaurus::Thesaurus;

const WORDS: &[&str] = &[
    "agudeza", "visual", "ojo", "derecho", "izquierdo", "presión", "intraocular", "lente",
    "contacto", "campo", "retina", "macular", "agujero", "córnea", "cristalino", "miopía",
    "hipermetropía", "astigmatismo", "adición", "distancia", "pupilar", "tonometría",
];

/// Canonical groups: one abbreviation and a two-word expansion each.
fn generate_canonical_groups(count: usize) -> Vec<RawTermGroup> {
    (0..count)
        .map(|i| {
            let first = WORDS[(i * 7) % WORDS.len()];
            let second = WORDS[(i * 13 + 5) % WORDS.len()];
            RawTermGroup::canonical([format!("S{i}"), format!("{first} {second} {i}")])
        })
        .collect()
}

/// Mergeable groups: half extend an existing concept, half start new ones.
fn generate_mergeable_groups(count: usize, canonical: usize) -> Vec<RawTermGroup> {
    (0..count)
        .map(|i| {
            if i % 2 == 0 {
                RawTermGroup::mergeable([format!("S{}", i % canonical), format!("SIN{i}")])
            } else {
                RawTermGroup::mergeable([format!("M{i}"), format!("termino {i}")])
            }
        })
        .collect()
}

fn bench_clustering(c: &mut Criterion) {
    let mut group = c.benchmark_group("clustering");

    for size in [100, 1_000, 10_000] {
        let canonical = generate_canonical_groups(size);
        let mergeable = vec![generate_mergeable_groups(size, size)];

        group.throughput(Throughput::Elements((size * 2) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let concepts = cluster(black_box(&canonical), black_box(&mergeable)).unwrap();
                black_box(concepts)
            })
        });
    }

    group.finish();
}

fn bench_index_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_build");

    let concepts = cluster(
        &generate_canonical_groups(5_000),
        &[generate_mergeable_groups(5_000, 5_000)],
    )
    .unwrap();

    group.throughput(Throughput::Elements(concepts.membership_count() as u64));
    group.bench_function("build_index", |b| {
        b.iter(|| black_box(build_index(black_box(&concepts))))
    });

    group.finish();
}

fn bench_expansion(c: &mut Criterion) {
    let mut group = c.benchmark_group("expansion");

    let thesaurus = Thesaurus::build(
        cluster(
            &generate_canonical_groups(5_000),
            &[generate_mergeable_groups(5_000, 5_000)],
        )
        .unwrap(),
    );
    let queries: Vec<String> = (0..1_000)
        .map(|i| match i % 3 {
            0 => format!("S{i}"),
            1 => format!("SIN{}", i - 1),
            _ => format!("desconocido {i}"),
        })
        .collect();

    group.bench_function("expand_single", |b| {
        b.iter(|| black_box(thesaurus.expand(black_box("S42")).unwrap()))
    });

    group.throughput(Throughput::Elements(queries.len() as u64));
    group.bench_function("expand_sequential", |b| {
        b.iter(|| {
            for query in &queries {
                let _ = black_box(thesaurus.expand(black_box(query)));
            }
        })
    });
    group.bench_function("expand_batch_parallel", |b| {
        b.iter(|| black_box(thesaurus.expand_batch(black_box(&queries)).unwrap()))
    });

    group.finish();
}

criterion_group!(benches, bench_clustering, bench_index_build, bench_expansion);

criterion_main!(benches);
