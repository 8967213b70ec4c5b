//! Benchmarks des encodeurs et du pipeline

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use genecoder_core::{encode, EncoderConfig, FecScheme, Method};
use std::time::Duration;

fn benchmark_primary_encoders(c: &mut Criterion) {
    // Données de test de différentes tailles
    let test_data = vec![
        ("small", (0..1024u32).map(|i| (i % 256) as u8).collect::<Vec<_>>()),
        ("medium", (0..1024 * 100u32).map(|i| (i % 256) as u8).collect::<Vec<_>>()),
    ];

    let mut group = c.benchmark_group("Primary Encoders");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(10);

    for (name, data) in &test_data {
        for method in [Method::Base4Direct, Method::Huffman, Method::GcBalanced] {
            let config = EncoderConfig {
                method,
                ..Default::default()
            };

            group.bench_function(format!("{:?}_{}", method, name), |b| {
                b.iter(|| {
                    let _ = encode(black_box(data), &config);
                });
            });
        }
    }

    group.finish();
}

fn benchmark_fec_layers(c: &mut Criterion) {
    let data: Vec<u8> = (0..1024 * 50u32).map(|i| (i % 256) as u8).collect();

    let mut group = c.benchmark_group("FEC Layers");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(10);

    for fec in [
        FecScheme::None,
        FecScheme::TripleRepeat,
        FecScheme::Hamming74,
        FecScheme::ReedSolomon,
    ] {
        let config = EncoderConfig {
            fec,
            ..Default::default()
        };

        group.bench_function(format!("{:?}", fec), |b| {
            b.iter(|| {
                let _ = encode(black_box(&data), &config);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_primary_encoders, benchmark_fec_layers);
criterion_main!(benches);
