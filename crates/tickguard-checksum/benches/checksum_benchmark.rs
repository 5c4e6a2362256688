//! Per-byte cost benchmarks for both checksum algorithms.
//!
//! The memory scanner picks Fletcher-16 over CRC16 on the strength of a
//! roughly 3x per-byte speed advantage; this bench keeps that trade-off
//! measurable.

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use tickguard_checksum::prelude::*;

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update");

    group.bench_function("crc16_single_byte", |b| {
        let mut state = Crc16Ccitt::INIT;
        b.iter(|| {
            state = Crc16Ccitt::update(black_box(state), black_box(0xA5));
            state
        });
    });

    group.bench_function("fletcher16_single_byte", |b| {
        let mut state = Fletcher16::INIT;
        b.iter(|| {
            state = Fletcher16::update(black_box(state), black_box(0xA5));
            state
        });
    });

    group.finish();
}

fn bench_bulk(c: &mut Criterion) {
    let data: Vec<u8> = (0..16384u32).map(|i| (i % 251) as u8).collect();

    let mut group = c.benchmark_group("bulk");
    group.throughput(Throughput::Bytes(data.len() as u64));

    group.bench_function("crc16_16k", |b| {
        b.iter(|| black_box(checksum_slice::<Crc16Ccitt>(black_box(&data))));
    });

    group.bench_function("fletcher16_16k", |b| {
        b.iter(|| black_box(checksum_slice::<Fletcher16>(black_box(&data))));
    });

    group.finish();
}

criterion_group!(benches, bench_update, bench_bulk);
criterion_main!(benches);
