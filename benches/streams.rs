//! Benchmarks for stream access and framing.
//!
//! Measures the hot paths of the cursor protocol:
//! - Bulk and byte-wise reads
//! - Typed little-endian reads
//! - VLQ encoding and decoding
//! - Writing and walking length-prefixed sub-streams

extern crate spanstream;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use spanstream::{prelude::*, vlq};
use std::hint::black_box;

/// 64 KiB of `0, 1, 2, ...`.
fn sample_data() -> Vec<u8> {
    (0..65_536_u32).map(|i| (i % 251) as u8).collect()
}

/// Benchmark draining a buffer in 4 KiB reads.
fn bench_read_chunks(c: &mut Criterion) {
    let data = sample_data();
    let mut group = c.benchmark_group("read");
    group.throughput(Throughput::Bytes(data.len() as u64));

    group.bench_function("chunks_4k", |b| {
        let mut out = [0u8; 4096];
        b.iter(|| {
            let mut stream = ReadOnlyByteStream::new(black_box(&data));
            while let Some(count) = stream.read(&mut out) {
                black_box(&out[..count]);
            }
        });
    });

    group.bench_function("bytes", |b| {
        b.iter(|| {
            let mut stream = ReadOnlyByteStream::new(black_box(&data));
            let mut sum = 0_u32;
            while let Some(byte) = stream.read_byte() {
                sum = sum.wrapping_add(u32::from(byte));
            }
            black_box(sum)
        });
    });

    group.bench_function("u32_le", |b| {
        b.iter(|| {
            let mut stream = ReadOnlyByteStream::new(black_box(&data));
            let mut sum = 0_u32;
            while let Ok(value) = stream.read_le::<u32>() {
                sum = sum.wrapping_add(value);
            }
            black_box(sum)
        });
    });

    group.finish();
}

/// Benchmark VLQ coding across the value range.
fn bench_vlq(c: &mut Criterion) {
    let values: Vec<u64> = (0..63).map(|shift| (1_u64 << shift) - 1).collect();

    let mut encoded = vec![0u8; values.len() * vlq::MAX_VLQ_BYTES];
    let mut writer = ByteStream::new(&mut encoded);
    for value in &values {
        writer.write_vlq(*value).unwrap();
    }
    writer.flip();
    let written = writer.len();

    c.bench_function("vlq_encode", |b| {
        let mut buffer = vec![0u8; values.len() * vlq::MAX_VLQ_BYTES];
        b.iter(|| {
            let mut stream = ByteStream::new(&mut buffer);
            for value in &values {
                stream.write_vlq(black_box(*value)).unwrap();
            }
            black_box(stream.len())
        });
    });

    c.bench_function("vlq_decode", |b| {
        b.iter(|| {
            let mut stream = ReadOnlyByteStream::new(black_box(&encoded[..written]));
            while let Ok(value) = stream.read_vlq() {
                black_box(value);
            }
        });
    });
}

/// Benchmark writing and walking 1000 framed records.
fn bench_frames(c: &mut Criterion) {
    let payload = [0xA5_u8; 48];
    let mut framed = vec![0u8; 1000 * (payload.len() + 1)];

    c.bench_function("frames_write", |b| {
        b.iter(|| {
            let mut stream = ByteStream::new(&mut framed);
            for _ in 0..1000 {
                stream.write_sub_stream(black_box(&payload)).unwrap();
            }
            black_box(stream.len())
        });
    });

    c.bench_function("frames_walk", |b| {
        b.iter(|| {
            let mut stream = ReadOnlyByteStream::new(black_box(&framed));
            let mut total = 0;
            while let Ok(record) = stream.read_sub_stream_range() {
                total += record.len();
            }
            black_box(total)
        });
    });
}

criterion_group!(benches, bench_read_chunks, bench_vlq, bench_frames);
criterion_main!(benches);
