//! Benchmarks for stegrs.
//!
//! Run with:
//!     cargo bench

use std::io::Read;

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use stegrs::{Atom, Chunk, Context, codec};

fn carrier(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i * 7 + 13) as u8).collect()
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for atom_size in 1..=3u8 {
        let ctx = Context::new(atom_size).unwrap();
        let chunk = Chunk::from_slice(ctx.atom(), &carrier(ctx.chunk_size())).unwrap();

        group.throughput(Throughput::Bytes(ctx.chunk_size() as u64));
        group.bench_function(format!("table_atom{atom_size}"), |b| {
            b.iter(|| black_box(codec::decode(black_box(&chunk))))
        });

        // Per-bit mask evaluation, for comparison with the table path
        group.bench_function(format!("masks_atom{atom_size}"), |b| {
            b.iter(|| {
                let mut value = 0u32;
                for bit in 0..ctx.atom_bits() {
                    value |= u32::from(codec::decode_bit(black_box(&chunk), bit)) << bit;
                }
                black_box(value)
            })
        });
    }

    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for atom_size in 1..=2u8 {
        let ctx = Context::new(atom_size).unwrap();
        let mut chunk = Chunk::from_slice(ctx.atom(), &carrier(ctx.chunk_size())).unwrap();
        let desired = Atom::from_value(ctx.atom(), 0x5a5a);

        group.throughput(Throughput::Bytes(ctx.chunk_size() as u64));
        group.bench_function(format!("atom{atom_size}"), |b| {
            b.iter(|| black_box(codec::encode(&mut chunk, black_box(&desired))))
        });
    }

    group.finish();
}

fn bench_streaming(c: &mut Criterion) {
    let mut group = c.benchmark_group("streaming");
    let size = 1024 * 1024; // 1 MB
    let data = carrier(size);

    for atom_size in 1..=2u8 {
        let ctx = Context::new(atom_size).unwrap();
        let message = vec![0x42u8; ctx.capacity(size as u64) as usize];

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_function(format!("mux_atom{atom_size}"), |b| {
            b.iter(|| {
                let mut out = Vec::with_capacity(size);
                let summary = stegrs::embed(ctx, &mut out, black_box(&data[..]), &message[..])
                    .unwrap();
                black_box(summary)
            })
        });

        group.bench_function(format!("extract_atom{atom_size}"), |b| {
            b.iter(|| {
                let mut out = Vec::new();
                ctx.extractor(black_box(&data[..]))
                    .read_to_end(&mut out)
                    .unwrap();
                black_box(out.len())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_decode, bench_encode, bench_streaming);
criterion_main!(benches);
