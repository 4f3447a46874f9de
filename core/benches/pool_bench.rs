use bytes::Bytes;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use codec_core::compression::{codec_ids, Dispatcher, DispatcherConfig};

fn payload(len: usize) -> Vec<u8> {
    b"record-batch payload with some repetition; "
        .iter()
        .cycle()
        .take(len)
        .copied()
        .collect()
}

/// Pooled decode versus a closed dispatcher, which opens a fresh decoder on every call.
fn bench_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompress");
    let original = payload(16 * 1024);
    group.throughput(Throughput::Bytes(original.len() as u64));

    for (name, id) in [("gzip", codec_ids::GZIP), ("lz4", codec_ids::LZ4), ("zstd", codec_ids::ZSTD), ("snappy", codec_ids::SNAPPY)] {
        let pooled = Dispatcher::new(DispatcherConfig::default()).unwrap();
        let encoded = pooled.compress(id, &original, None).unwrap();
        group.bench_with_input(BenchmarkId::new("pooled", name), &encoded, |b, encoded| {
            b.iter(|| pooled.decompress(id, black_box(Bytes::clone(encoded))).unwrap())
        });

        let unpooled = Dispatcher::new(DispatcherConfig::default()).unwrap();
        unpooled.close().unwrap();
        group.bench_with_input(BenchmarkId::new("fresh", name), &encoded, |b, encoded| {
            b.iter(|| unpooled.decompress(id, black_box(Bytes::clone(encoded))).unwrap())
        });
    }
    group.finish();
}

fn bench_zstd_compress(c: &mut Criterion) {
    let d = Dispatcher::new(DispatcherConfig::default()).unwrap();
    let original = payload(16 * 1024);
    c.bench_function("zstd_compress_pooled", |b| {
        b.iter(|| d.compress(codec_ids::ZSTD, black_box(&original), None).unwrap())
    });
}

criterion_group!(benches, bench_decompress, bench_zstd_compress);
criterion_main!(benches);
