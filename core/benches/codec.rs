use std::io::{Cursor, Read, Write};

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use wreck::stream::{StreamScanner, StreamWriter};
use wreck::textsafe::{TextSafeReader, TextSafeWriter};

const DIM: usize = 384;

fn vectors(count: usize) -> Vec<Vec<f32>> {
    (0..count)
        .map(|i| (0..DIM).map(|j| ((i * DIM + j) % 97) as f32 / 97.0).collect())
        .collect()
}

fn write_stream(vecs: &[Vec<f32>]) -> Vec<u8> {
    let mut w = StreamWriter::<f32, _>::new(Vec::new()).unwrap();
    for (i, v) in vecs.iter().enumerate() {
        w.write(&(i as u32).to_le_bytes(), b"", v).unwrap();
    }
    w.into_inner()
}

fn bench_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("write");

    for count in [100, 1000] {
        let vecs = vectors(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(format!("{count}_vectors"), |b| {
            b.iter(|| black_box(write_stream(black_box(&vecs))))
        });
    }
    group.finish();
}

fn bench_scan(c: &mut Criterion) {
    let wire = write_stream(&vectors(1000));

    let mut group = c.benchmark_group("scan");
    group.throughput(Throughput::Bytes(wire.len() as u64));
    group.bench_function("1000_vectors", |b| {
        b.iter(|| {
            let mut r = StreamScanner::<f32, _>::new(Cursor::new(black_box(&wire))).unwrap();
            let mut n = 0;
            while StreamScanner::scan(&mut r) {
                n += r.vector().len();
            }
            black_box(n)
        })
    });
    group.finish();
}

fn bench_textsafe(c: &mut Criterion) {
    let wire = write_stream(&vectors(100));

    let mut group = c.benchmark_group("textsafe");
    group.throughput(Throughput::Bytes(wire.len() as u64));
    for compressed in [false, true] {
        let name = if compressed { "gzip_roundtrip" } else { "plain_roundtrip" };
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut w = TextSafeWriter::new(Vec::new(), compressed);
                w.write_all(black_box(&wire)).unwrap();
                let text = w.close().unwrap();

                let mut out = Vec::with_capacity(wire.len());
                TextSafeReader::new(Cursor::new(text), compressed)
                    .unwrap()
                    .read_to_end(&mut out)
                    .unwrap();
                black_box(out)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_write, bench_scan, bench_textsafe);
criterion_main!(benches);
