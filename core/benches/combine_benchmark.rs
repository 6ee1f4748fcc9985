use std::io::Read;

use combine_core::CombiningStream;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn event_batch(count: usize) -> CombiningStream {
    let mut inner = CombiningStream::new(", ");
    for id in 0..count {
        inner.add_bytes(format!("{{\"id\": {id}, \"kind\": \"click\"}}")).unwrap();
    }
    let mut outer = CombiningStream::default();
    outer.add_bytes("{\"events\":[").unwrap().add(inner).unwrap().add_bytes("]}").unwrap();
    outer
}

fn drain(mut stream: CombiningStream, buf: &mut [u8]) -> u64 {
    let mut total = 0u64;
    loop {
        let n = stream.read(buf).unwrap();
        if n == 0 {
            return total;
        }
        total += n as u64;
    }
}

fn bench_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("combining_stream_read");
    let len = event_batch(10_000).len();
    group.throughput(Throughput::Bytes(len));

    for buf_size in [64usize, 4 * 1024, 64 * 1024] {
        group.bench_with_input(BenchmarkId::from_parameter(buf_size), &buf_size, |b, &size| {
            let mut buf = vec![0u8; size];
            b.iter_batched(
                || event_batch(10_000),
                |stream| drain(stream, &mut buf),
                criterion::BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_read);
criterion_main!(benches);
