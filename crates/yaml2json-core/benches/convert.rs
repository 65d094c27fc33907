use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::fmt::Write as _;
use std::hint::black_box;
use yaml2json_core::{Bridge, JsonEncoder, YamlDecoder};

/// Build a YAML document with `n` service entries.
fn services_yaml(n: usize) -> String {
    let mut doc = String::from("services:\n");
    for i in 0..n {
        let _ = write!(
            doc,
            "  - name: service-{i}\n    replicas: {}\n    cpu: {}.5\n    enabled: {}\n    tags: [web, tier-{}]\n",
            i % 5,
            i % 4,
            i % 2 == 0,
            i % 3
        );
    }
    doc
}

fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("yaml_to_json");
    for n in [10usize, 100, 1000] {
        let doc = services_yaml(n);
        group.throughput(Throughput::Bytes(doc.len() as u64));

        let compact = Bridge::yaml_to_json();
        group.bench_with_input(BenchmarkId::new("compact", n), &doc, |b, doc| {
            b.iter(|| compact.convert_slice(black_box(doc.as_bytes())).unwrap())
        });

        let pretty = Bridge::new(YamlDecoder::new(), JsonEncoder::new().pretty(true));
        group.bench_with_input(BenchmarkId::new("pretty", n), &doc, |b, doc| {
            b.iter(|| pretty.convert_slice(black_box(doc.as_bytes())).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_convert);
criterion_main!(benches);
