use axion::{
    from_bytes, from_str, to_bytes, to_string, to_string_with_options, ion, IonStruct, Property,
    SerializerOptions, Symbol, Value,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn record(id: usize) -> Value {
    let fields: IonStruct = vec![
        Property::named("id", Value::from(id)),
        Property::named("name", Value::from(format!("user{}", id))),
        Property::named("status", Value::symbol(Symbol::quoted("active"))),
        Property::named("score", Value::from(id as f64 * 1.5)),
        Property::named("tags", ion!(["a", "b", "c"])),
    ]
    .into_iter()
    .collect();
    Value::structure(fields)
}

fn records(size: usize) -> Value {
    Value::list((0..size).map(record).collect())
}

fn benchmark_serialize_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize_text");

    for size in [10, 100, 1000].iter() {
        let value = records(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &value, |b, value| {
            b.iter(|| to_string(black_box(value)))
        });
    }

    group.finish();
}

fn benchmark_parse_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_text");

    for size in [10, 100, 1000].iter() {
        let text = to_string(&records(*size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| from_str(black_box(text)))
        });
    }

    group.finish();
}

fn benchmark_pretty_text(c: &mut Criterion) {
    let value = records(100);
    let options = SerializerOptions::pretty();

    c.bench_function("serialize_pretty_100", |b| {
        b.iter(|| to_string_with_options(black_box(&value), &options))
    });
}

fn benchmark_binary(c: &mut Criterion) {
    let mut group = c.benchmark_group("binary");

    for size in [10, 100, 1000].iter() {
        let value = records(*size);
        let bytes = to_bytes(&value).unwrap();
        group.bench_with_input(BenchmarkId::new("encode", size), &value, |b, value| {
            b.iter(|| to_bytes(black_box(value)))
        });
        group.bench_with_input(BenchmarkId::new("decode", size), &bytes, |b, bytes| {
            b.iter(|| from_bytes(black_box(bytes)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_serialize_text,
    benchmark_parse_text,
    benchmark_pretty_text,
    benchmark_binary
);
criterion_main!(benches);
