use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jddf::{validate, Schema, ValidatorConfig};
use serde_json::json;

fn compile_benchmark(c: &mut Criterion) {
    let schema = black_box(json!({
        "properties": {
            "name": {"type": "string"},
            "age": {"type": "uint32"},
            "phones": {"elements": {"type": "string"}}
        }
    }));
    c.bench_function("jddf compile", |b| {
        b.iter(|| Schema::from_json(&schema).unwrap())
    });
}

fn validate_benchmark(c: &mut Criterion) {
    let schema = json!({
        "properties": {
            "name": {"type": "string"},
            "age": {"type": "uint32"},
            "phones": {"elements": {"type": "string"}}
        }
    });
    let schema = Schema::from_json(&schema).unwrap();
    schema.verify().unwrap();
    let instance = black_box(json!({
        "name": "Alice",
        "age": 30,
        "phones": ["+44 1234567", "+44 7654321"]
    }));
    let config = ValidatorConfig::default();
    c.bench_function("jddf validate", |b| {
        b.iter(|| validate(&config, &schema, &instance))
    });
}

fn ref_chain_benchmark(c: &mut Criterion) {
    let schema = json!({
        "definitions": {"node": {"properties": {"value": {"type": "int32"}, "next": {"ref": "node"}}, "optionalProperties": {}}},
        "ref": "node"
    });
    let schema = Schema::from_json(&schema).unwrap();
    schema.verify().unwrap();
    let mut instance = json!({"value": 0});
    for i in 1..20 {
        instance = json!({"value": i, "next": instance});
    }
    let instance = black_box(instance);
    let config = ValidatorConfig::new(64, 0);
    c.bench_function("jddf validate ref chain", |b| {
        b.iter(|| validate(&config, &schema, &instance))
    });
}

criterion_group!(
    benches,
    compile_benchmark,
    validate_benchmark,
    ref_chain_benchmark
);
criterion_main!(benches);
