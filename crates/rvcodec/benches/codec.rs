//! Performance benchmarks for rvcodec.
//!
//! Measures single-instruction decode and encode latency per format.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rvcodec::{decode_word, translate, Options};

fn bench_decode(c: &mut Criterion) {
    let opts = Options::default();
    let mut group = c.benchmark_group("decode");

    group.bench_function("r_add", |b| {
        b.iter(|| decode_word(black_box(0x003100b3), &opts).unwrap())
    });
    group.bench_function("i_load", |b| {
        b.iter(|| decode_word(black_box(0xff442503), &opts).unwrap())
    });
    group.bench_function("b_branch", |b| {
        b.iter(|| decode_word(black_box(0xfe629ee3), &opts).unwrap())
    });
    group.bench_function("fence", |b| {
        b.iter(|| decode_word(black_box(0x0f30000f), &opts).unwrap())
    });

    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let opts = Options::default();
    let mut group = c.benchmark_group("encode");

    group.bench_function("r_add", |b| {
        b.iter(|| translate(black_box("add x1, x2, x3"), &opts).unwrap())
    });
    group.bench_function("i_addi", |b| {
        b.iter(|| translate(black_box("addi x15, x1, -50"), &opts).unwrap())
    });
    group.bench_function("s_store", |b| {
        b.iter(|| translate(black_box("sw x5, -8(x2)"), &opts).unwrap())
    });
    group.bench_function("j_jal", |b| {
        b.iter(|| translate(black_box("jal x1, 2048"), &opts).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_decode, bench_encode);
criterion_main!(benches);
