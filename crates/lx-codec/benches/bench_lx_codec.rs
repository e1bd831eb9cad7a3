use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lx_codec::{DictionaryCompiler, Lexicon};
use lx_core::config::DEFAULT_SUFFIXES;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;

fn generate_words(count: usize) -> Lexicon {
    let mut rng = StdRng::seed_from_u64(0x1e7);
    let mut words = BTreeSet::new();
    while words.len() < count {
        let stem: String = (0..rng.gen_range(3..=10))
            .map(|_| (b'a' + rng.gen_range(0..26)) as char)
            .collect();
        words.insert(stem.clone());
        for suffix in DEFAULT_SUFFIXES {
            if rng.gen_bool(0.15) {
                words.insert(format!("{stem}{suffix}"));
            }
        }
    }
    Lexicon::from(words)
}

fn bench_compile(c: &mut Criterion) {
    let compiler = DictionaryCompiler::default();
    for &(name, count) in &[("1k", 1_000), ("10k", 10_000), ("50k", 50_000)] {
        let lexicon = generate_words(count);
        c.bench_function(&format!("compile_{name}"), |b| {
            b.iter(|| black_box(compiler.compile(black_box(&lexicon)).unwrap()))
        });
    }
}

fn bench_decode(c: &mut Criterion) {
    let lexicon = generate_words(10_000);
    let artifact = DictionaryCompiler::default().compile(&lexicon).unwrap().artifact;
    c.bench_function("decode_10k", |b| {
        b.iter(|| black_box(artifact.decode().unwrap()))
    });
}

criterion_group!(benches, bench_compile, bench_decode);
criterion_main!(benches);
