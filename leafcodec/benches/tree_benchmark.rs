use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use leafcodec::{codec, EncodedLeaf, LeafTree, LeafType, Salt, SaltedLeaf, Schema, TypedValue};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;
use serde_json::json;

fn random_leaves(count: usize) -> Vec<SaltedLeaf> {
    let mut rng = ChaChaRng::from_seed([0; 32]);

    (0..count)
        .map(|i| {
            let value = json!(rng.gen::<u64>().to_string());
            TypedValue::new(LeafType::Uint64, format!("n{i}"), value)
                .with_salt(Salt::from_bytes(rng.gen()))
        })
        .collect()
}

fn encoded_leaves(count: usize) -> Vec<EncodedLeaf> {
    codec::encode_leaves(&random_leaves(count)).unwrap()
}

pub fn encode_benchmark(c: &mut Criterion) {
    let leaves = random_leaves(1000);

    c.bench_with_input(
        BenchmarkId::new("encode", "1k uint64"),
        &leaves,
        |bencher, leaves| {
            bencher.iter(|| black_box(codec::encode_leaves(leaves).unwrap()));
        },
    );
}

pub fn build_benchmark(c: &mut Criterion) {
    let leaves = encoded_leaves(1000);

    c.bench_with_input(
        BenchmarkId::new("build", "1k uint64"),
        &leaves,
        |bencher, leaves| {
            bencher.iter(|| {
                let tree = LeafTree::of(leaves.clone(), Schema::leaf()).unwrap();
                black_box(tree);
            });
        },
    );
}

pub fn multi_proof_benchmark(c: &mut Criterion) {
    let tree = LeafTree::of(encoded_leaves(1000), Schema::leaf()).unwrap();

    let mut rng = ChaChaRng::from_seed([1; 32]);
    let indices: Vec<usize> = (0..50).map(|_| rng.gen_range(0..tree.len())).collect();

    c.bench_with_input(
        BenchmarkId::new("multi_proof", "50 of 1k"),
        &indices,
        |bencher, indices| {
            bencher.iter(|| black_box(tree.multi_proof(indices).unwrap()));
        },
    );
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = encode_benchmark, build_benchmark, multi_proof_benchmark
}
criterion_main!(benches);
