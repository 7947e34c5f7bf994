use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rusty_svd::prelude::*;

pub fn svd(c: &mut Criterion) {
    let mut rng = rand::thread_rng();

    for (m, n) in [(32, 32), (128, 128), (256, 64), (64, 256), (512, 512)].iter() {
        let mat = f64::random_gaussian((*m, *n), &mut rng);

        c.bench_function(&format!("svd-f64-{}x{}", m, n), |b| {
            b.iter(|| mat.compute_svd().unwrap())
        });
    }

    let mat = f32::random_gaussian((256, 256), &mut rng);
    c.bench_function("svd-f32-256x256", |b| b.iter(|| mat.compute_svd().unwrap()));
}

pub fn solve(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let mat = f64::random_approximate_low_rank_matrix((200, 100), 1.0, 1E-12, &mut rng).unwrap();
    let rhs = f64::random_gaussian((200, 1), &mut rng).column(0).to_owned();
    let svd = mat.compute_svd().unwrap();

    c.bench_function("pinv-200x100", |b| b.iter(|| svd.pseudo_inverse(None)));
    c.bench_function("tsvd-200x100", |b| {
        b.iter(|| svd.solve_truncated(black_box(rhs.view()), None).unwrap())
    });
}

criterion_group!(benches, svd, solve);
criterion_main!(benches);
