use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::SmallRng, SeedableRng};
use std::time::Duration;
use tally::prelude::*;
use tally_bayes::{cross_validate, CategoricalNb, NaiveBayes};
use tally_datasets::generate;

fn train_bench(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(42);

    let mut benchmark = c.benchmark_group("categorical_nb_train");
    benchmark
        .sample_size(20)
        .measurement_time(Duration::from_secs(5));

    for nsamples in [1_000, 10_000, 100_000] {
        let dataset = generate::nominal(&mut rng, nsamples, &[4; 16], 5).unwrap();
        let mut model = CategoricalNb::<f64>::params().fit(&dataset).unwrap();

        benchmark.bench_with_input(
            BenchmarkId::new("train", nsamples),
            &nsamples,
            |bencher, _| bencher.iter(|| black_box(model.train_all().unwrap())),
        );
    }
    benchmark.finish();
}

fn cross_validation_bench(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(42);
    let dataset = generate::nominal(&mut rng, 5_000, &[3; 10], 3).unwrap();
    let mut model = CategoricalNb::<f64>::params().fit(&dataset).unwrap();

    c.bench_function("categorical_nb_cross_validate", |bencher| {
        bencher.iter(|| black_box(cross_validate(&mut model, 10).unwrap()))
    });
}

criterion_group!(benches, train_bench, cross_validation_bench);
criterion_main!(benches);
