use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use scramble::generator::dictionary::Dictionary;
use scramble::generator::scramble::{pick_distinct_indices, scramble_word};
use scramble::session::training::{Training, TrainingSettings};

fn bench_scramble(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(7);

    c.bench_function("scramble_word (application)", |b| {
        b.iter(|| scramble_word(&mut rng, black_box("application")))
    });

    // two distinct letters: roughly half the shuffles equal the word and retry
    c.bench_function("scramble_word (ab)", |b| {
        b.iter(|| scramble_word(&mut rng, black_box("ab")))
    });
}

fn bench_pick(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(7);

    c.bench_function("pick_distinct_indices (6 of 11)", |b| {
        b.iter(|| pick_distinct_indices(&mut rng, black_box(11), black_box(6)))
    });

    // worst case for rejection sampling
    c.bench_function("pick_distinct_indices (11 of 11)", |b| {
        b.iter(|| pick_distinct_indices(&mut rng, black_box(11), black_box(11)))
    });
}

fn bench_generate(c: &mut Criterion) {
    let dictionary = Dictionary::load().unwrap();
    let mut rng = SmallRng::seed_from_u64(7);

    c.bench_function("Training::generate (defaults)", |b| {
        b.iter(|| Training::generate(&dictionary, TrainingSettings::default(), &mut rng))
    });
}

criterion_group!(benches, bench_scramble, bench_pick, bench_generate);
criterion_main!(benches);
