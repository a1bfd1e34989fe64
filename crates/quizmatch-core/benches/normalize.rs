use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quizmatch_core::normalize::{Normalizer, SplitMode};

const ANSWERS: &[&str] = &[
    "The Mona Lisa",
    "Albert Einstein",
    "  The  Lord of the Rings: The Return of the King  ",
    "Rock & Roll Hall of Fame, Cleveland (Ohio)",
    "",
];

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    let single = Normalizer::new(SplitMode::SingleSpace);
    group.bench_function("single_space", |b| {
        b.iter(|| {
            for answer in ANSWERS {
                black_box(single.normalize(black_box(answer)));
            }
        })
    });

    let whitespace = Normalizer::new(SplitMode::Whitespace);
    group.bench_function("whitespace", |b| {
        b.iter(|| {
            for answer in ANSWERS {
                black_box(whitespace.normalize(black_box(answer)));
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
