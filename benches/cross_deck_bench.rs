//! Cross-deck ranking throughput for both matching policies.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use deckmatch::compare::{ComparisonOptions, find_similar_pairs, rank_correspondences};
use deckmatch::{BoundingBox, Deck, Element, MatchPolicy, SimilarityConfig, Slide};

/// A deck of `slides` slides with a title, two bullets and an image each.
fn synthetic_deck(name: &str, slides: usize, seed: usize) -> Deck {
    let slides = (0..slides)
        .map(|i| {
            let n = i + seed;
            let offset = (n % 7) as f64 * 0.01;
            Slide::new(vec![
                Element::text(format!("Section {} overview", n % 13), BoundingBox::new(0.05, 0.05, 0.9, 0.15))
                    .with_embedding(vec![(n % 5) as f32, 1.0, (n % 3) as f32]),
                Element::text(
                    format!("Revenue grew {}% in region {}", n % 17, n % 4),
                    BoundingBox::new(0.1, 0.25 + offset, 0.5, 0.2),
                )
                .with_embedding(vec![1.0, (n % 4) as f32, 0.5]),
                Element::text(
                    format!("Costs held at {} units", n % 11),
                    BoundingBox::new(0.1, 0.5 + offset, 0.5, 0.2),
                ),
                Element::image(BoundingBox::new(0.65, 0.25, 0.3, 0.5)),
            ])
        })
        .collect();
    Deck::new(name, None, slides)
}

fn bench_rank_correspondences(c: &mut Criterion) {
    let config = SimilarityConfig::default();
    let mut group = c.benchmark_group("rank_correspondences");

    for size in [10, 40] {
        let source = synthetic_deck("new", size, 0);
        let target = synthetic_deck("old", size, 3);

        for policy in [MatchPolicy::Coverage, MatchPolicy::Exclusive] {
            let options = ComparisonOptions::default().with_policy(policy);
            let matcher = options.matcher(config);
            group.bench_with_input(
                BenchmarkId::new(policy.as_str(), size),
                &(&source, &target),
                |bench, (source, target)| {
                    bench.iter(|| {
                        rank_correspondences(
                            black_box(&source.slides),
                            black_box(&target.slides),
                            matcher.as_ref(),
                            options.rank_threshold(),
                        )
                    })
                },
            );
        }
    }
    group.finish();
}

fn bench_within_deck(c: &mut Criterion) {
    let config = SimilarityConfig::default();
    let deck = synthetic_deck("deck", 60, 0);

    c.bench_function("find_similar_pairs_60", |bench| {
        bench.iter(|| find_similar_pairs(black_box(&deck.slides), &config))
    });
}

criterion_group!(benches, bench_rank_correspondences, bench_within_deck);
criterion_main!(benches);
