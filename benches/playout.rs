use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use kusokurae::deck::Deck;
use kusokurae::engine::play_out;
use kusokurae::game::{Game, GameConfig};

fn bench_deal(c: &mut Criterion) {
    let mut g = c.benchmark_group("deal");
    for n in [3usize, 4] {
        g.bench_with_input(BenchmarkId::new("shuffle_and_deal", n), &n, |b, &n| {
            b.iter(|| {
                let mut deck = Deck::for_players(n).unwrap();
                deck.shuffle_seeded(black_box(42));
                deck.deal(n).unwrap()
            })
        });
    }
    g.finish();
}

fn bench_playout(c: &mut Criterion) {
    let mut g = c.benchmark_group("playout");
    for n in [3usize, 4] {
        g.bench_with_input(BenchmarkId::new("autoplay_game", n), &n, |b, &n| {
            let mut seed = 0u64;
            b.iter(|| {
                seed = seed.wrapping_add(1);
                let mut game = Game::new(GameConfig::new(n).with_seed(seed)).unwrap();
                black_box(play_out(&mut game).unwrap())
            })
        });
    }
    g.finish();
}

criterion_group!(benches, bench_deal, bench_playout);
criterion_main!(benches);
