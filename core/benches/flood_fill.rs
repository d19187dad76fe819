use cellsweep_core::*;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn flood_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("flood_fill");

    let expert = Difficulty::Expert.config();
    let empty = Grid::new(expert.size).expect("expert board is valid");
    group.bench_function("expert_empty", |b| {
        b.iter(|| {
            let mut grid = empty.clone();
            black_box(touch_adjacent(&mut grid, black_box((15, 8))))
        })
    });

    let widest = Grid::new((Coord::MAX, Coord::MAX)).expect("widest board is valid");
    group.bench_function("widest_empty", |b| {
        b.iter(|| {
            let mut grid = widest.clone();
            black_box(touch_adjacent(&mut grid, black_box((0, 0))))
        })
    });

    group.finish();
}

fn first_reveal(c: &mut Criterion) {
    let mut seed = 0;
    c.bench_function("first_reveal_expert", |b| {
        b.iter(|| {
            seed += 1;
            let mut session =
                Session::new(Difficulty::Expert.config(), seed).expect("expert board is valid");
            black_box(session.primary_action((15, 8)))
        })
    });
}

criterion_group!(benches, flood_fill, first_reveal);
criterion_main!(benches);
