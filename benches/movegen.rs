//! Criterion benchmarks for the hot read paths: move generation and the
//! derived status queries, both of which walk the whole position.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use tabia::chess::board::Board;
use tabia::chess::core::Player;
use tabia::chess::{movegen, status};

fn generate_all(board: &Board) -> usize {
    let mut total = 0;
    for player in [Player::White, Player::Black] {
        for piece in board.pieces(player) {
            total += movegen::destinations(board, piece).len();
        }
    }
    total
}

fn midgame_board() -> Board {
    let mut board = Board::starting();
    for (from, to) in [
        ("e2", "e4"),
        ("e7", "e5"),
        ("g1", "f3"),
        ("b8", "c6"),
        ("f1", "c4"),
        ("f8", "c5"),
    ] {
        let _ = board.move_piece(from.try_into().unwrap(), to.try_into().unwrap());
    }
    board
}

fn movegen_bench(c: &mut Criterion) {
    let starting = Board::starting();
    let midgame = midgame_board();
    let _ = c
        .bench_function("destinations/starting", |b| {
            b.iter(|| black_box(generate_all(&starting)));
        })
        .bench_function("destinations/midgame", |b| {
            b.iter(|| black_box(generate_all(&midgame)));
        });
}

fn status_bench(c: &mut Criterion) {
    let midgame = midgame_board();
    let _ = c.bench_function("status/midgame", |b| {
        b.iter(|| {
            black_box(status::status(&midgame, Player::White));
            black_box(status::status(&midgame, Player::Black));
        });
    });
}

criterion_group! {
    name = engine;
    config = Criterion::default().sample_size(10);
    targets = movegen_bench, status_bench
}
criterion_main!(engine);
