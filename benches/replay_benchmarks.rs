use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use sokoban::config::GameConfig;
use sokoban::core::{Board, BoardSize, MoveCode};
use sokoban::level_file::{parse_board, parse_moves};
use sokoban::session::{Replay, ReplayMode, Session};

const PUZZLES: &[(&str, &str, &str)] = &[
    ("puzzle_1", r#"
######
#@$ .#
######
"#, "DD"),
    ("puzzle_2", r#"
######
#@$  #
# $. #
# .  #
######
"#, "DbgDhdBB"),
    ("open_room", r#"
##########
#@       #
#        #
#        #
#   $  . #
##########
"#, "dddddddbbggggggghhdddddddbggggggghuuuuuudddddd"),
];

fn level(text: &str) -> (Board, BoardSize) {
    let text = text.trim_matches('\n');
    let rows = text.lines().count();
    let cols = text.lines().map(|line| line.chars().count()).max().unwrap_or(0);
    let size = BoardSize::new(rows, cols);
    (parse_board(text, size).unwrap(), size)
}

pub fn bench_parse_level(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_level");

    for &(puzzle_name, puzzle, _) in PUZZLES {
        let (_, size) = level(puzzle);
        let text = puzzle.trim_matches('\n');
        group.throughput(Throughput::Elements(size.area() as u64));
        group.bench_with_input(BenchmarkId::new("parse_board", puzzle_name), &text, |b, &text| {
            b.iter(|| parse_board(black_box(text), size).unwrap())
        });
    }

    group.finish();
}

pub fn bench_replay(c: &mut Criterion) {
    let mut group = c.benchmark_group("replay");
    let config = GameConfig::default();

    for &(puzzle_name, puzzle, script) in PUZZLES {
        let (board, _) = level(puzzle);
        let codes: Vec<MoveCode> = parse_moves(script).unwrap();
        group.throughput(Throughput::Elements(codes.len() as u64));

        for (mode_name, mode) in [("run_to_end", ReplayMode::RunToEnd), ("stop_on_win", ReplayMode::StopOnWin)] {
            group.bench_with_input(BenchmarkId::new(mode_name, puzzle_name), &codes, |b, codes| {
                b.iter_with_setup(
                    || Replay::new(Session::new(board.clone(), &config).unwrap(), codes.clone(), mode),
                    |mut replay| black_box(replay.run().unwrap()),
                )
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_parse_level, bench_replay);
criterion_main!(benches);
