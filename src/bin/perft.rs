//! Perft-style legal-move counter: recursively counts leaf positions reached
//! from the standard starting position, to cross-check move generation
//! against the standard chessprogramming.org node counts.

use std::env;
use std::time::Instant;

use chess_core::board::Board;
use chess_core::movegen::legal_moves;

fn perft(board: &Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = legal_moves(board);
    if depth == 1 {
        return moves.len() as u64;
    }
    moves.iter().map(|mv| perft(&mv.result, depth - 1)).sum()
}

fn main() {
    let depth: u32 = env::args().nth(1).and_then(|arg| arg.parse().ok()).unwrap_or(4);

    println!("perft from the standard starting position, depth 1..={depth}");
    let board = Board::standard();
    for d in 1..=depth {
        let start = Instant::now();
        let nodes = perft(&board, d);
        println!("perft({d}) = {nodes} ({:?})", start.elapsed());
    }
}
