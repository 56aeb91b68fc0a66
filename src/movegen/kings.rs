//! King pseudo-move generation: the eight adjacent offsets, plus castling
//! candidates. King-path safety is deferred to `legal_moves`'s post-filter
//! (`spec.md` §4.2 — castling "cannot attack").

use super::{is_capturable, is_empty, Tracker};
use crate::board::Board;
use crate::location::Location;
use crate::square::{Color, SquareKind};

const OFFSETS: [(i8, i8); 8] =
    [(0, 1), (1, 1), (1, 0), (1, -1), (0, -1), (-1, -1), (-1, 0), (-1, 1)];

/// (rook file, king destination file, rook destination file) for
/// king-side and queen-side castling respectively.
const CASTLE_SIDES: [(i8, i8, i8); 2] = [(7, 6, 5), (0, 2, 3)];

pub(super) fn generate(board: &Board, src: Location, tracker: &mut dyn Tracker) {
    let color = board[src].color();
    for &(dx, dy) in &OFFSETS {
        if let Some(dest) = src.add_delta(dx, dy) {
            if is_empty(board, dest) || is_capturable(board, dest, color) {
                tracker.add(board, src, dest);
            }
        }
    }
    generate_castling(board, src, color, tracker);
}

fn generate_castling(board: &Board, king_src: Location, color: Color, tracker: &mut dyn Tracker) {
    let king = board[king_src];
    if king.has_moved() {
        return;
    }
    let home_rank: i8 = if matches!(color, Color::White) { 0 } else { 7 };
    if king_src.rank() != home_rank || king_src.file() != 4 {
        return;
    }

    for &(rook_file, king_dest_file, rook_dest_file) in &CASTLE_SIDES {
        let Ok(rook_loc) = Location::new(rook_file, home_rank) else { continue };
        let rook = board[rook_loc];
        if rook.is_empty() || rook.kind() != SquareKind::Rook || rook.color() != color || rook.has_moved()
        {
            continue;
        }
        if !between_empty(board, king_src.file(), rook_file, home_rank) {
            continue;
        }
        let king_dest = Location::new(king_dest_file, home_rank).expect("castle dest in bounds");
        let rook_dest = Location::new(rook_dest_file, home_rank).expect("castle dest in bounds");
        tracker.add_castling(board, king_src, king_dest, rook_loc, rook_dest);
    }
}

fn between_empty(board: &Board, file_a: i8, file_b: i8, rank: i8) -> bool {
    let (lo, hi) = if file_a < file_b { (file_a + 1, file_b - 1) } else { (file_b + 1, file_a - 1) };
    for file in lo..=hi {
        match Location::new(file, rank) {
            Ok(loc) if board[loc].is_empty() => continue,
            _ => return false,
        }
    }
    true
}

/// The squares a castling king passes through, king_src to king_dest
/// inclusive, used by `legal_moves` to test path safety.
pub(super) fn path_inclusive(king_src: Location, king_dest: Location) -> Vec<Location> {
    let rank = king_src.rank();
    let (lo, hi) =
        if king_src.file() < king_dest.file() { (king_src.file(), king_dest.file()) } else { (king_dest.file(), king_src.file()) };
    (lo..=hi).filter_map(|file| Location::new(file, rank).ok()).collect()
}
