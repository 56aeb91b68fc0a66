//! Rook, bishop, and queen sliding generation along precomputed rays
//! (`Location::direction`), stopping at the first occupied square.

use super::{is_capturable, Tracker};
use crate::board::Board;
use crate::location::Location;

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

fn add_direction(board: &Board, src: Location, dx: i8, dy: i8, tracker: &mut dyn Tracker) {
    let color = board[src].color();
    for &loc in src.direction(dx, dy) {
        let sq = board[loc];
        if sq.is_empty() {
            tracker.add(board, src, loc);
            continue;
        }
        if is_capturable(board, loc, color) {
            tracker.add(board, src, loc);
        }
        break;
    }
}

pub(super) fn generate_rook(board: &Board, src: Location, tracker: &mut dyn Tracker) {
    for &(dx, dy) in &ROOK_DIRECTIONS {
        add_direction(board, src, dx, dy, tracker);
    }
}

pub(super) fn generate_bishop(board: &Board, src: Location, tracker: &mut dyn Tracker) {
    for &(dx, dy) in &BISHOP_DIRECTIONS {
        add_direction(board, src, dx, dy, tracker);
    }
}

pub(super) fn generate_queen(board: &Board, src: Location, tracker: &mut dyn Tracker) {
    generate_rook(board, src, tracker);
    generate_bishop(board, src, tracker);
}
