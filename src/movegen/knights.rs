//! Knight pseudo-move generation: the eight fixed (±1,±2)/(±2,±1) offsets.

use super::{is_capturable, is_empty, Tracker};
use crate::board::Board;
use crate::location::Location;

const OFFSETS: [(i8, i8); 8] =
    [(1, 2), (1, -2), (-1, 2), (-1, -2), (2, 1), (2, -1), (-2, 1), (-2, -1)];

pub(super) fn generate(board: &Board, src: Location, tracker: &mut dyn Tracker) {
    let color = board[src].color();
    for &(dx, dy) in &OFFSETS {
        if let Some(dest) = src.add_delta(dx, dy) {
            if is_empty(board, dest) || is_capturable(board, dest, color) {
                tracker.add(board, src, dest);
            }
        }
    }
}
