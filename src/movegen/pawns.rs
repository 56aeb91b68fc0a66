//! Pawn pseudo-move generation: forward pushes, diagonal captures, the
//! first-move double jump, en passant, and promotion (`spec.md` §4.2).

use super::{is_capturable, is_empty, Tracker};
use crate::board::Board;
use crate::location::Location;
use crate::square::Color;

pub(super) fn generate(board: &Board, src: Location, tracker: &mut dyn Tracker) {
    let piece = board[src];
    let color = piece.color();
    let direction: i8 = if matches!(color, Color::White) { 1 } else { -1 };
    let last_rank: i8 = if matches!(color, Color::White) { 7 } else { 0 };

    if let Some(fwd) = src.add_delta(0, direction) {
        if fwd.rank() != last_rank {
            if is_empty(board, fwd) {
                tracker.add(board, src, fwd);
            }
            for dx in [-1i8, 1] {
                if let Some(cap) = src.add_delta(dx, direction) {
                    if is_capturable(board, cap, color) {
                        tracker.add(board, src, cap);
                    }
                }
            }
        }
    }

    if !piece.has_moved() {
        if let Some(one_step) = src.add_delta(0, direction) {
            if is_empty(board, one_step) {
                if let Some(two_step) = src.add_delta(0, 2 * direction) {
                    if is_empty(board, two_step) {
                        tracker.add_pawn_double_jump(board, src, two_step);
                    }
                }
            }
        }
    }

    generate_promotions(board, src, color, direction, last_rank, tracker);
    generate_en_passant(board, src, direction, tracker);
}

fn generate_promotions(
    board: &Board,
    src: Location,
    color: Color,
    direction: i8,
    last_rank: i8,
    tracker: &mut dyn Tracker,
) {
    if let Some(fwd) = src.add_delta(0, direction) {
        if fwd.rank() == last_rank && is_empty(board, fwd) {
            tracker.add_promotions(board, src, fwd);
        }
    }
    for dx in [-1i8, 1] {
        if let Some(cap) = src.add_delta(dx, direction) {
            if cap.rank() == last_rank && is_capturable(board, cap, color) {
                tracker.add_promotions(board, src, cap);
            }
        }
    }
}

fn generate_en_passant(board: &Board, src: Location, direction: i8, tracker: &mut dyn Tracker) {
    let Some(target) = board.en_passant_target() else { return };
    if target.rank() != src.rank() || (target.file() - src.file()).abs() != 1 {
        return;
    }
    if let Some(dest) = target.add_delta(0, direction) {
        if is_empty(board, dest) {
            tracker.add_en_passant(board, src, dest, target);
        }
    }
}
