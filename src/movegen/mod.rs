//! The legal-move generator.
//!
//! A single per-piece enumeration routine drives two different callers
//! through the [`Tracker`] capability trait: [`legal_moves`] wants fully
//! classified [`Move`]s, [`threatened_mask`] only wants a bitmask of
//! reachable squares and must not allocate. Both share `generate_pseudo`;
//! only the tracker implementation differs (`spec.md` §4.2 and §9).

mod kings;
mod knights;
mod pawns;
mod sliders;

use crate::board::Board;
use crate::location::Location;
use crate::mv::{Classification, Move};
use crate::square::{Color, Square, SquareKind};

/// The capability set the per-piece generators drive. Implementors decide
/// what "finding a candidate move" means: push a fully-built `Move`, or
/// just flip a bit.
pub(crate) trait Tracker {
    fn add(&mut self, board: &Board, src: Location, dest: Location);
    fn add_castling(
        &mut self,
        board: &Board,
        king_src: Location,
        king_dest: Location,
        rook_src: Location,
        rook_dest: Location,
    );
    fn add_pawn_double_jump(&mut self, board: &Board, src: Location, dest: Location);
    fn add_en_passant(&mut self, board: &Board, src: Location, dest: Location, captured_pawn: Location);
    fn add_promotions(&mut self, board: &Board, src: Location, dest: Location);
}

pub(crate) fn is_empty(board: &Board, loc: Location) -> bool {
    board[loc].is_empty()
}

pub(crate) fn is_capturable(board: &Board, loc: Location, mover: Color) -> bool {
    !board[loc].is_empty() && board[loc].color() != mover
}

fn bit(loc: Location) -> u64 {
    1u64 << loc.index()
}

/// Dispatch every own-color piece on `board` to its per-piece generator.
fn generate_pseudo(board: &Board, tracker: &mut dyn Tracker) {
    for &loc in Location::all_squares() {
        let sq = board[loc];
        if sq.is_empty() || sq.color() != board.turn() {
            continue;
        }
        match sq.kind() {
            SquareKind::Pawn => pawns::generate(board, loc, tracker),
            SquareKind::Rook => sliders::generate_rook(board, loc, tracker),
            SquareKind::Knight => knights::generate(board, loc, tracker),
            SquareKind::Bishop => sliders::generate_bishop(board, loc, tracker),
            SquareKind::Queen => sliders::generate_queen(board, loc, tracker),
            SquareKind::King => kings::generate(board, loc, tracker),
            SquareKind::Empty => unreachable!("dispatch only visits occupied squares"),
        }
    }
}

/// The bitmask of squares the side to move on `board` could reach on its
/// next move, ignoring whether doing so would leave its own king attacked.
/// Hot path: allocates nothing.
#[must_use]
pub fn threatened_mask(board: &Board) -> u64 {
    let mut tracker = ThreatMaskTracker::default();
    generate_pseudo(board, &mut tracker);
    tracker.mask
}

/// Every legal move available to the side to move on `board`, fully
/// classified (check / checkmate / stalemate-adjacent normal).
#[must_use]
pub fn legal_moves(board: &Board) -> Vec<Move> {
    let mut tracker = FullMoveTracker::default();
    generate_pseudo(board, &mut tracker);

    let mover = board.turn();
    let mut out = Vec::with_capacity(tracker.moves.len());

    for mut candidate in tracker.moves {
        // Step 2: reject if the mover's own king is left attacked. A
        // missing king can never be "attacked" (spec.md §4.2 failure
        // semantics) so this check is simply skipped when absent.
        if let Some(king) = candidate.result.king_location(mover) {
            let defender_reach = threatened_mask(&candidate.result);
            if defender_reach & bit(king) != 0 {
                continue;
            }
        }

        // Step 3: castling additionally requires the king's path was safe
        // on the pre-move board.
        if is_castling_move(board, &candidate) {
            let pre_move_opponent_view = board.derive(mover.flip(), board.en_passant_target());
            let opponent_reach = threatened_mask(&pre_move_opponent_view);
            if kings::path_inclusive(candidate.src, candidate.dest)
                .iter()
                .any(|&loc| opponent_reach & bit(loc) != 0)
            {
                continue;
            }
        }

        // Steps 4-5: classify. The attacker's reach on the post-move board
        // is computed with turn flipped back to the mover, since
        // `candidate.result.turn()` is already the defender.
        let attacker_view = candidate.result.derive(mover, candidate.result.en_passant_target());
        let attacker_reach = threatened_mask(&attacker_view);
        let causes_check = candidate
            .result
            .king_location(mover.flip())
            .is_some_and(|king| attacker_reach & bit(king) != 0);

        candidate.classification = if !causes_check {
            Classification::Normal
        } else if has_any_legal_move(&candidate.result) {
            Classification::Check
        } else {
            Classification::Checkmate
        };

        out.push(candidate);
    }

    out
}

/// Whether the side to move on `board` has at least one legal move,
/// without paying for full classification of each candidate. Used only to
/// decide check vs. checkmate, so it does not need to recurse further.
fn has_any_legal_move(board: &Board) -> bool {
    let mut tracker = FullMoveTracker::default();
    generate_pseudo(board, &mut tracker);
    let mover = board.turn();

    for candidate in &tracker.moves {
        if let Some(king) = candidate.result.king_location(mover) {
            let defender_reach = threatened_mask(&candidate.result);
            if defender_reach & bit(king) != 0 {
                continue;
            }
        }
        if is_castling_move(board, candidate) {
            let pre_move_opponent_view = board.derive(mover.flip(), board.en_passant_target());
            let opponent_reach = threatened_mask(&pre_move_opponent_view);
            if kings::path_inclusive(candidate.src, candidate.dest)
                .iter()
                .any(|&loc| opponent_reach & bit(loc) != 0)
            {
                continue;
            }
        }
        return true;
    }
    false
}

fn is_castling_move(board: &Board, mv: &Move) -> bool {
    let moving_piece = board[mv.src];
    !moving_piece.is_empty()
        && moving_piece.kind() == SquareKind::King
        && mv.dest.rank() == mv.src.rank()
        && (mv.dest.file() - mv.src.file()).abs() == 2
}

#[derive(Default)]
struct FullMoveTracker {
    moves: Vec<Move>,
}

impl FullMoveTracker {
    fn push_simple(&mut self, board: &Board, src: Location, dest: Location, ep_target: Option<Location>) {
        let mut result = board.clone();
        let moved = result[src].moved();
        result[dest] = moved;
        result[src] = Square::empty();
        let result = result.derive(board.turn().flip(), ep_target);
        self.moves.push(Move {
            src,
            dest,
            result,
            classification: Classification::Normal,
            is_promotion: false,
        });
    }
}

impl Tracker for FullMoveTracker {
    fn add(&mut self, board: &Board, src: Location, dest: Location) {
        self.push_simple(board, src, dest, None);
    }

    fn add_castling(
        &mut self,
        board: &Board,
        king_src: Location,
        king_dest: Location,
        rook_src: Location,
        rook_dest: Location,
    ) {
        let mut result = board.clone();
        let king = result[king_src].moved();
        let rook = result[rook_src].moved();
        result[king_src] = Square::empty();
        result[rook_src] = Square::empty();
        result[king_dest] = king;
        result[rook_dest] = rook;
        let result = result.derive(board.turn().flip(), None);
        self.moves.push(Move {
            src: king_src,
            dest: king_dest,
            result,
            classification: Classification::Normal,
            is_promotion: false,
        });
    }

    fn add_pawn_double_jump(&mut self, board: &Board, src: Location, dest: Location) {
        self.push_simple(board, src, dest, Some(dest));
    }

    fn add_en_passant(&mut self, board: &Board, src: Location, dest: Location, captured_pawn: Location) {
        let mut result = board.clone();
        let moved = result[src].moved();
        result[dest] = moved;
        result[src] = Square::empty();
        result[captured_pawn] = Square::empty();
        let result = result.derive(board.turn().flip(), None);
        self.moves.push(Move {
            src,
            dest,
            result,
            classification: Classification::Normal,
            is_promotion: false,
        });
    }

    fn add_promotions(&mut self, board: &Board, src: Location, dest: Location) {
        let color = board[src].color();
        for &kind in &SquareKind::PROMOTION_CHOICES {
            let mut result = board.clone();
            result[dest] = Square::with_moved(kind, color, true);
            result[src] = Square::empty();
            let result = result.derive(board.turn().flip(), None);
            self.moves.push(Move {
                src,
                dest,
                result,
                classification: Classification::Normal,
                is_promotion: true,
            });
        }
    }
}

#[derive(Default)]
struct ThreatMaskTracker {
    mask: u64,
}

impl Tracker for ThreatMaskTracker {
    fn add(&mut self, _board: &Board, _src: Location, dest: Location) {
        self.mask |= bit(dest);
    }

    fn add_castling(
        &mut self,
        _board: &Board,
        _king_src: Location,
        _king_dest: Location,
        _rook_src: Location,
        _rook_dest: Location,
    ) {
        // Castling cannot attack; the king's normal-move squares already
        // cover its threat contribution (spec.md §4.2 tracker table).
    }

    fn add_pawn_double_jump(&mut self, _board: &Board, _src: Location, dest: Location) {
        self.mask |= bit(dest);
    }

    fn add_en_passant(&mut self, _board: &Board, _src: Location, dest: Location, _captured_pawn: Location) {
        self.mask |= bit(dest);
    }

    fn add_promotions(&mut self, _board: &Board, _src: Location, dest: Location) {
        self.mask |= bit(dest);
    }
}
