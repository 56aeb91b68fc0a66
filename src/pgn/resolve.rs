//! Resolves a decoded [`SanMove`] against a [`Board`] to the unique
//! [`Move`] it denotes (`spec.md` §4.6). The upstream resolver this is
//! grounded on is a stub in the retrieved sources, so the eight-step
//! filter here is authoritative rather than transcribed.

use crate::board::Board;
use crate::location::Location;
use crate::movegen::legal_moves;
use crate::mv::Move;
use crate::square::{Color, SquareKind};

use super::tokens::SanMove;

/// `None` if zero or more than one legal move matches `san` on `board`.
#[must_use]
pub fn resolve(san: &SanMove, board: &Board) -> Option<Move> {
    let mover = board.turn();
    let candidates: Vec<Move> = legal_moves(board)
        .into_iter()
        .filter(|m| matches_castling(san, m, board, mover))
        .filter(|m| matches_destination(san, m))
        .filter(|m| matches_piece_kind(san, m))
        .filter(|m| san.promotion.is_some() == m.is_promotion)
        .filter(|m| matches_disambiguation(san, m))
        .filter(|m| san.capture == is_capture(board, m))
        .filter(|m| matches_check_state(san, m))
        .filter(|m| matches_promotion_kind(san, m))
        .collect();

    match candidates.len() {
        1 => candidates.into_iter().next(),
        _ => None,
    }
}

fn matches_castling(san: &SanMove, m: &Move, board: &Board, mover: Color) -> bool {
    if !san.is_castle() {
        return true;
    }
    let home_rank: i8 = if matches!(mover, Color::White) { 0 } else { 7 };
    let Ok(king_home) = Location::new(4, home_rank) else { return false };
    if m.src != king_home {
        return false;
    }
    let king = board[king_home];
    if king.is_empty() || king.kind() != SquareKind::King {
        return false;
    }
    let dest_file = if san.king_side_castle { 6 } else { 2 };
    let Ok(expected_dest) = Location::new(dest_file, home_rank) else { return false };
    m.dest == expected_dest
}

fn matches_destination(san: &SanMove, m: &Move) -> bool {
    if san.is_castle() {
        return true;
    }
    san.dest_file == Some(m.dest.file()) && san.dest_rank == Some(m.dest.rank())
}

fn matches_piece_kind(san: &SanMove, m: &Move) -> bool {
    if san.is_castle() {
        return true;
    }
    if san.piece_kind == SquareKind::Pawn && san.promotion.is_some() {
        return true;
    }
    m.result[m.dest].kind() == san.piece_kind
}

fn matches_disambiguation(san: &SanMove, m: &Move) -> bool {
    san.src_file.map_or(true, |f| f == m.src.file()) && san.src_rank.map_or(true, |r| r == m.src.rank())
}

/// A move is a capture if its destination was occupied by the opponent on
/// the pre-move board, or it is an en-passant capture (a diagonal pawn
/// move landing on the board's en-passant target).
fn is_capture(board: &Board, m: &Move) -> bool {
    let dest_sq = board[m.dest];
    if !dest_sq.is_empty() && dest_sq.color() != board.turn() {
        return true;
    }
    let moving = board[m.src];
    if moving.kind() != SquareKind::Pawn {
        return false;
    }
    m.src.file() != m.dest.file() && board.en_passant_target() == Some(m.dest)
}

fn matches_check_state(san: &SanMove, m: &Move) -> bool {
    let opponent_king_present = m.result.king_location(m.result.turn()).is_some();
    let no_legal_moves = legal_moves(&m.result).is_empty();
    let gives_mate = no_legal_moves && opponent_king_present;
    let is_stalemate = no_legal_moves && !m.causes_check();

    if san.check && !m.causes_check() {
        return false;
    }
    if san.checkmate != gives_mate && !is_stalemate {
        return false;
    }
    if !san.check && !san.checkmate && m.causes_check() && !gives_mate {
        return false;
    }
    true
}

fn matches_promotion_kind(san: &SanMove, m: &Move) -> bool {
    match san.promotion {
        Some(kind) => m.result[m.dest].kind() == kind,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square::Square;

    fn san(dest_file: i8, dest_rank: i8) -> SanMove {
        SanMove { dest_file: Some(dest_file), dest_rank: Some(dest_rank), ..SanMove::default() }
    }

    #[test]
    fn resolves_pawn_push() {
        let board = Board::standard();
        let resolved = resolve(&san(4, 3), &board).unwrap();
        assert_eq!(resolved.src, Location::new(4, 1).unwrap());
        assert_eq!(resolved.dest, Location::new(4, 3).unwrap());
    }

    #[test]
    fn resolves_knight_with_disambiguation() {
        let board = Board::with_pieces(
            Color::White,
            None,
            &[
                (Location::new(1, 0).unwrap(), Square::new(SquareKind::Knight, Color::White)),
                (Location::new(5, 0).unwrap(), Square::new(SquareKind::Knight, Color::White)),
                (Location::new(4, 0).unwrap(), Square::new(SquareKind::King, Color::White)),
                (Location::new(4, 7).unwrap(), Square::new(SquareKind::King, Color::Black)),
            ],
        );
        let mut query = san(3, 2);
        query.piece_kind = SquareKind::Knight;
        query.src_file = Some(1);
        let resolved = resolve(&query, &board).unwrap();
        assert_eq!(resolved.src, Location::new(1, 0).unwrap());
    }

    #[test]
    fn ambiguous_san_resolves_to_none() {
        let board = Board::with_pieces(
            Color::White,
            None,
            &[
                (Location::new(1, 0).unwrap(), Square::new(SquareKind::Knight, Color::White)),
                (Location::new(5, 0).unwrap(), Square::new(SquareKind::Knight, Color::White)),
                (Location::new(4, 0).unwrap(), Square::new(SquareKind::King, Color::White)),
                (Location::new(4, 7).unwrap(), Square::new(SquareKind::King, Color::Black)),
            ],
        );
        let mut query = san(3, 2);
        query.piece_kind = SquareKind::Knight;
        assert!(resolve(&query, &board).is_none());
    }

    #[test]
    fn resolves_capture_cross_check() {
        let board = Board::with_pieces(
            Color::White,
            None,
            &[
                (Location::new(3, 3).unwrap(), Square::new(SquareKind::Pawn, Color::White)),
                (Location::new(4, 4).unwrap(), Square::new(SquareKind::Pawn, Color::Black)),
                (Location::new(0, 0).unwrap(), Square::new(SquareKind::King, Color::White)),
                (Location::new(7, 7).unwrap(), Square::new(SquareKind::King, Color::Black)),
            ],
        );
        let mut query = san(4, 4);
        query.capture = true;
        let resolved = resolve(&query, &board).unwrap();
        assert_eq!(resolved.src, Location::new(3, 3).unwrap());
    }
}
