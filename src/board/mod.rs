//! The position value type: 64 squares, side to move, en-passant target.

use std::ops::{Index, IndexMut};

use crate::location::Location;
use crate::square::{Color, Square, SquareKind};

/// An immutable chess position. Cloning is a plain value copy; there is no
/// shared interior state, so two `Board`s never alias.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    squares: [Square; 64],
    turn: Color,
    en_passant_target: Option<Location>,
}

impl Board {
    /// The standard chess starting position, white to move.
    #[must_use]
    pub fn standard() -> Board {
        use SquareKind::*;
        let back_rank = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        let mut pieces = Vec::with_capacity(32);
        for (file, &kind) in back_rank.iter().enumerate() {
            pieces.push((Location::new(file as i8, 0).unwrap(), Square::new(kind, Color::White)));
            pieces.push((Location::new(file as i8, 7).unwrap(), Square::new(kind, Color::Black)));
        }
        for file in 0..8 {
            pieces.push((Location::new(file, 1).unwrap(), Square::new(Pawn, Color::White)));
            pieces.push((Location::new(file, 6).unwrap(), Square::new(Pawn, Color::Black)));
        }
        Board::with_pieces(Color::White, None, &pieces)
    }

    /// An empty board, white to move.
    #[must_use]
    pub fn blank() -> Board {
        Board { squares: [Square::empty(); 64], turn: Color::White, en_passant_target: None }
    }

    /// Build a board from a sparse piece list. Squares not listed are empty.
    ///
    /// Debug builds assert the "at most one king per color" invariant and
    /// the en-passant-target invariant from `spec.md` §3; release builds
    /// trust the caller, since this is a construction-time contract rather
    /// than something recoverable at runtime.
    #[must_use]
    pub fn with_pieces(
        turn: Color,
        en_passant_target: Option<Location>,
        pieces: &[(Location, Square)],
    ) -> Board {
        let mut squares = [Square::empty(); 64];
        for &(loc, sq) in pieces {
            squares[loc.index()] = sq;
        }
        let board = Board { squares, turn, en_passant_target };
        debug_assert!(board.at_most_one_king_per_color());
        debug_assert!(board.en_passant_invariant_holds());
        board
    }

    fn at_most_one_king_per_color(&self) -> bool {
        for color in [Color::White, Color::Black] {
            let count = self
                .squares
                .iter()
                .filter(|sq| sq.kind() == SquareKind::King && !sq.is_empty() && sq.color() == color)
                .count();
            if count > 1 {
                return false;
            }
        }
        true
    }

    fn en_passant_invariant_holds(&self) -> bool {
        let Some(target) = self.en_passant_target else { return true };
        let sq = self[target];
        if sq.is_empty() || sq.kind() != SquareKind::Pawn {
            return false;
        }
        // The square immediately behind the target, in the direction the
        // pawn travelled, must be empty.
        let behind_dy = if sq.color() == Color::White { -1 } else { 1 };
        match target.add_delta(0, behind_dy) {
            Some(behind) => self[behind].is_empty(),
            None => false,
        }
    }

    #[must_use]
    pub fn turn(&self) -> Color {
        self.turn
    }

    #[must_use]
    pub fn en_passant_target(&self) -> Option<Location> {
        self.en_passant_target
    }

    #[must_use]
    pub fn king_location(&self, color: Color) -> Option<Location> {
        Location::all_squares()
            .iter()
            .copied()
            .find(|&loc| {
                let sq = self[loc];
                !sq.is_empty() && sq.kind() == SquareKind::King && sq.color() == color
            })
    }

    /// Internal helper used by the move generator: a board identical to
    /// `self` but with `turn` and `en_passant_target` replaced. Only the
    /// generator constructs post-move boards this way; `Board` itself has
    /// no other mutators.
    pub(crate) fn derive(&self, turn: Color, en_passant_target: Option<Location>) -> Board {
        Board { squares: self.squares, turn, en_passant_target }
    }
}

impl Index<Location> for Board {
    type Output = Square;
    fn index(&self, loc: Location) -> &Square {
        &self.squares[loc.index()]
    }
}

impl IndexMut<Location> for Board {
    fn index_mut(&mut self, loc: Location) -> &mut Square {
        &mut self.squares[loc.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_position_has_32_pieces() {
        let board = Board::standard();
        let occupied = Location::all_squares().iter().filter(|&&loc| !board[loc].is_empty()).count();
        assert_eq!(occupied, 32);
        assert_eq!(board.turn(), Color::White);
        assert_eq!(board.en_passant_target(), None);
    }

    #[test]
    fn board_body_is_64_bytes() {
        assert_eq!(std::mem::size_of::<[Square; 64]>(), 64);
    }

    #[test]
    fn king_location_found() {
        let board = Board::standard();
        assert_eq!(board.king_location(Color::White), Location::new(4, 0).ok());
        assert_eq!(board.king_location(Color::Black), Location::new(4, 7).ok());
    }

    #[test]
    fn king_location_missing_is_none() {
        let board = Board::blank();
        assert_eq!(board.king_location(Color::White), None);
    }
}
