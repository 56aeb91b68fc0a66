//! Replays a parsed game against the rules engine, reporting the first SAN
//! that fails to resolve or apply (`spec.md` §4.7, grounded on the
//! original's `chess::pgn::validate`).

use crate::error::ValidationError;
use crate::game::{Driver, Game, MoveOutcome};
use crate::mv::Move;
use crate::square::{Square, SquareKind};

use super::resolve::resolve;
use super::tokens::SanMove;

/// A `Driver` that promotes to whatever the SAN move under validation
/// specified. `validate` sets `promotion_choice` before every move that
/// might need it; a promoting move with no choice set is a validator bug,
/// not a user error, so it defaults to queen rather than panicking.
struct DirectedDriver {
    promotion_choice: Option<Square>,
}

impl Driver for DirectedDriver {
    fn promote(&mut self, _game: &Game<Self>, mv: &Move) -> Square {
        self.promotion_choice
            .unwrap_or_else(|| Square::new(SquareKind::Queen, mv.result[mv.dest].color()))
    }
    fn checkmate(&mut self, _game: &Game<Self>, _mv: &Move) {}
    fn stalemate(&mut self, _game: &Game<Self>, _mv: &Move) {}
}

/// Replay `moves` from the standard starting position. `Ok(())` if every
/// move resolved and applied; otherwise the index and text of the first
/// offender.
pub fn validate(moves: &[SanMove]) -> Result<(), ValidationError> {
    let mut game = Game::new(DirectedDriver { promotion_choice: None });

    for (index, san) in moves.iter().enumerate() {
        if let Some(kind) = san.promotion {
            game.driver_mut().promotion_choice = Some(Square::new(kind, game.current_turn()));
        }

        let Some(resolved) = resolve(san, &game.board()) else {
            return Err(ValidationError::UnresolvedMove { san: san.original_text.clone(), index });
        };
        match game.move_piece(resolved.src, resolved.dest) {
            Ok(MoveOutcome::Invalid) | Err(_) => {
                return Err(ValidationError::IllegalMove { san: san.original_text.clone(), index })
            }
            Ok(_) => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pgn::move_parser::MoveParser;

    #[test]
    fn validates_a_short_correct_game() {
        let mut parser = MoveParser::new("1. e4 e5 2. Nf3 Nc6 3. Bb5 1-0");
        let game = parser.next_game().unwrap().unwrap();
        assert!(validate(&game).is_ok());
    }

    #[test]
    fn reports_first_unresolvable_move() {
        // Bb4 is not a legal bishop move from f1 (wrong diagonal).
        let mut parser = MoveParser::new("1. e4 e5 2. Bb4 1-0");
        let game = parser.next_game().unwrap().unwrap();
        let err = validate(&game).unwrap_err();
        assert_eq!(err, ValidationError::UnresolvedMove { san: "Bb4".to_string(), index: 2 });
    }
}
