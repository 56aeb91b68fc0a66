//! The thin controller binding a [`Board`] to a [`Driver`] that supplies
//! promotion choices and receives terminal-state notifications
//! (`spec.md` §4.3, §4.3a).

use crate::board::Board;
use crate::error::DriverError;
use crate::location::Location;
use crate::movegen::legal_moves;
use crate::mv::Move;
use crate::square::{Color, Square, SquareKind};

/// Result of attempting a move through [`Game::move_piece`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Invalid,
    Normal,
    Checkmate,
    Stalemate,
}

/// External collaborator a [`Game`] calls into for promotion choice and
/// terminal-state notification. Called synchronously and exactly once per
/// applicable event; must not call back into the `Game` (`spec.md` §4.3a,
/// §5).
pub trait Driver: Sized {
    /// `mv.is_promotion` is guaranteed true. Must return a square of kind
    /// in `{rook, knight, bishop, queen}` and the mover's color, or the
    /// `Game` fails the move with [`DriverError`].
    fn promote(&mut self, game: &Game<Self>, mv: &Move) -> Square;
    fn checkmate(&mut self, game: &Game<Self>, mv: &Move);
    fn stalemate(&mut self, game: &Game<Self>, mv: &Move);
}

/// A `Driver` that always promotes to queen and ignores terminal
/// notifications — the `BasicDriver` of `spec.md` §4.3a, for callers that
/// have no UI to consult.
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoQueenDriver;

impl Driver for AutoQueenDriver {
    fn promote(&mut self, _game: &Game<Self>, mv: &Move) -> Square {
        let color = mv.result[mv.dest].color();
        Square::new(SquareKind::Queen, color)
    }
    fn checkmate(&mut self, _game: &Game<Self>, _mv: &Move) {}
    fn stalemate(&mut self, _game: &Game<Self>, _mv: &Move) {}
}

pub struct Game<D: Driver> {
    board: Board,
    driver: D,
}

impl<D: Driver> Game<D> {
    #[must_use]
    pub fn new(driver: D) -> Game<D> {
        Game { board: Board::standard(), driver }
    }

    #[must_use]
    pub fn with_board(driver: D, board: Board) -> Game<D> {
        Game { board, driver }
    }

    #[must_use]
    pub fn board(&self) -> Board {
        self.board.clone()
    }

    #[must_use]
    pub fn current_turn(&self) -> Color {
        self.board.turn()
    }

    /// Mutable access to the driver, for callers (e.g. a validator) that
    /// need to reconfigure it between moves.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Apply a move by source/destination, resolving promotion through the
    /// driver if needed (`spec.md` §4.3 steps 1-6).
    pub fn move_piece(&mut self, src: Location, dest: Location) -> Result<MoveOutcome, DriverError> {
        let candidates: Vec<Move> =
            legal_moves(&self.board).into_iter().filter(|m| m.src == src && m.dest == dest).collect();

        let chosen = match candidates.len() {
            0 => return Ok(MoveOutcome::Invalid),
            1 if !candidates[0].is_promotion => candidates.into_iter().next().unwrap(),
            _ => self.resolve_promotion(candidates)?,
        };

        let caused_check = chosen.causes_check();
        self.board = chosen.result.clone();

        let remaining = legal_moves(&self.board);
        if !remaining.is_empty() {
            return Ok(MoveOutcome::Normal);
        }

        #[cfg(feature = "logging")]
        log::debug!(
            "game reached terminal state after {}->{}: {}",
            chosen.src,
            chosen.dest,
            if caused_check { "checkmate" } else { "stalemate" }
        );

        // `Driver` methods take `&Game<Self>` alongside `&mut self`; since the
        // driver is itself a field of `Game`, the borrow checker can't see
        // that the two don't alias. The `Driver` contract (see trait docs)
        // guarantees the callback never calls back into the `Game`, so a raw
        // pointer split is sound here.
        let driver_ptr: *mut D = &mut self.driver;
        if caused_check {
            unsafe { (*driver_ptr).checkmate(self, &chosen) };
            Ok(MoveOutcome::Checkmate)
        } else {
            unsafe { (*driver_ptr).stalemate(self, &chosen) };
            Ok(MoveOutcome::Stalemate)
        }
    }

    fn resolve_promotion(&mut self, candidates: Vec<Move>) -> Result<Move, DriverError> {
        debug_assert!(candidates.iter().all(|m| m.is_promotion));
        let representative = &candidates[0];
        let driver_ptr: *mut D = &mut self.driver;
        let chosen_square = unsafe { (*driver_ptr).promote(self, representative) };

        #[cfg(feature = "logging")]
        log::debug!("driver chose promotion {chosen_square:?}");

        let mover = representative.result[representative.dest].color();
        let kind = chosen_square.kind();
        if chosen_square.color() != mover
            || !matches!(
                kind,
                SquareKind::Rook | SquareKind::Knight | SquareKind::Bishop | SquareKind::Queen
            )
        {
            return Err(DriverError::InvalidPromotion {
                reason: "promoted to a piece kind/color the driver contract forbids",
            });
        }

        candidates.into_iter().find(|m| m.result[m.dest].kind() == kind).ok_or(
            DriverError::InvalidPromotion { reason: "no candidate matched driver's promotion choice" },
        )
    }
}
