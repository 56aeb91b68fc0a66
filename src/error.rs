//! Crate-wide error types. One enum per failure domain, hand-rolled
//! `Display` impls, no `anyhow`/`thiserror` — errors are returned, not
//! unwound.

use std::fmt;

/// Failure constructing a [`crate::location::Location`] outside `[0, 8) x [0, 8)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationError {
    OutOfBounds { file: i8, rank: i8 },
}

impl fmt::Display for LocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationError::OutOfBounds { file, rank } => {
                write!(f, "location out of bounds: file={file}, rank={rank}")
            }
        }
    }
}

impl std::error::Error for LocationError {}

/// A [`crate::game::Driver`] returned a promotion square that violates the
/// driver contract (wrong kind or wrong color).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverError {
    InvalidPromotion { reason: &'static str },
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::InvalidPromotion { reason } => write!(f, "invalid driver action: {reason}"),
        }
    }
}

impl std::error::Error for DriverError {}

/// A PGN byte stream failed to lex or ended mid-game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PgnError {
    /// The lexer's state machine rejected the input near the given context.
    Syntax { near: String },
    /// EOF was reached after tags or moves began but before a termination
    /// marker appeared.
    IncompleteGame,
}

impl fmt::Display for PgnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PgnError::Syntax { near } => write!(f, "PGN syntax error near {near:?}"),
            PgnError::IncompleteGame => write!(f, "PGN stream ended mid-game"),
        }
    }
}

impl std::error::Error for PgnError {}

/// The first SAN move in a validated game that failed to resolve or apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// No legal move on the board matched the SAN text.
    UnresolvedMove { san: String, index: usize },
    /// The SAN resolved to a move, but applying it through the `Game` was
    /// rejected (e.g. the driver chose an invalid promotion).
    IllegalMove { san: String, index: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::UnresolvedMove { san, index } => {
                write!(f, "move {index} ({san:?}) did not match any legal move")
            }
            ValidationError::IllegalMove { san, index } => {
                write!(f, "move {index} ({san:?}) resolved but could not be applied")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
