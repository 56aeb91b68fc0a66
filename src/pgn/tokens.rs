//! Lexical units the PGN lexer emits, and the SAN move shape they and the
//! move parser pass along (`spec.md` §4.4-§4.5).

use crate::square::{Color, SquareKind};

/// A single SAN move as decoded by the lexer, before resolution against a
/// board. Fields left `None`/`false` simply were not present in the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanMove {
    pub dest_file: Option<i8>,
    pub dest_rank: Option<i8>,
    pub src_file: Option<i8>,
    pub src_rank: Option<i8>,
    pub promotion: Option<SquareKind>,
    pub piece_kind: SquareKind,
    pub capture: bool,
    pub check: bool,
    pub checkmate: bool,
    pub king_side_castle: bool,
    pub queen_side_castle: bool,
    pub original_text: String,
}

impl Default for SanMove {
    /// `piece_kind` defaults to pawn, per the SAN decoding rule that an
    /// absent leading piece letter means pawn (`spec.md` §4.4 step 8).
    fn default() -> SanMove {
        SanMove {
            dest_file: None,
            dest_rank: None,
            src_file: None,
            src_rank: None,
            promotion: None,
            piece_kind: SquareKind::Pawn,
            capture: false,
            check: false,
            checkmate: false,
            king_side_castle: false,
            queen_side_castle: false,
            original_text: String::new(),
        }
    }
}

impl SanMove {
    #[must_use]
    pub fn is_castle(&self) -> bool {
        self.king_side_castle || self.queen_side_castle
    }
}

/// How a game ended, per the PGN termination marker grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationMarker {
    WhiteWin,
    BlackWin,
    Draw,
    InProgress,
}

impl TerminationMarker {
    #[must_use]
    pub fn from_text(text: &str) -> Option<TerminationMarker> {
        match text {
            "1-0" => Some(TerminationMarker::WhiteWin),
            "0-1" => Some(TerminationMarker::BlackWin),
            "1/2-1/2" => Some(TerminationMarker::Draw),
            "*" => Some(TerminationMarker::InProgress),
            _ => None,
        }
    }
}

/// One lexical event, emitted in place of the visitor calls of a
/// callback-based lexer. `MoveParser` drives on this directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    TagPairOpen,
    TagPairName(String),
    TagPairValue(String),
    TagPairClose,
    MoveNumber(u32),
    ColourIndicator(Color),
    San(SanMove),
    SyntaxError,
    AlternativeOpen,
    AlternativeClose,
    Termination(TerminationMarker),
}
