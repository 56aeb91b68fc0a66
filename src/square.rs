//! The packed per-square unit: piece kind, color, and a has-moved flag.

use std::fmt;

/// Which side a piece belongs to, or whose turn it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[must_use]
    pub fn flip(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

/// The kind of piece (or lack of one) occupying a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SquareKind {
    Empty,
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl SquareKind {
    /// The four pieces a pawn may promote to, in the order moves are
    /// generated for them (rook, knight, bishop, queen).
    pub const PROMOTION_CHOICES: [SquareKind; 4] =
        [SquareKind::Rook, SquareKind::Knight, SquareKind::Bishop, SquareKind::Queen];

    #[must_use]
    pub fn to_char(self) -> char {
        match self {
            SquareKind::Empty => ' ',
            SquareKind::Pawn => 'P',
            SquareKind::Rook => 'R',
            SquareKind::Knight => 'N',
            SquareKind::Bishop => 'B',
            SquareKind::Queen => 'Q',
            SquareKind::King => 'K',
        }
    }

    #[must_use]
    pub fn from_char(c: char) -> Option<SquareKind> {
        match c {
            'P' => Some(SquareKind::Pawn),
            'R' => Some(SquareKind::Rook),
            'N' => Some(SquareKind::Knight),
            'B' => Some(SquareKind::Bishop),
            'Q' => Some(SquareKind::Queen),
            'K' => Some(SquareKind::King),
            _ => None,
        }
    }
}

const KIND_MASK: u8 = 0b0000_1111;
const COLOR_MASK: u8 = 0b1000_0000;
const MOVED_MASK: u8 = 0b0100_0000;

fn kind_bits(kind: SquareKind) -> u8 {
    match kind {
        SquareKind::Empty => 0,
        SquareKind::Pawn => 1,
        SquareKind::Rook => 2,
        SquareKind::Knight => 3,
        SquareKind::Bishop => 4,
        SquareKind::Queen => 5,
        SquareKind::King => 6,
    }
}

fn bits_kind(bits: u8) -> SquareKind {
    match bits {
        0 => SquareKind::Empty,
        1 => SquareKind::Pawn,
        2 => SquareKind::Rook,
        3 => SquareKind::Knight,
        4 => SquareKind::Bishop,
        5 => SquareKind::Queen,
        6 => SquareKind::King,
        _ => unreachable!("square kind nibble out of range"),
    }
}

/// A single board cell, packed into one byte: 4 bits kind, 1 bit color,
/// 1 bit has-moved. Equality ignores `has_moved`.
#[derive(Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Square(u8);

impl Square {
    #[must_use]
    pub const fn empty() -> Square {
        Square(0)
    }

    #[must_use]
    pub fn new(kind: SquareKind, color: Color) -> Square {
        Square::with_moved(kind, color, false)
    }

    #[must_use]
    pub fn with_moved(kind: SquareKind, color: Color, moved: bool) -> Square {
        let mut bits = kind_bits(kind);
        if matches!(color, Color::White) {
            bits |= COLOR_MASK;
        }
        if moved {
            bits |= MOVED_MASK;
        }
        Square(bits)
    }

    #[must_use]
    pub fn kind(self) -> SquareKind {
        bits_kind(self.0 & KIND_MASK)
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.kind() == SquareKind::Empty
    }

    /// Color of the occupying piece. Undefined (returns `Color::White`) when
    /// the square is empty — callers must check `is_empty` first.
    #[must_use]
    pub fn color(self) -> Color {
        if self.0 & COLOR_MASK != 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    #[must_use]
    pub fn has_moved(self) -> bool {
        self.0 & MOVED_MASK != 0
    }

    #[must_use]
    pub fn with_kind(self, kind: SquareKind) -> Square {
        Square::with_moved(kind, self.color(), self.has_moved())
    }

    #[must_use]
    pub fn moved(self) -> Square {
        Square(self.0 | MOVED_MASK)
    }
}

impl PartialEq for Square {
    fn eq(&self, other: &Self) -> bool {
        (self.0 & !MOVED_MASK) == (other.0 & !MOVED_MASK)
    }
}
impl Eq for Square {}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "Square(empty)");
        }
        let c = self.kind().to_char();
        let c = if matches!(self.color(), Color::White) { c } else { c.to_ascii_lowercase() };
        write!(f, "Square({c}{})", if self.has_moved() { "*" } else { "" })
    }
}
