//! Board squares as an integer index, with (file, rank) views and ray
//! enumeration. Rays are precomputed once via [`once_cell::sync::Lazy`] so
//! sliding-piece generation never branches per call.

use std::fmt;

use once_cell::sync::Lazy;

use crate::error::LocationError;

pub const BOARD_SIZE: usize = 64;
pub const SIDE_SIZE: i8 = 8;

/// A validated square index in `[0, 64)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location(u8);

impl Location {
    /// Construct from (file, rank), each in `[0, 8)`.
    pub fn new(file: i8, rank: i8) -> Result<Location, LocationError> {
        if !(0..SIDE_SIZE).contains(&file) || !(0..SIDE_SIZE).contains(&rank) {
            return Err(LocationError::OutOfBounds { file, rank });
        }
        Ok(Location((rank as u8) * SIDE_SIZE as u8 + file as u8))
    }

    /// Construct from an already-validated index (e.g. a loop counter).
    #[must_use]
    pub fn from_index(index: usize) -> Location {
        debug_assert!(index < BOARD_SIZE);
        Location(index as u8)
    }

    /// Parse 2-character algebraic notation, e.g. `"e4"` (case-insensitive
    /// file letter).
    pub fn from_algebraic(text: &str) -> Result<Location, LocationError> {
        let chars: Vec<char> = text.chars().collect();
        if chars.len() != 2 {
            return Err(LocationError::OutOfBounds { file: -1, rank: -1 });
        }
        let file = chars[0].to_ascii_uppercase() as i8 - 'A' as i8;
        let rank = chars[1] as i8 - '1' as i8;
        Location::new(file, rank)
    }

    #[must_use]
    pub fn file(self) -> i8 {
        (self.0 % SIDE_SIZE as u8) as i8
    }

    #[must_use]
    pub fn rank(self) -> i8 {
        (self.0 / SIDE_SIZE as u8) as i8
    }

    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Offset this location by `(dx, dy)`, or `None` if that falls off the
    /// board.
    #[must_use]
    pub fn add_delta(self, dx: i8, dy: i8) -> Option<Location> {
        Location::new(self.file() + dx, self.rank() + dy).ok()
    }

    /// The ray of up to 7 squares starting one step past `self` in direction
    /// `(dx, dy)`, stopping at the board edge. Does not stop at occupied
    /// squares — that is the caller's job (see `movegen::sliders`).
    #[must_use]
    pub fn direction(self, dx: i8, dy: i8) -> &'static [Location] {
        debug_assert!((dx, dy) != (0, 0));
        &RAYS[ray_index(self, dx, dy)]
    }

    /// All 64 locations in row-major order: rank 0 file 0 first.
    #[must_use]
    pub fn all_squares() -> &'static [Location] {
        &ALL_SQUARES
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.file() as u8) as char;
        let rank = self.rank() + 1;
        write!(f, "{file}{rank}")
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Location({self})")
    }
}

static ALL_SQUARES: Lazy<Vec<Location>> =
    Lazy::new(|| (0..BOARD_SIZE).map(Location::from_index).collect());

/// The 8 compass directions, indexed 0..8 for table lookup.
const DIRECTIONS: [(i8, i8); 8] =
    [(1, 0), (-1, 0), (0, 1), (0, -1), (1, 1), (1, -1), (-1, 1), (-1, -1)];

fn direction_slot(dx: i8, dy: i8) -> usize {
    DIRECTIONS
        .iter()
        .position(|&d| d == (dx, dy))
        .unwrap_or_else(|| panic!("direction ({dx}, {dy}) is not one of the 8 ray directions"))
}

fn ray_index(origin: Location, dx: i8, dy: i8) -> usize {
    origin.index() * DIRECTIONS.len() + direction_slot(dx, dy)
}

static RAYS: Lazy<Vec<Vec<Location>>> = Lazy::new(|| {
    let mut table = vec![Vec::new(); BOARD_SIZE * DIRECTIONS.len()];
    for &origin in ALL_SQUARES.iter() {
        for &(dx, dy) in &DIRECTIONS {
            let mut ray = Vec::new();
            let mut current = origin;
            while let Some(next) = current.add_delta(dx, dy) {
                ray.push(next);
                current = next;
            }
            table[ray_index(origin, dx, dy)] = ray;
        }
    }
    table
});
