//! Newtype wrappers and shared constants

use std::fmt;

use serde::Serialize;

use crate::tictactoe::{
    Cell, Cells,
    board::{encode_cells, parse_cells},
};

/// Number of cells on the board.
pub const BOARD_SIZE: usize = 9;

/// Default estimate for states that are neither won nor lost nor drawn.
pub const DEFAULT_INITIAL_VALUE: f64 = 0.5;

/// String key of a board position, as stored in the value table.
///
/// Keys produced by [`crate::tictactoe::canonical_key`] are the smallest
/// encoding in their symmetry orbit, so symmetric positions share one key.
///
/// # Examples
///
/// ```
/// use tictac::{tictactoe::{SymmetryGroup, canonical_key, parse_cells}, types::StateKey};
///
/// let corner = parse_cells("X........").unwrap();
/// let other_corner = parse_cells("........X").unwrap();
///
/// let key = canonical_key(&corner, SymmetryGroup::Dihedral);
/// assert_eq!(key, canonical_key(&other_corner, SymmetryGroup::Dihedral));
/// assert_eq!(key, StateKey::parse("........X").unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StateKey(String);

impl StateKey {
    /// Parse a 9-cell board string into a key, normalizing empty-cell characters.
    ///
    /// The result is not canonicalized.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid board.
    pub fn parse(s: &str) -> Result<Self, crate::Error> {
        parse_cells(s).map(|cells| Self::from_cells(&cells))
    }

    pub(crate) fn from_cells(cells: &Cells) -> Self {
        StateKey(encode_cells(cells))
    }

    /// Decode the key back into cells
    pub fn cells(&self) -> Cells {
        let mut cells = [Cell::Empty; BOARD_SIZE];
        for (slot, c) in cells.iter_mut().zip(self.0.chars()) {
            *slot = Cell::from_char(c).unwrap_or(Cell::Empty);
        }
        cells
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for StateKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
