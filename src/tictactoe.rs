//! Tic-Tac-Toe game engine

pub mod board;
pub mod lines;
pub mod symmetry;

pub use board::{Board, Cell, Cells, GamePhase, Player, encode_cells, parse_cells};
pub use lines::{LineAnalyzer, WINNING_LINES};
pub use symmetry::{Canonicalizer, D4Transform, SymmetryGroup, canonical_key, symmetry_orbit};
