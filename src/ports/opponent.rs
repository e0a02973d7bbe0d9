//! Opponent port - the single outward call the learner makes during a game

use crate::{
    Result,
    tictactoe::{Board, Player},
};

/// A policy that answers the learner's moves.
///
/// Implementations receive a board on which their symbol is due to move and at
/// least one cell is free, and hand back that board with exactly one legal move
/// applied for their symbol. The learner checks this contract after every call
/// and fails the game if it is broken.
///
/// # Examples
///
/// ```
/// use tictac::{Result, ports::Opponent, tictactoe::{Board, Player}};
///
/// /// Always takes the lowest free cell
/// struct FirstFree;
///
/// impl Opponent for FirstFree {
///     fn symbol(&self) -> Player {
///         Player::O
///     }
///
///     fn make_move(&mut self, mut board: Board) -> Result<Board> {
///         let cell = board.legal_moves().first().copied().ok_or(tictac::Error::NoValidMoves)?;
///         board.apply_move(Player::O, cell)?;
///         Ok(board)
///     }
///
///     fn name(&self) -> &str {
///         "first-free"
///     }
/// }
///
/// let mut board = Board::new();
/// board.apply_move(Player::X, 0).unwrap();
/// let board = FirstFree.make_move(board).unwrap();
/// assert_eq!(board.move_count(), 2);
/// ```
pub trait Opponent: Send {
    /// Symbol this opponent plays
    fn symbol(&self) -> Player;

    /// Apply one move for [`Opponent::symbol`] and return the resulting board.
    ///
    /// # Errors
    ///
    /// Propagates illegal-move errors from the board, and returns
    /// `NoValidMoves` when called on a full board.
    fn make_move(&mut self, board: Board) -> Result<Board>;

    /// Name used in logs and reports
    fn name(&self) -> &str;

    /// Reseed the opponent's random source, if it has one. A seeded learner
    /// calls this once when it is built.
    ///
    /// # Default Implementation
    ///
    /// Does nothing; deterministic opponents have no random state.
    fn set_rng_seed(&mut self, _seed: u64) {}
}
