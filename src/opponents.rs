//! Scripted opponents the learner trains against
//!
//! All three policies fall back to a uniformly random legal move:
//!
//! - `Random`: always random
//! - `Winner`: completes one of its own lines when it can
//! - `WinnerBlocker`: as `Winner`, otherwise blocks a line the learner could
//!   complete on its next move

use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    ports::Opponent,
    tictactoe::{Board, Player},
};

/// Move policy of a [`ScriptedOpponent`]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    #[default]
    Random,
    Winner,
    #[value(name = "blocker")]
    WinnerBlocker,
}

impl Strategy {
    pub fn label(self) -> &'static str {
        match self {
            Strategy::Random => "random",
            Strategy::Winner => "winner",
            Strategy::WinnerBlocker => "blocker",
        }
    }
}

/// Opponent following one of the fixed [`Strategy`] policies
#[derive(Debug, Clone)]
pub struct ScriptedOpponent {
    symbol: Player,
    strategy: Strategy,
    rng: StdRng,
    name: String,
}

impl ScriptedOpponent {
    /// Create an opponent seeded from the thread RNG
    pub fn new(strategy: Strategy, symbol: Player) -> Self {
        Self {
            symbol,
            strategy,
            rng: StdRng::from_rng(&mut rand::rng()),
            name: format!("{}-{}", strategy.label(), symbol),
        }
    }

    /// Create an opponent with a deterministic seed
    pub fn with_seed(strategy: Strategy, symbol: Player, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            ..Self::new(strategy, symbol)
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// First legal move that completes a line for `player`.
    ///
    /// Moves for the other side are probed unverified, since it is not their
    /// turn on `board`.
    fn completing_move(
        &self,
        board: &Board,
        moves: &[usize],
        player: Player,
    ) -> Result<Option<usize>> {
        let verify = player == self.symbol;
        for &mv in moves {
            let cells = board.preview_move(player, mv, verify)?;
            if Board::winner_of(&cells) == Some(player) {
                return Ok(Some(mv));
            }
        }
        Ok(None)
    }

    fn choose_move(&mut self, board: &Board) -> Result<usize> {
        let moves = board.legal_moves();
        if moves.is_empty() {
            return Err(Error::NoValidMoves);
        }

        let scripted = match self.strategy {
            Strategy::Random => None,
            Strategy::Winner => self.completing_move(board, &moves, self.symbol)?,
            Strategy::WinnerBlocker => match self.completing_move(board, &moves, self.symbol)? {
                Some(mv) => Some(mv),
                None => self.completing_move(board, &moves, self.symbol.opponent())?,
            },
        };

        match scripted {
            Some(mv) => Ok(mv),
            None => moves.choose(&mut self.rng).copied().ok_or(Error::NoValidMoves),
        }
    }
}

impl Opponent for ScriptedOpponent {
    fn symbol(&self) -> Player {
        self.symbol
    }

    fn make_move(&mut self, mut board: Board) -> Result<Board> {
        let mv = self.choose_move(&board)?;
        board.apply_move(self.symbol, mv)?;
        Ok(board)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}
