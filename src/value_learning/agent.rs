//! Epsilon-greedy value learner
//!
//! The learner plays whole games against an [`Opponent`], choosing its moves
//! by looking one ply ahead into the [`ValueTable`] and updating the table
//! from what it sees.

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::value_table::ValueTable;
use crate::{
    Error, Result,
    analysis::{GameRecord, Outcome},
    app::LearnerConfig,
    ports::Opponent,
    tictactoe::{Board, Cell, Cells, Player},
};

/// How the value table learns from a game
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum UpdateRule {
    /// After every greedy move, pull the estimate of the learner's previous
    /// afterstate toward the estimate of its new one. Exploratory moves do not
    /// update. A loss or draw caused by the opponent updates the last
    /// afterstate toward the terminal state.
    #[default]
    #[value(name = "td")]
    TemporalDifference,
    /// Record every afterstate of the game and, once the outcome is known,
    /// average the reward (win 1, draw or loss 0) into each of them.
    MonteCarlo,
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// A move chosen by the policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveChoice {
    pub position: usize,
    /// False for exploratory moves
    pub greedy: bool,
}

/// Value-table learner playing one fixed opponent
pub struct ValueLearner {
    table: ValueTable,
    opponent: Box<dyn Opponent>,
    config: LearnerConfig,
    rng: StdRng,
}

impl ValueLearner {
    /// Build a learner with an empty table.
    ///
    /// With a seeded config the opponent is reseeded from
    /// [`LearnerConfig::opponent_seed`], so one seed fixes the whole game.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if the config does not validate or the opponent
    /// plays the learner's own symbol.
    pub fn new(config: LearnerConfig, mut opponent: Box<dyn Opponent>) -> Result<Self> {
        config.validate()?;
        if opponent.symbol() == config.player {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "opponent '{}' plays {}, the learner's own symbol",
                    opponent.name(),
                    config.player
                ),
            });
        }

        if let Some(seed) = config.opponent_seed() {
            opponent.set_rng_seed(seed);
        }

        Ok(Self {
            table: ValueTable::new(config.player, config.initial_value, config.symmetry),
            rng: build_rng(config.seed),
            opponent,
            config,
        })
    }

    pub fn table(&self) -> &ValueTable {
        &self.table
    }

    pub fn config(&self) -> &LearnerConfig {
        &self.config
    }

    pub fn player(&self) -> Player {
        self.config.player
    }

    pub fn opponent_name(&self) -> &str {
        self.opponent.name()
    }

    /// Move with the highest lookahead estimate.
    ///
    /// Ties between exactly equal estimates are broken uniformly at random.
    ///
    /// # Errors
    ///
    /// `NoValidMoves` on a full board, or the board's illegal-move error if it
    /// is not the learner's turn.
    pub fn greedy_move(&mut self, board: &Board) -> Result<usize> {
        let moves = board.legal_moves();
        if moves.is_empty() {
            return Err(Error::NoValidMoves);
        }

        let mut best_value = f64::NEG_INFINITY;
        let mut best_moves = Vec::with_capacity(moves.len());
        for mv in moves {
            let afterstate = board.preview_move(self.config.player, mv, true)?;
            let value = self.table.estimate(&afterstate);
            if value > best_value {
                best_value = value;
                best_moves.clear();
                best_moves.push(mv);
            } else if value == best_value {
                best_moves.push(mv);
            }
        }

        best_moves
            .choose(&mut self.rng)
            .copied()
            .ok_or(Error::NoValidMoves)
    }

    /// Epsilon-greedy choice: a uniformly random legal move with probability
    /// `epsilon`, otherwise [`ValueLearner::greedy_move`].
    pub fn select_move(&mut self, board: &Board, epsilon: f64) -> Result<MoveChoice> {
        if epsilon > 0.0 && self.rng.random::<f64>() < epsilon {
            let position = board
                .legal_moves()
                .choose(&mut self.rng)
                .copied()
                .ok_or(Error::NoValidMoves)?;
            return Ok(MoveChoice {
                position,
                greedy: false,
            });
        }

        Ok(MoveChoice {
            position: self.greedy_move(board)?,
            greedy: true,
        })
    }

    /// Play one game with exploration and update the table from it
    pub fn play_training_game(&mut self) -> Result<GameRecord> {
        let epsilon = self.config.epsilon;
        match self.config.update_rule {
            UpdateRule::TemporalDifference => self.play_game(epsilon, true),
            UpdateRule::MonteCarlo => {
                let mut afterstates = Vec::new();
                let record = self.play_game_recording(epsilon, &mut afterstates)?;
                let reward = match record.outcome {
                    Outcome::Win => 1.0,
                    Outcome::Draw | Outcome::Loss => 0.0,
                };
                for state in &afterstates {
                    self.table.record_return(state, reward);
                }
                Ok(record)
            }
        }
    }

    /// Play one greedy game without updating any estimate
    pub fn play_evaluation_game(&mut self) -> Result<GameRecord> {
        self.play_game(0.0, false)
    }

    /// Train for `games` games, returning one record per game
    pub fn learn(&mut self, games: usize) -> Result<Vec<GameRecord>> {
        (0..games).map(|_| self.play_training_game()).collect()
    }

    /// Play `games` greedy games without learning
    pub fn evaluate(&mut self, games: usize) -> Result<Vec<GameRecord>> {
        (0..games).map(|_| self.play_evaluation_game()).collect()
    }

    /// Game loop with optional per-move afterstate updates.
    ///
    /// `previous` holds the position before the opponent's reply: the
    /// learner's last afterstate, or the empty board when the opponent opens.
    fn play_game(&mut self, epsilon: f64, update: bool) -> Result<GameRecord> {
        let mut board = Board::new();
        let played_first = self.rng.random_bool(0.5);

        if played_first {
            let choice = self.select_move(&board, epsilon)?;
            board.apply_move(self.config.player, choice.position)?;
        }

        while !board.is_terminal() {
            let previous = *board.cells();

            board = self.opponent_turn(board)?;
            if board.is_terminal() {
                if update {
                    self.table.update(&previous, board.cells());
                }
                break;
            }

            let choice = self.select_move(&board, epsilon)?;
            board.apply_move(self.config.player, choice.position)?;
            if update && choice.greedy {
                self.table.update(&previous, board.cells());
            }
        }

        self.finish(&board, played_first)
    }

    /// Game loop that records every learner afterstate, exploratory or not
    fn play_game_recording(
        &mut self,
        epsilon: f64,
        afterstates: &mut Vec<Cells>,
    ) -> Result<GameRecord> {
        let mut board = Board::new();
        let played_first = self.rng.random_bool(0.5);

        if !played_first {
            board = self.opponent_turn(board)?;
        }

        while !board.is_terminal() {
            let choice = self.select_move(&board, epsilon)?;
            board.apply_move(self.config.player, choice.position)?;
            afterstates.push(*board.cells());

            if board.is_terminal() {
                break;
            }
            board = self.opponent_turn(board)?;
        }

        self.finish(&board, played_first)
    }

    fn opponent_turn(&mut self, board: Board) -> Result<Board> {
        let after = self.opponent.make_move(board)?;
        check_opponent_move(&board, &after, &*self.opponent)?;
        Ok(after)
    }

    fn finish(&self, board: &Board, played_first: bool) -> Result<GameRecord> {
        let outcome = match board.winner() {
            Some(winner) if winner == self.config.player => Outcome::Win,
            Some(_) => Outcome::Loss,
            None if board.is_full() => Outcome::Draw,
            None => return Err(Error::GameOver),
        };

        debug!(
            outcome = %outcome,
            played_first,
            moves = board.move_count(),
            table_size = self.table.len(),
            "game finished"
        );
        Ok(GameRecord::new(outcome, played_first))
    }
}

/// Exactly one new piece, of the opponent's symbol, on a previously empty cell
fn check_opponent_move(before: &Board, after: &Board, opponent: &dyn Opponent) -> Result<()> {
    let symbol = opponent.symbol();
    let broken = |context: String| Error::OpponentContract {
        opponent: opponent.name().to_string(),
        context,
    };

    if after.move_count() != before.move_count() + 1 || after.last_mover() != Some(symbol) {
        return Err(broken(format!(
            "expected one move by {symbol}, board went from {} to {} moves",
            before.move_count(),
            after.move_count()
        )));
    }

    let changed: Vec<usize> = before
        .cells()
        .iter()
        .zip(after.cells())
        .enumerate()
        .filter(|(_, (old, new))| old != new)
        .map(|(pos, _)| pos)
        .collect();

    match changed.as_slice() {
        [pos] if before.cells()[*pos] == Cell::Empty && after.cells()[*pos] == symbol.to_cell() => {
            Ok(())
        }
        _ => Err(broken(format!("unexpected board change at cells {changed:?}"))),
    }
}
