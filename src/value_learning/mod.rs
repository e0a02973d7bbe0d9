//! Tabular value learning
//!
//! A [`ValueTable`] maps canonical board states to the learner's estimated
//! probability of winning. A [`ValueLearner`] plays epsilon-greedy games
//! against an opponent and updates the table with one of two rules:
//!
//! | Rule | When | Target |
//! |------|------|--------|
//! | Temporal difference | after each greedy move | estimate of the next afterstate |
//! | Monte Carlo | after the game | final reward (win 1, otherwise 0) |
//!
//! The rule is fixed per learner, so one table never mixes the two.
//!
//! ## Usage Example
//!
//! ```no_run
//! use tictac::{
//!     app::LearnerConfig,
//!     opponents::{ScriptedOpponent, Strategy},
//!     tictactoe::Player,
//!     value_learning::ValueLearner,
//! };
//!
//! let opponent = ScriptedOpponent::with_seed(Strategy::WinnerBlocker, Player::O, 2);
//! let mut learner = ValueLearner::new(LearnerConfig::new().with_seed(1), Box::new(opponent))?;
//! let training = learner.learn(10_000)?;
//! let evaluation = learner.evaluate(1_000)?;
//! # Ok::<(), tictac::Error>(())
//! ```

pub mod agent;
pub mod value_table;

pub use agent::{MoveChoice, UpdateRule, ValueLearner};
pub use value_table::{ValueEntry, ValueTable};
