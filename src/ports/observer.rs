//! Observer port - abstraction for training observation and data collection
//!
//! This port defines the interface for observing training events,
//! allowing composable data collection without coupling training
//! logic to specific output formats or metrics.

use crate::{Result, analysis::GameRecord};

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// 1. `on_training_start(total_games)` - Once at the beginning
/// 2. `on_game_end(game_num, record)` - After every training game
/// 3. `on_training_end()` - Once at the end
///
/// Evaluation games played after training are not observed.
///
/// # Examples
///
/// ```no_run
/// use tictac::{analysis::GameRecord, ports::Observer};
///
/// struct CountingObserver {
///     games: usize,
/// }
///
/// impl Observer for CountingObserver {
///     fn on_game_end(&mut self, _game_num: usize, _record: &GameRecord) -> tictac::Result<()> {
///         self.games += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called when training starts.
    ///
    /// # Default Implementation
    ///
    /// Does nothing. Override to initialize observation state.
    fn on_training_start(&mut self, _total_games: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each training game with its 0-based index.
    fn on_game_end(&mut self, _game_num: usize, _record: &GameRecord) -> Result<()> {
        Ok(())
    }

    /// Called when training ends.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Lets callers lend an observer to a pipeline and read it back afterwards
impl<O: Observer + ?Sized> Observer for &mut O {
    fn on_training_start(&mut self, total_games: usize) -> Result<()> {
        (**self).on_training_start(total_games)
    }

    fn on_game_end(&mut self, game_num: usize, record: &GameRecord) -> Result<()> {
        (**self).on_game_end(game_num, record)
    }

    fn on_training_end(&mut self) -> Result<()> {
        (**self).on_training_end()
    }
}
