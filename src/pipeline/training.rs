//! Training pipeline for value learners

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    Result,
    analysis::{GameRecord, RecordSummary, SeatReport},
    ports::Observer,
    value_learning::ValueLearner,
};

/// Training configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of learning games
    pub training_games: usize,

    /// Number of greedy games played afterwards to measure the policy
    pub evaluation_games: usize,
}

impl TrainingConfig {
    pub fn new(training_games: usize, evaluation_games: usize) -> Self {
        Self {
            training_games,
            evaluation_games,
        }
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self::new(10_000, 1_000)
    }
}

/// Result of a train-then-evaluate run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingReport {
    pub opponent: String,
    pub training: RecordSummary,
    pub training_by_seat: SeatReport,
    pub evaluation: RecordSummary,
    pub evaluation_by_seat: SeatReport,
    /// Distinct canonical states in the value table after the run
    pub table_size: usize,
    #[serde(skip)]
    pub training_records: Vec<GameRecord>,
    #[serde(skip)]
    pub evaluation_records: Vec<GameRecord>,
}

impl TrainingReport {
    /// Save the summary (without per-game records) to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

/// Training pipeline for a single learner against its opponent
pub struct TrainingPipeline<'a> {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer + 'a>>,
}

impl<'a> TrainingPipeline<'a> {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer + 'a>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Train `learner`, then evaluate it greedily.
    ///
    /// Observers see the training games only. The first error aborts the run.
    pub fn run(&mut self, learner: &mut ValueLearner) -> Result<TrainingReport> {
        if learner.config().epsilon >= 1.0 && self.config.evaluation_games > 0 {
            warn!("epsilon is 1.0: every training move is exploratory");
        }

        for observer in &mut self.observers {
            observer.on_training_start(self.config.training_games)?;
        }

        let mut training_records = Vec::with_capacity(self.config.training_games);
        for game_num in 0..self.config.training_games {
            let record = learner.play_training_game()?;
            for observer in &mut self.observers {
                observer.on_game_end(game_num, &record)?;
            }
            training_records.push(record);
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        let training = RecordSummary::from_records(&training_records);
        info!(
            games = training.total_games,
            win_rate = training.win_rate,
            draw_rate = training.draw_rate,
            loss_rate = training.loss_rate,
            table_size = learner.table().len(),
            "training finished"
        );

        let evaluation_records = learner.evaluate(self.config.evaluation_games)?;
        let evaluation = RecordSummary::from_records(&evaluation_records);
        if evaluation.total_games > 0 {
            info!(
                games = evaluation.total_games,
                win_rate = evaluation.win_rate,
                draw_rate = evaluation.draw_rate,
                loss_rate = evaluation.loss_rate,
                "evaluation finished"
            );
        }

        Ok(TrainingReport {
            opponent: learner.opponent_name().to_string(),
            training,
            training_by_seat: SeatReport::split(&training_records),
            evaluation,
            evaluation_by_seat: SeatReport::split(&evaluation_records),
            table_size: learner.table().len(),
            training_records,
            evaluation_records,
        })
    }
}
