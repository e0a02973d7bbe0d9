//! Train command - Train a value learner against a scripted opponent

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::{
    analysis::{RecordSummary, SeatReport, write_records_csv},
    app::LearnerConfig,
    cli::output::{format_number, format_rate, print_kv, print_section, print_subsection},
    opponents::{ScriptedOpponent, Strategy},
    pipeline::{
        JsonlObserver, ProgressObserver, TrainingConfig, TrainingPipeline, TrainingReport,
    },
    tictactoe::{Player, SymmetryGroup},
    value_learning::{UpdateRule, ValueLearner},
};

#[derive(Debug, Serialize)]
struct TrainingSummaryFile<'a> {
    #[serde(flatten)]
    report: &'a TrainingReport,
    learner: &'a LearnerConfig,
    opponent_strategy: Strategy,
    opponent_seed: Option<u64>,
}

fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Treat trailing separators or missing filename as a directory target.
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("training_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    Ok(())
}

#[derive(Parser, Debug)]
#[command(about = "Train a value learner", allow_negative_numbers = true)]
pub struct TrainArgs {
    /// Number of training games
    #[arg(long, short = 'g', default_value_t = 10_000)]
    pub games: usize,

    /// Number of greedy evaluation games after training
    #[arg(long, default_value_t = 1_000)]
    pub eval_games: usize,

    /// Probability of an exploratory move during training
    #[arg(long, short = 'e', default_value_t = crate::app::DEFAULT_EPSILON)]
    pub epsilon: f64,

    /// Opponent to train against
    #[arg(long, short = 'o', value_enum, default_value_t = Strategy::Random)]
    pub opponent: Strategy,

    /// Symbol the learner plays
    #[arg(long, value_enum, default_value_t = Player::X)]
    pub player: Player,

    /// Starting estimate for unseen non-terminal states
    #[arg(long, default_value_t = crate::types::DEFAULT_INITIAL_VALUE)]
    pub initial_value: f64,

    /// How the value table learns from games
    #[arg(long, value_enum, default_value_t = UpdateRule::TemporalDifference)]
    pub update_rule: UpdateRule,

    /// Board symmetries merged into one table entry
    #[arg(long, value_enum, default_value_t = SymmetryGroup::Dihedral)]
    pub symmetry: SymmetryGroup,

    /// Random seed for reproducibility (the opponent uses seed + 1)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write a JSON summary to this path
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Write the training game log as CSV
    #[arg(long)]
    pub records: Option<PathBuf>,

    /// Optional file for JSONL observations
    #[arg(long)]
    pub observations: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
}

impl TrainArgs {
    fn learner_config(&self) -> LearnerConfig {
        let mut config = LearnerConfig::new()
            .with_epsilon(self.epsilon)
            .with_player(self.player)
            .with_initial_value(self.initial_value)
            .with_update_rule(self.update_rule)
            .with_symmetry(self.symmetry);
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }

    /// Unseeded here; the learner reseeds it when `--seed` is given
    fn opponent(&self) -> ScriptedOpponent {
        ScriptedOpponent::new(self.opponent, self.player.opponent())
    }
}

fn print_summary(title: &str, summary: &RecordSummary, by_seat: &SeatReport) {
    print_subsection(title);
    print_kv("Games", &format_number(summary.total_games));
    print_kv(
        "Wins",
        &format!("{} ({})", summary.wins, format_rate(summary.win_rate)),
    );
    print_kv(
        "Draws",
        &format!("{} ({})", summary.draws, format_rate(summary.draw_rate)),
    );
    print_kv(
        "Losses",
        &format!("{} ({})", summary.losses, format_rate(summary.loss_rate)),
    );
    print_kv(
        "Win % moving first",
        &format!("{:.1}", by_seat.first.win_percentage()),
    );
    print_kv(
        "Win % moving second",
        &format!("{:.1}", by_seat.second.win_percentage()),
    );
}

/// Execute the train command
pub fn execute(args: TrainArgs) -> Result<()> {
    let config = args.learner_config();
    let summary_target = args.summary.as_ref().map(|raw| {
        let sanitized = sanitize_summary_path(raw);
        let normalized = sanitized != *raw;
        (sanitized, normalized)
    });

    let mut learner = ValueLearner::new(config.clone(), Box::new(args.opponent()))?;

    print_section("Training Value Learner");
    print_kv("Opponent", learner.opponent_name());
    print_kv("Player", &args.player.to_string());
    print_kv("Epsilon", &args.epsilon.to_string());
    print_kv("Update rule", &format!("{:?}", args.update_rule));
    print_kv("Symmetry", &format!("{:?}", args.symmetry));
    print_kv("Games", &format_number(args.games));

    let mut pipeline = TrainingPipeline::new(TrainingConfig::new(args.games, args.eval_games));
    if !args.no_progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.observations {
        ensure_parent(path)?;
        pipeline = pipeline.with_observer(Box::new(JsonlObserver::new(path)?));
    }

    let report = pipeline.run(&mut learner)?;

    print_section("Results");
    print_summary("Training", &report.training, &report.training_by_seat);
    if report.evaluation.total_games > 0 {
        print_summary(
            "Evaluation (greedy)",
            &report.evaluation,
            &report.evaluation_by_seat,
        );
    }
    print_kv("States learned", &format_number(report.table_size));

    if let Some(path) = &args.records {
        ensure_parent(path)?;
        write_records_csv(path, &report.training_records)?;
        println!("\nGame log written to {}", path.display());
    }

    if let Some((summary_path, normalized)) = summary_target {
        if normalized {
            println!(
                "\nNormalizing summary path to {}",
                summary_path.display()
            );
        }
        ensure_parent(&summary_path)?;

        let summary = TrainingSummaryFile {
            report: &report,
            learner: &config,
            opponent_strategy: args.opponent,
            opponent_seed: config.opponent_seed(),
        };
        let file = std::fs::File::create(&summary_path)
            .with_context(|| format!("creating summary {}", summary_path.display()))?;
        serde_json::to_writer_pretty(file, &summary)?;
        println!("Summary written to {}", summary_path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::Opponent;

    #[test]
    fn test_sanitize_summary_path() {
        assert_eq!(
            sanitize_summary_path(Path::new("out/run")),
            PathBuf::from("out/run.json")
        );
        assert_eq!(
            sanitize_summary_path(Path::new("out/run.JSON")),
            PathBuf::from("out/run.JSON")
        );
        let dir = format!("out{}", std::path::MAIN_SEPARATOR);
        assert_eq!(
            sanitize_summary_path(Path::new(&dir)),
            Path::new("out").join("training_summary.json")
        );
    }

    #[test]
    fn test_opponent_seed_offsets_learner_seed() {
        let args = TrainArgs::parse_from(["train", "--seed", "7", "--player", "o"]);
        let config = args.learner_config();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.opponent_seed(), Some(8));
        assert_eq!(args.opponent().symbol(), Player::X);
    }
}
