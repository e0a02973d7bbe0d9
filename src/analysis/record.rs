//! Win/draw/loss records and the summaries built from them

use std::{fmt, path::Path};

use serde::{Deserialize, Serialize};

use crate::Result;

/// Result of one game from the learner's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "w")]
    Win,
    #[serde(rename = "d")]
    Draw,
    #[serde(rename = "l")]
    Loss,
}

impl Outcome {
    pub fn as_char(self) -> char {
        match self {
            Outcome::Win => 'w',
            Outcome::Draw => 'd',
            Outcome::Loss => 'l',
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// One finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub outcome: Outcome,
    /// Whether the learner made the opening move
    pub played_first: bool,
}

impl GameRecord {
    pub fn new(outcome: Outcome, played_first: bool) -> Self {
        Self {
            outcome,
            played_first,
        }
    }
}

/// Totals and rates over a set of games
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSummary {
    pub total_games: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub draw_rate: f64,
    pub loss_rate: f64,
}

impl RecordSummary {
    /// Rates are zero when no games were played
    pub fn new(total_games: usize, wins: usize, draws: usize, losses: usize) -> Self {
        let rate = |count: usize| {
            if total_games > 0 {
                count as f64 / total_games as f64
            } else {
                0.0
            }
        };

        Self {
            total_games,
            wins,
            draws,
            losses,
            win_rate: rate(wins),
            draw_rate: rate(draws),
            loss_rate: rate(losses),
        }
    }

    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a GameRecord>) -> Self {
        let (mut wins, mut draws, mut losses) = (0, 0, 0);
        for record in records {
            match record.outcome {
                Outcome::Win => wins += 1,
                Outcome::Draw => draws += 1,
                Outcome::Loss => losses += 1,
            }
        }
        Self::new(wins + draws + losses, wins, draws, losses)
    }

    pub fn win_percentage(&self) -> f64 {
        self.win_rate * 100.0
    }
}

/// Summaries split by whether the learner opened the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatReport {
    pub first: RecordSummary,
    pub second: RecordSummary,
}

impl SeatReport {
    pub fn split(records: &[GameRecord]) -> Self {
        Self {
            first: RecordSummary::from_records(records.iter().filter(|r| r.played_first)),
            second: RecordSummary::from_records(records.iter().filter(|r| !r.played_first)),
        }
    }
}

/// Running win/draw/loss counts after a given game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CumulativePoint {
    /// 1-based index among the games included in the series
    pub game: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
}

/// Cumulative counts over the games whose seat matches `played_first`, one
/// point per included game.
pub fn cumulative_series(records: &[GameRecord], played_first: bool) -> Vec<CumulativePoint> {
    let mut point = CumulativePoint {
        game: 0,
        wins: 0,
        draws: 0,
        losses: 0,
    };

    records
        .iter()
        .filter(|r| r.played_first == played_first)
        .map(|r| {
            point.game += 1;
            match r.outcome {
                Outcome::Win => point.wins += 1,
                Outcome::Draw => point.draws += 1,
                Outcome::Loss => point.losses += 1,
            }
            point
        })
        .collect()
}

#[derive(Serialize)]
struct CsvRow {
    game: usize,
    outcome: Outcome,
    played_first: bool,
}

/// Write one CSV row per game: `game,outcome,played_first`
pub fn write_records_csv<P: AsRef<Path>>(path: P, records: &[GameRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for (game, record) in records.iter().enumerate() {
        writer.serialize(CsvRow {
            game,
            outcome: record.outcome,
            played_first: record.played_first,
        })?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<GameRecord> {
        vec![
            GameRecord::new(Outcome::Win, true),
            GameRecord::new(Outcome::Loss, false),
            GameRecord::new(Outcome::Draw, true),
            GameRecord::new(Outcome::Win, false),
            GameRecord::new(Outcome::Win, true),
        ]
    }

    #[test]
    fn test_outcome_chars() {
        assert_eq!(Outcome::Win.as_char(), 'w');
        assert_eq!(Outcome::Draw.to_string(), "d");
        assert_eq!(serde_json::to_string(&Outcome::Loss).unwrap(), "\"l\"");
    }

    #[test]
    fn test_summary_rates() {
        let summary = RecordSummary::from_records(&records());
        assert_eq!(summary.total_games, 5);
        assert_eq!((summary.wins, summary.draws, summary.losses), (3, 1, 1));
        assert!((summary.win_rate - 0.6).abs() < 1e-12);
        assert!((summary.win_percentage() - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_summary_has_zero_rates() {
        let summary = RecordSummary::from_records(std::iter::empty());
        assert_eq!(summary.total_games, 0);
        assert_eq!(summary.win_rate, 0.0);
        assert_eq!(summary.loss_rate, 0.0);
    }

    #[test]
    fn test_seat_split() {
        let report = SeatReport::split(&records());
        assert_eq!(report.first.total_games, 3);
        assert_eq!(report.first.wins, 2);
        assert_eq!(report.second.total_games, 2);
        assert_eq!(report.second.losses, 1);
    }

    #[test]
    fn test_cumulative_series() {
        let series = cumulative_series(&records(), true);
        assert_eq!(series.len(), 3);
        assert_eq!(
            series[2],
            CumulativePoint {
                game: 3,
                wins: 2,
                draws: 1,
                losses: 0
            }
        );
        assert_eq!(series[0].wins, 1);
    }
}
