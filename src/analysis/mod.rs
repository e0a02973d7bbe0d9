//! Analysis tools for learner game records
//!
//! Summaries, per-seat splits and cumulative series over the win/draw/loss
//! records produced by training and evaluation.

pub mod record;

pub use record::{
    CumulativePoint, GameRecord, Outcome, RecordSummary, SeatReport, cumulative_series,
    write_records_csv,
};
