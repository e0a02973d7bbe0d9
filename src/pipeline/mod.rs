//! Training and evaluation pipeline
//!
//! This module provides:
//! - A train-then-evaluate pipeline for one learner
//! - Observers recording progress, metrics and per-game logs

pub mod observers;
pub mod training;

pub use observers::{JsonlObserver, MetricsObserver, Observation, ProgressObserver};
pub use training::{TrainingConfig, TrainingPipeline, TrainingReport};

pub use crate::ports::Observer;
