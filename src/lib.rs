//! Self-play value learning for Tic-Tac-Toe
//!
//! This crate provides:
//! - A Tic-Tac-Toe engine with move validation and symmetry canonicalization
//! - A value table of win-probability estimates keyed by canonical state
//! - An epsilon-greedy learner trained against scripted opponents
//! - Win/draw/loss reporting and a train-then-evaluate pipeline

pub mod analysis;
pub mod app;
pub mod cli;
pub mod error;
pub mod opponents;
pub mod pipeline;
pub mod ports;
pub mod tictactoe;
pub mod types;
pub mod value_learning;

pub use error::{Error, Result};
pub use types::StateKey;
