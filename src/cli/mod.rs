//! CLI infrastructure for the tictac trainer
//!
//! This module provides the command-line interface for training value
//! learners and inspecting board symmetries.

pub mod commands;
pub mod output;
