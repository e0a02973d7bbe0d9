//! Application layer: validated configuration for building learners.

pub mod config;

pub use config::{DEFAULT_EPSILON, LearnerConfig};
