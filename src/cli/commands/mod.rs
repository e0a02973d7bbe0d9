//! CLI command implementations

pub mod orbit;
pub mod train;
