//! Ports (trait boundaries) between the learning core and its collaborators.
//!
//! The core owns these traits; opponents and observers are supplied from
//! outside and plugged in through them.

pub mod observer;
pub mod opponent;

pub use observer::Observer;
pub use opponent::Opponent;
