//! Platform layer
//!
//! Handles what sits between the host and the simulation:
//! - Time (monotonic clock for the peg cooldown)
//! - Input events (keys to commands)
//! - Viewport sizing (letterboxed canvas fit)

pub mod input;
pub mod time;
pub mod viewport;

pub use input::command_for_key;
pub use time::MonotonicClock;
pub use viewport::{Fit, FitMode, object_fit};
