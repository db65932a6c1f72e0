//! Peg Drop - a ball bouncing through a peg grid into labeled bins
//!
//! Core modules:
//! - `sim`: Deterministic simulation (body, segments, pegs, sections, tick)
//! - `renderer`: Drawing interface the simulation renders through
//! - `platform`: Clock, input mapping and viewport sizing
//! - `settings`: Simulation configuration
//! - `tally`: Landing counts across reruns

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tally;

pub use settings::Settings;
pub use tally::Tally;

/// Simulation configuration constants (defaults for `Settings`)
pub mod consts {
    /// Fixed tick interval in milliseconds
    pub const TICK_INTERVAL_MS: u32 = 16;
    /// Downward acceleration (pixels/s²)
    pub const GRAVITY: f32 = 6.0;
    /// Fraction of each velocity component removed per tick
    pub const DAMPING: f32 = 0.004;

    /// Canvas dimensions
    pub const CANVAS_WIDTH: f32 = 400.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    /// Velocity added per directional impulse (pixels/tick)
    pub const IMPULSE_DELTA: f32 = 5.0;

    /// Peg grid defaults
    pub const PEG_RADIUS: f32 = 4.0;
    pub const GRID_ROWS: usize = 8;
    pub const GRID_COLUMNS: usize = 7;
    /// Real-time window after a peg hit during which pegs are ignored
    pub const PEG_COOLDOWN_MS: u64 = 50;

    /// Height of the vertical dividers between sections
    pub const DIVIDER_HEIGHT: f32 = 60.0;
}

/// Errors raised while building a simulation
#[derive(thiserror::Error, Debug)]
pub enum SimError {
    #[error("At least one section label is required")]
    NoSections,
    #[error("Segment from ({0}, {1}) to ({2}, {3}) has zero length")]
    DegenerateSegment(f32, f32, f32, f32),
    #[error("Radius must be positive, got {0}")]
    InvalidRadius(f32),
    #[error("Peg grid needs at least one row and two columns")]
    InvalidGrid,
    #[error("Failed to read the settings file")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse settings")]
    Config(#[from] serde_json::Error),
}
