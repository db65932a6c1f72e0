//! Simulation settings
//!
//! Every tunable the stepper reads lives here and is passed in explicitly.
//! Settings load from JSON; missing fields take their defaults.

use std::path::Path;
use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::SimError;
use crate::consts::*;
use crate::sim::GridLayout;

/// An angled ground piece, endpoints given as fractions of the canvas size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RampSpec {
    pub start: Vec2,
    pub end: Vec2,
}

impl RampSpec {
    /// Endpoints in pixels for a canvas of the given size
    pub fn to_pixels(&self, width: f32, height: f32) -> (Vec2, Vec2) {
        let scale = Vec2::new(width, height);
        (self.start * scale, self.end * scale)
    }
}

/// Simulation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Forces ===
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
    /// Gravity toggle (off = no acceleration, value kept for restore)
    pub gravity_enabled: bool,
    /// Fraction of each velocity component removed per tick
    pub damping: f32,
    /// Damping toggle
    pub damping_enabled: bool,

    // === Timing ===
    /// Fixed tick interval (ms)
    pub tick_interval_ms: u32,
    /// Peg collision cooldown (ms of real time)
    pub peg_cooldown_ms: u64,

    // === Canvas ===
    pub canvas_width: f32,
    pub canvas_height: f32,

    // === Ball ===
    pub ball_radius: f32,
    /// Velocity added by one directional impulse (pixels/tick)
    pub impulse_delta: f32,

    // === Obstacles ===
    pub peg_radius: f32,
    pub grid_rows: usize,
    pub grid_columns: usize,
    pub divider_height: f32,
    pub ramps: Vec<RampSpec>,

    /// Run seed for reproducible shuffles and drop positions
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            gravity_enabled: true,
            damping: DAMPING,
            damping_enabled: true,

            tick_interval_ms: TICK_INTERVAL_MS,
            peg_cooldown_ms: PEG_COOLDOWN_MS,

            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,

            ball_radius: BALL_RADIUS,
            impulse_delta: IMPULSE_DELTA,

            peg_radius: PEG_RADIUS,
            grid_rows: GRID_ROWS,
            grid_columns: GRID_COLUMNS,
            divider_height: DIVIDER_HEIGHT,
            // Deflectors near the top that steer the ball off the side walls
            ramps: vec![
                RampSpec {
                    start: Vec2::new(0.0, 0.12),
                    end: Vec2::new(0.15, 0.16),
                },
                RampSpec {
                    start: Vec2::new(0.85, 0.16),
                    end: Vec2::new(1.0, 0.12),
                },
            ],

            seed: 0,
        }
    }
}

impl Settings {
    /// Gravity currently in effect (pixels/s²)
    pub fn effective_gravity(&self) -> f32 {
        if self.gravity_enabled { self.gravity } else { 0.0 }
    }

    /// Damping coefficient currently in effect
    pub fn effective_damping(&self) -> f32 {
        if self.damping_enabled { self.damping } else { 0.0 }
    }

    pub fn toggle_gravity(&mut self) {
        self.gravity_enabled = !self.gravity_enabled;
        log::info!("Gravity {}", if self.gravity_enabled { "on" } else { "off" });
    }

    pub fn toggle_damping(&mut self) {
        self.damping_enabled = !self.damping_enabled;
        log::info!("Damping {}", if self.damping_enabled { "on" } else { "off" });
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms as u64)
    }

    /// Tick length in seconds, for integrating per-second quantities
    pub fn tick_seconds(&self) -> f32 {
        self.tick_interval_ms as f32 / 1000.0
    }

    pub fn peg_cooldown(&self) -> Duration {
        Duration::from_millis(self.peg_cooldown_ms)
    }

    /// Peg grid spread over the middle of the canvas, clear of the dividers
    pub fn grid_layout(&self) -> GridLayout {
        GridLayout {
            rows: self.grid_rows,
            columns: self.grid_columns,
            peg_radius: self.peg_radius,
            top: self.canvas_height * 0.25,
            bottom: self.canvas_height - self.divider_height - 3.0 * self.ball_radius,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}
