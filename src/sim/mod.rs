//! Deterministic simulation module
//!
//! All physics lives here. This module must stay deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (segments and pegs in insertion order)
//! - No platform dependencies; drawing goes through the `Renderer` trait

pub mod body;
pub mod collision;
pub mod geometry;
pub mod pegs;
pub mod sections;
pub mod segment;
pub mod state;
pub mod tick;

pub use body::Body;
pub use collision::{CollisionResult, Wall, WallHits, peg_collision, segment_collision, wall_collision};
pub use pegs::{Cooldown, GridLayout, Peg, PegGrid, PegHit, PegRow};
pub use sections::Sections;
pub use segment::{Boundaries, Segment};
pub use state::{SimEvent, SimState};
pub use tick::{Command, TickInput, damp_component, tick};
