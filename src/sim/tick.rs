//! Fixed timestep simulation tick
//!
//! Core loop that advances the simulation by one tick.

use std::time::Duration;

use glam::Vec2;

use super::collision::{Wall, wall_collision};
use super::state::{SimEvent, SimState};

/// A discrete command from the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    PushUp,
    PushDown,
    PushLeft,
    PushRight,
    ToggleGravity,
    ToggleDamping,
    Rerun,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Sum of directional impulses, in units of the impulse delta
    pub impulse: Vec2,
    pub toggle_gravity: bool,
    pub toggle_damping: bool,
    /// Re-shuffle sections and drop a new ball
    pub rerun: bool,
}

impl TickInput {
    /// Fold a command into this tick's input
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::PushUp => self.impulse.y -= 1.0,
            Command::PushDown => self.impulse.y += 1.0,
            Command::PushLeft => self.impulse.x -= 1.0,
            Command::PushRight => self.impulse.x += 1.0,
            Command::ToggleGravity => self.toggle_gravity = !self.toggle_gravity,
            Command::ToggleDamping => self.toggle_damping = !self.toggle_damping,
            Command::Rerun => self.rerun = true,
        }
    }
}

/// Shrink one velocity component by `coeff` of itself
///
/// A reduction that would carry the component through zero leaves it at zero.
#[inline]
pub fn damp_component(v: f32, coeff: f32) -> f32 {
    let damped = v - v * coeff;
    if damped * v <= 0.0 { 0.0 } else { damped }
}

/// Advance the simulation by one tick
///
/// `now` is the time on a monotonic clock; only the peg cooldown reads it.
/// Order within a tick is fixed: walls, gravity, damping, segments, pegs,
/// then position. When several obstacles are hit in one tick the last
/// resolution wins.
pub fn tick(state: &mut SimState, input: &TickInput, now: Duration) {
    state.events.clear();

    if input.rerun {
        state.rerun();
    }
    if input.toggle_gravity {
        state.settings.toggle_gravity();
    }
    if input.toggle_damping {
        state.settings.toggle_damping();
    }
    if input.impulse != Vec2::ZERO {
        state.body.vel += input.impulse * state.settings.impulse_delta;
    }

    state.time_ticks += 1;

    // Walls
    let width = state.width();
    let height = state.height();
    let walls = wall_collision(&mut state.body, width, height);
    for wall in walls.iter() {
        state.events.push(SimEvent::WallBounce(wall));
    }
    if walls.vertical == Some(Wall::Floor) && !state.landed {
        report_landing(state);
    }

    // Gravity
    state.body.vel.y += state.settings.effective_gravity() * state.settings.tick_seconds();

    // Air resistance
    let coeff = state.settings.effective_damping();
    state.body.vel.x = damp_component(state.body.vel.x, coeff);
    state.body.vel.y = damp_component(state.body.vel.y, coeff);

    // Ground pieces and section dividers
    for (index, _) in state.ground.check_collision(&mut state.body) {
        state.events.push(SimEvent::GroundHit { index });
    }
    for (index, _) in state.sections.check_collision(&mut state.body) {
        state.events.push(SimEvent::DividerHit { index });
    }

    // Pegs
    if let Some(hit) = state.pegs.check_collision(&mut state.body, now) {
        state.events.push(SimEvent::PegHit {
            row: hit.row,
            column: hit.column,
        });
    }

    // Integrate
    state.body.pos += state.body.vel;
}

fn report_landing(state: &mut SimState) {
    let Some((section, label)) = state.current_section() else {
        return;
    };
    let label = label.to_string();
    log::info!(
        "Landed in section {} ({}) after {} ticks",
        section,
        label,
        state.time_ticks
    );
    state.landed = true;
    state.events.push(SimEvent::Landed { section, label });
}
