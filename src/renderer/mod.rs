//! Rendering interface
//!
//! The simulation draws through `Renderer` with fully computed geometry and
//! never depends on a graphics API. Position is read from the state; nothing
//! drawn is ever fed back.

use glam::Vec2;

use crate::sim::SimState;

/// A 2D drawing surface
pub trait Renderer {
    fn clear(&mut self);
    fn draw_circle(&mut self, center: Vec2, radius: f32);
    fn draw_polyline(&mut self, points: &[Vec2]);
    fn draw_text(&mut self, text: &str, pos: Vec2);
}

/// Clear and redraw the whole scene at the current state
pub fn draw_scene<R: Renderer + ?Sized>(state: &SimState, renderer: &mut R) {
    renderer.clear();

    for segment in state.ground.iter() {
        renderer.draw_polyline(&segment.polyline());
    }
    state.sections.refresh(renderer);
    for peg in state.pegs.pegs() {
        renderer.draw_circle(peg.pos, peg.radius);
    }

    renderer.draw_circle(state.body.pos, state.body.radius());
}

/// Renderer that writes each frame to the log at trace level
#[derive(Debug, Default)]
pub struct LogRenderer {
    pub frames: u64,
    shapes: usize,
}

impl Renderer for LogRenderer {
    fn clear(&mut self) {
        if self.frames > 0 {
            log::trace!("Frame {} drew {} shapes", self.frames, self.shapes);
        }
        self.frames += 1;
        self.shapes = 0;
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32) {
        self.shapes += 1;
        log::trace!("circle ({:.1}, {:.1}) r={}", center.x, center.y, radius);
    }

    fn draw_polyline(&mut self, points: &[Vec2]) {
        self.shapes += 1;
        log::trace!("polyline {:?}", points);
    }

    fn draw_text(&mut self, text: &str, pos: Vec2) {
        self.shapes += 1;
        log::trace!("text {:?} at ({:.1}, {:.1})", text, pos.x, pos.y);
    }
}
