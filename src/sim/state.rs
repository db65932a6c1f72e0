//! Simulation state
//!
//! Everything a tick reads or writes lives here: the body, the obstacles and
//! the settings in force.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::collision::Wall;
use super::pegs::PegGrid;
use super::sections::Sections;
use super::segment::{Boundaries, Segment};
use crate::SimError;
use crate::settings::Settings;

/// Something that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    WallBounce(Wall),
    /// Hit an angled ground piece (index into `SimState::ground`)
    GroundHit { index: usize },
    /// Hit a section divider
    DividerHit { index: usize },
    PegHit { row: usize, column: usize },
    /// First floor contact of a run
    Landed { section: usize, label: String },
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimState {
    pub settings: Settings,
    pub body: Body,
    /// Angled ground pieces
    pub ground: Boundaries,
    pub sections: Sections,
    pub pegs: PegGrid,
    /// Events from the most recent tick
    pub events: Vec<SimEvent>,
    /// Ticks since the current run started
    pub time_ticks: u64,
    /// Completed runs (reruns so far)
    pub run: u32,
    /// Whether this run's landing has been reported
    pub landed: bool,
    rng: Pcg32,
}

impl SimState {
    /// Build the world and drop the ball at a random spot along the top
    pub fn new(settings: Settings, labels: Vec<String>) -> Result<Self, SimError> {
        let mut rng = Pcg32::seed_from_u64(settings.seed);
        let width = settings.canvas_width;
        let height = settings.canvas_height;

        let body = Body::new(settings.ball_radius)?;
        let sections = Sections::new(labels, width, height, settings.divider_height, &mut rng)?;
        let pegs = PegGrid::new(&settings.grid_layout(), width, settings.peg_cooldown())?;
        let ground = settings
            .ramps
            .iter()
            .map(|ramp| {
                let (start, end) = ramp.to_pixels(width, height);
                Segment::new(start, end)
            })
            .collect::<Result<Boundaries, _>>()?;

        log::info!(
            "Simulation ready: {}x{} canvas, {} sections, {} pegs, {} ramps, seed {}",
            width,
            height,
            sections.len(),
            pegs.pegs().count(),
            ground.len(),
            settings.seed
        );

        let mut state = Self {
            settings,
            body,
            ground,
            sections,
            pegs,
            events: Vec::new(),
            time_ticks: 0,
            run: 0,
            landed: false,
            rng,
        };
        state.drop_body();
        Ok(state)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.settings.canvas_width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.settings.canvas_height
    }

    /// Place the body at rest at a random x along the top
    fn drop_body(&mut self) {
        let r = self.body.radius();
        let max_x = (self.width() - r).max(r);
        let x = self.rng.random_range(r..=max_x);
        self.body.set_position(x, r);
        self.body.set_velocity(0.0, 0.0);
        log::info!("Ball dropped at x = {:.1}", x);
    }

    /// Start a new run: re-shuffle the sections and drop the ball again
    pub fn rerun(&mut self) {
        if let Err(e) = self.sections.rebuild(&mut self.rng) {
            log::warn!("Keeping previous sections: {}", e);
        }
        self.pegs.reset_cooldown();
        self.time_ticks = 0;
        self.landed = false;
        self.run += 1;
        self.drop_body();
        log::info!("Run {} started, sections: {:?}", self.run, self.sections.labels());
    }

    /// Label of the section under the body's center
    pub fn current_section(&self) -> Option<(usize, &str)> {
        let index = self.sections.section_at(self.body.pos.x)?;
        self.sections.label(index).map(|label| (index, label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn labels() -> Vec<String> {
        vec!["red".into(), "green".into(), "blue".into()]
    }

    #[test]
    fn test_new_drops_ball_at_top() {
        let state = SimState::new(Settings::default(), labels()).unwrap();
        let r = state.body.radius();
        assert_eq!(state.body.pos.y, r);
        assert!(state.body.pos.x >= r && state.body.pos.x <= state.width() - r);
        assert_eq!(state.body.vel, Vec2::ZERO);
        assert_eq!(state.sections.len(), 3);
        assert_eq!(state.ground.len(), 2);
    }

    #[test]
    fn test_new_rejects_empty_labels() {
        assert!(matches!(
            SimState::new(Settings::default(), Vec::new()),
            Err(SimError::NoSections)
        ));
    }

    #[test]
    fn test_new_rejects_bad_ramp() {
        let mut settings = Settings::default();
        settings.ramps[0].end = settings.ramps[0].start;
        assert!(matches!(
            SimState::new(settings, labels()),
            Err(SimError::DegenerateSegment(..))
        ));
    }

    #[test]
    fn test_same_seed_same_world() {
        let a = SimState::new(Settings::default(), labels()).unwrap();
        let b = SimState::new(Settings::default(), labels()).unwrap();
        assert_eq!(a.body.pos, b.body.pos);
        assert_eq!(a.sections.labels(), b.sections.labels());
    }

    #[test]
    fn test_rerun_resets_run_state() {
        let mut state = SimState::new(Settings::default(), labels()).unwrap();
        state.body.set_velocity(3.0, 4.0);
        state.body.set_position(200.0, 400.0);
        state.landed = true;
        state.time_ticks = 99;

        state.rerun();
        assert_eq!(state.run, 1);
        assert!(!state.landed);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.body.vel, Vec2::ZERO);
        assert_eq!(state.body.pos.y, state.body.radius());

        let mut sorted = state.sections.labels().to_vec();
        sorted.sort();
        assert_eq!(sorted, vec!["blue", "green", "red"]);
    }
}
