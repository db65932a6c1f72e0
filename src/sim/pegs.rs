//! Peg grid: fixed circular obstacles in a staggered lattice

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::collision::{CollisionResult, peg_collision};
use crate::SimError;

/// A fixed circular obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Peg {
    pub pos: Vec2,
    pub radius: f32,
}

impl Peg {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self { pos, radius }
    }
}

/// Pegs sharing one y
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PegRow {
    pub y: f32,
    pub pegs: Vec<Peg>,
}

impl PegRow {
    /// `count` pegs spaced `spacing` apart, the first at `first_x`
    pub fn new(y: f32, first_x: f32, spacing: f32, count: usize, radius: f32) -> Self {
        let pegs = (0..count)
            .map(|i| Peg::new(Vec2::new(first_x + spacing * i as f32, y), radius))
            .collect();
        Self { y, pegs }
    }
}

/// Shape of the grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    pub rows: usize,
    /// Pegs in even rows; odd rows hold one fewer
    pub columns: usize,
    pub peg_radius: f32,
    /// Y of the first row
    pub top: f32,
    /// Y of the last row
    pub bottom: f32,
}

/// Suppresses peg collisions for a real-time window after a hit
///
/// Times are offsets on a monotonic clock. The window is wall-clock time, so
/// the number of ticks it covers depends on how fast ticks actually run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cooldown {
    window: Duration,
    until: Option<Duration>,
}

impl Cooldown {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            until: None,
        }
    }

    #[inline]
    pub fn is_active(&self, now: Duration) -> bool {
        self.until.is_some_and(|until| now < until)
    }

    pub fn arm(&mut self, now: Duration) {
        self.until = Some(now + self.window);
    }

    pub fn clear(&mut self) {
        self.until = None;
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

/// Which peg was hit and how
#[derive(Debug, Clone)]
pub struct PegHit {
    pub row: usize,
    pub column: usize,
    pub result: CollisionResult,
}

/// Rows of pegs with one shared collision cooldown
#[derive(Debug, Clone)]
pub struct PegGrid {
    rows: Vec<PegRow>,
    cooldown: Cooldown,
}

impl PegGrid {
    /// Lay out a staggered grid across `width`
    ///
    /// Even rows put `columns` pegs at the centers of equal cells; odd rows
    /// put `columns - 1` pegs on the cell borders between them.
    pub fn new(layout: &GridLayout, width: f32, cooldown: Duration) -> Result<Self, SimError> {
        if layout.rows == 0 || layout.columns < 2 {
            return Err(SimError::InvalidGrid);
        }
        if layout.peg_radius <= 0.0 || !layout.peg_radius.is_finite() {
            return Err(SimError::InvalidRadius(layout.peg_radius));
        }

        let spacing = width / layout.columns as f32;
        let row_gap = if layout.rows > 1 {
            (layout.bottom - layout.top) / (layout.rows - 1) as f32
        } else {
            0.0
        };

        let rows = (0..layout.rows)
            .map(|i| {
                let y = layout.top + row_gap * i as f32;
                if i % 2 == 0 {
                    PegRow::new(y, spacing * 0.5, spacing, layout.columns, layout.peg_radius)
                } else {
                    PegRow::new(y, spacing, spacing, layout.columns - 1, layout.peg_radius)
                }
            })
            .collect();

        Ok(Self {
            rows,
            cooldown: Cooldown::new(cooldown),
        })
    }

    /// Build a grid from explicit rows
    pub fn from_rows(rows: Vec<PegRow>, cooldown: Duration) -> Self {
        Self {
            rows,
            cooldown: Cooldown::new(cooldown),
        }
    }

    pub fn rows(&self) -> &[PegRow] {
        &self.rows
    }

    pub fn pegs(&self) -> impl Iterator<Item = &Peg> {
        self.rows.iter().flat_map(|row| row.pegs.iter())
    }

    pub fn cooldown(&self) -> &Cooldown {
        &self.cooldown
    }

    pub fn reset_cooldown(&mut self) {
        self.cooldown.clear();
    }

    /// Check the body against every peg, row by row
    ///
    /// The first overlap found is resolved and arms the cooldown; while the
    /// cooldown runs no peg is checked at all.
    pub fn check_collision(&mut self, body: &mut Body, now: Duration) -> Option<PegHit> {
        if self.cooldown.is_active(now) {
            return None;
        }

        for (row_idx, row) in self.rows.iter().enumerate() {
            for (column, peg) in row.pegs.iter().enumerate() {
                let result = peg_collision(body, peg);
                if result.hit {
                    self.cooldown.arm(now);
                    log::debug!(
                        "Peg hit at row {}, column {} (penetration {:.2})",
                        row_idx,
                        column,
                        result.penetration
                    );
                    return Some(PegHit {
                        row: row_idx,
                        column,
                        result,
                    });
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> GridLayout {
        GridLayout {
            rows: 4,
            columns: 5,
            peg_radius: 4.0,
            top: 100.0,
            bottom: 400.0,
        }
    }

    #[test]
    fn test_staggered_layout() {
        let grid = PegGrid::new(&layout(), 400.0, Duration::from_millis(50)).unwrap();
        let counts: Vec<usize> = grid.rows().iter().map(|r| r.pegs.len()).collect();
        assert_eq!(counts, vec![5, 4, 5, 4]);

        let ys: Vec<f32> = grid.rows().iter().map(|r| r.y).collect();
        assert_eq!(ys, vec![100.0, 200.0, 300.0, 400.0]);

        // Odd rows sit halfway between the pegs of even rows
        assert_eq!(grid.rows()[0].pegs[0].pos.x, 40.0);
        assert_eq!(grid.rows()[1].pegs[0].pos.x, 80.0);
        assert_eq!(grid.rows()[0].pegs[1].pos.x, 120.0);
        assert_eq!(grid.pegs().count(), 18);
    }

    #[test]
    fn test_invalid_layouts() {
        let mut bad = layout();
        bad.rows = 0;
        assert!(PegGrid::new(&bad, 400.0, Duration::ZERO).is_err());

        let mut bad = layout();
        bad.columns = 1;
        assert!(PegGrid::new(&bad, 400.0, Duration::ZERO).is_err());

        let mut bad = layout();
        bad.peg_radius = 0.0;
        assert!(PegGrid::new(&bad, 400.0, Duration::ZERO).is_err());
    }

    #[test]
    fn test_cooldown_window() {
        let mut cooldown = Cooldown::new(Duration::from_millis(50));
        assert!(!cooldown.is_active(Duration::ZERO));

        cooldown.arm(Duration::from_millis(100));
        assert!(cooldown.is_active(Duration::from_millis(100)));
        assert!(cooldown.is_active(Duration::from_millis(149)));
        assert!(!cooldown.is_active(Duration::from_millis(150)));

        cooldown.arm(Duration::from_millis(200));
        cooldown.clear();
        assert!(!cooldown.is_active(Duration::from_millis(200)));
    }

    #[test]
    fn test_cooldown_allows_single_reversal() {
        // Two pegs both overlapping the body
        let rows = vec![
            PegRow {
                y: 100.0,
                pegs: vec![Peg::new(Vec2::new(100.0, 100.0), 5.0)],
            },
            PegRow {
                y: 100.0,
                pegs: vec![Peg::new(Vec2::new(116.0, 100.0), 5.0)],
            },
        ];
        let mut grid = PegGrid::from_rows(rows, Duration::from_millis(50));
        let mut body = Body::new(5.0).unwrap();
        body.set_position(108.0, 100.0);
        body.set_velocity(2.0, 0.0);

        let t0 = Duration::from_millis(1000);
        let hit = grid.check_collision(&mut body, t0).unwrap();
        assert_eq!((hit.row, hit.column), (0, 0));
        assert!((body.vel.x - (-2.0)).abs() < 1e-6);

        // Within the window the second peg is ignored
        body.set_position(112.0, 100.0);
        assert!(grid.check_collision(&mut body, t0 + Duration::from_millis(16)).is_none());
        assert!((body.vel.x - (-2.0)).abs() < 1e-6);
        assert!(grid.check_collision(&mut body, t0 + Duration::from_millis(49)).is_none());

        // Once it expires collisions resume
        assert!(grid.check_collision(&mut body, t0 + Duration::from_millis(50)).is_some());
    }
}
