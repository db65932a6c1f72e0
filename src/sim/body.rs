//! The moving ball

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::unit;
use crate::SimError;

/// The single moving body of the simulation
///
/// Position is the only record of where the ball is; rendering reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "BodyRecord", into = "BodyRecord")]
pub struct Body {
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    radius: f32,
}

/// Serialized form of a body; loading goes through `Body::new`
#[derive(Serialize, Deserialize)]
struct BodyRecord {
    pos: Vec2,
    vel: Vec2,
    radius: f32,
}

impl TryFrom<BodyRecord> for Body {
    type Error = SimError;

    fn try_from(record: BodyRecord) -> Result<Self, Self::Error> {
        let mut body = Body::new(record.radius)?;
        body.pos = record.pos;
        body.vel = record.vel;
        Ok(body)
    }
}

impl From<Body> for BodyRecord {
    fn from(body: Body) -> Self {
        Self {
            pos: body.pos,
            vel: body.vel,
            radius: body.radius,
        }
    }
}

impl Body {
    pub fn new(radius: f32) -> Result<Self, SimError> {
        if radius <= 0.0 || !radius.is_finite() {
            return Err(SimError::InvalidRadius(radius));
        }
        Ok(Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius,
        })
    }

    /// Radius is fixed for the body's lifetime
    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.pos = Vec2::new(x, y);
    }

    pub fn set_velocity(&mut self, dx: f32, dy: f32) {
        self.vel = Vec2::new(dx, dy);
    }

    /// Direction of travel, `None` when the body is at rest
    pub fn velocity_unit_vector(&self) -> Option<Vec2> {
        unit(self.vel)
    }

    /// Slope of the direction of travel
    ///
    /// Straight vertical motion has no finite slope; `unit.y` is returned
    /// instead so callers never see an infinity.
    pub fn velocity_slope(&self) -> Option<f32> {
        self.velocity_unit_vector().map(|u| {
            if u.x == 0.0 {
                u.y
            } else {
                u.y / u.x
            }
        })
    }

    /// Current speed (pixels per tick)
    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_radius() {
        assert!(Body::new(0.0).is_err());
        assert!(Body::new(-3.0).is_err());
        assert!(Body::new(f32::NAN).is_err());
        assert_eq!(Body::new(10.0).unwrap().radius(), 10.0);
    }

    #[test]
    fn test_deserialize_validates_radius() {
        let body: Body =
            serde_json::from_str(r#"{"pos":[1.0,2.0],"vel":[3.0,4.0],"radius":5.0}"#).unwrap();
        assert_eq!(body.pos, Vec2::new(1.0, 2.0));
        assert_eq!(body.vel, Vec2::new(3.0, 4.0));
        assert_eq!(body.radius(), 5.0);

        let negative = r#"{"pos":[0.0,0.0],"vel":[0.0,0.0],"radius":-5.0}"#;
        assert!(serde_json::from_str::<Body>(negative).is_err());
        let zero = r#"{"pos":[0.0,0.0],"vel":[0.0,0.0],"radius":0.0}"#;
        assert!(serde_json::from_str::<Body>(zero).is_err());
    }

    #[test]
    fn test_velocity_queries() {
        let mut body = Body::new(10.0).unwrap();
        assert!(body.velocity_unit_vector().is_none());
        assert!(body.velocity_slope().is_none());

        body.set_velocity(3.0, 4.0);
        let u = body.velocity_unit_vector().unwrap();
        assert!((u.length() - 1.0).abs() < 1e-6);
        assert!((body.velocity_slope().unwrap() - 4.0 / 3.0).abs() < 1e-5);
        assert!((body.speed() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_vertical_slope_is_finite() {
        let mut body = Body::new(10.0).unwrap();
        body.set_velocity(0.0, -7.0);
        assert_eq!(body.velocity_slope(), Some(-1.0));
    }
}
