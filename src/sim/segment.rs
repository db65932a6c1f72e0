//! Static line segments (ground pieces and section dividers)

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::collision::{CollisionResult, segment_collision};
use super::geometry::segment_normal;
use crate::SimError;

/// An immutable line obstacle with one collidable face
///
/// The face is the side the normal points to. Segments with
/// `start.x == end.x` are vertical posts and collide from either side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "SegmentRecord", into = "SegmentRecord")]
pub struct Segment {
    start: Vec2,
    end: Vec2,
    normal: Vec2,
}

/// Serialized form of a segment; the normal is always recomputed
#[derive(Serialize, Deserialize)]
struct SegmentRecord {
    start: Vec2,
    end: Vec2,
}

impl TryFrom<SegmentRecord> for Segment {
    type Error = SimError;

    fn try_from(record: SegmentRecord) -> Result<Self, Self::Error> {
        Segment::new(record.start, record.end)
    }
}

impl From<Segment> for SegmentRecord {
    fn from(segment: Segment) -> Self {
        Self {
            start: segment.start,
            end: segment.end,
        }
    }
}

impl Segment {
    pub fn new(start: Vec2, end: Vec2) -> Result<Self, SimError> {
        let normal = segment_normal(start, end)
            .ok_or(SimError::DegenerateSegment(start.x, start.y, end.x, end.y))?;
        Ok(Self { start, end, normal })
    }

    #[inline]
    pub fn start(&self) -> Vec2 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Vec2 {
        self.end
    }

    /// Unit normal `(ny, -nx)` of the start-to-end direction
    #[inline]
    pub fn normal(&self) -> Vec2 {
        self.normal
    }

    /// Unit direction from start to end
    #[inline]
    pub fn direction(&self) -> Vec2 {
        Vec2::new(-self.normal.y, self.normal.x)
    }

    #[inline]
    pub fn is_vertical(&self) -> bool {
        self.start.x == self.end.x
    }

    /// Slope of the segment's line, `None` for vertical posts
    pub fn slope(&self) -> Option<f32> {
        if self.is_vertical() {
            None
        } else {
            Some((self.end.y - self.start.y) / (self.end.x - self.start.x))
        }
    }

    /// Y of the segment's line at `x`
    pub fn y_at(&self, x: f32) -> Option<f32> {
        self.slope().map(|m| m * (x - self.start.x) + self.start.y)
    }

    /// Horizontal extent as (min, max)
    pub fn x_span(&self) -> (f32, f32) {
        (self.start.x.min(self.end.x), self.start.x.max(self.end.x))
    }

    /// Vertical extent as (min, max)
    pub fn y_span(&self) -> (f32, f32) {
        (self.start.y.min(self.end.y), self.start.y.max(self.end.y))
    }

    /// Points to draw, in insertion order
    pub fn polyline(&self) -> [Vec2; 2] {
        [self.start, self.end]
    }
}

/// An ordered collection of segments
///
/// Each segment is checked on its own; order only matters for drawing and
/// for which hit is applied last in a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Boundaries {
    segments: Vec<Segment>,
}

impl Boundaries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Check the body against every segment in order, resolving each hit
    ///
    /// Returns the index and result of every segment that was hit.
    pub fn check_collision(&self, body: &mut Body) -> Vec<(usize, CollisionResult)> {
        self.segments
            .iter()
            .enumerate()
            .filter_map(|(i, segment)| {
                let result = segment_collision(body, segment);
                result.hit.then_some((i, result))
            })
            .collect()
    }
}

impl FromIterator<Segment> for Boundaries {
    fn from_iter<T: IntoIterator<Item = Segment>>(iter: T) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}
