//! Collision detection and response
//!
//! Three shapes meet the ball: the canvas walls, line segments (angled ramps
//! and vertical dividers) and circular pegs. Each check resolves the contact
//! in place on the body and reports what happened.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::geometry::{clear_line_along, line_intersection, reflect, signed_distance, slope_intersection_x, unit};
use super::pegs::Peg;
use super::segment::Segment;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Contact point (if hit)
    pub point: Vec2,
    /// Surface normal at contact, pointing toward the ball
    pub normal: Vec2,
    /// Penetration depth that was corrected
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }

    fn hit(point: Vec2, normal: Vec2, penetration: f32) -> Self {
        Self {
            hit: true,
            point,
            normal,
            penetration,
        }
    }
}

/// Canvas boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wall {
    Left,
    Right,
    Top,
    Floor,
}

/// Walls touched in one check, at most one per axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallHits {
    pub horizontal: Option<Wall>,
    pub vertical: Option<Wall>,
}

impl WallHits {
    pub fn any(&self) -> bool {
        self.horizontal.is_some() || self.vertical.is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = Wall> {
        self.horizontal.into_iter().chain(self.vertical)
    }
}

/// Bounce the body off the canvas walls
///
/// A body whose edge reaches a wall is clamped to just touch it and the
/// velocity component across that wall is turned to point back inside.
/// Speed is unchanged.
pub fn wall_collision(body: &mut Body, width: f32, height: f32) -> WallHits {
    let r = body.radius();
    let mut hits = WallHits::default();

    if body.pos.x - r <= 0.0 {
        body.pos.x = r;
        body.vel.x = body.vel.x.abs();
        hits.horizontal = Some(Wall::Left);
    } else if body.pos.x + r >= width {
        body.pos.x = width - r;
        body.vel.x = -body.vel.x.abs();
        hits.horizontal = Some(Wall::Right);
    }

    if body.pos.y - r <= 0.0 {
        body.pos.y = r;
        body.vel.y = body.vel.y.abs();
        hits.vertical = Some(Wall::Top);
    } else if body.pos.y + r >= height {
        body.pos.y = height - r;
        body.vel.y = -body.vel.y.abs();
        hits.vertical = Some(Wall::Floor);
    }

    hits
}

/// Check the body against one segment and resolve the contact
///
/// Branches, first match wins:
/// - ramp: the body is over the segment and its radius-offset point has
///   crossed the line; velocity is reflected and the body is put back on the
///   line's face
/// - left end: the body overlaps the segment's left end from outside; it is
///   clamped to `min_x - radius` and its horizontal velocity inverted
/// - right end: mirror of the left end at `max_x + radius`
///
/// Vertical segments have no slope and collide as posts.
pub fn segment_collision(body: &mut Body, segment: &Segment) -> CollisionResult {
    let Some(slope) = segment.slope() else {
        return post_collision(body, segment);
    };

    let r = body.radius();
    let n = segment.normal();
    let start = segment.start();

    // Point on the body nearest the line, tested against y = m(x - x0) + y0
    let probe = body.pos - n * r;
    let line_y = slope * (probe.x - start.x) + start.y;
    let crossed = if n.y < 0.0 {
        probe.y >= line_y
    } else {
        probe.y <= line_y
    };

    // A center more than a radius behind the face has passed under the
    // segment; one behind the face and not moving into it is still underneath
    let dist = signed_distance(body.pos, start, n);
    if !crossed || dist <= -r || (dist < 0.0 && body.vel.dot(n) >= 0.0) {
        return CollisionResult::miss();
    }

    let (min_x, max_x) = segment.x_span();
    let x = body.pos.x;

    if x >= min_x && x <= max_x {
        resolve_ramp(body, segment, slope, dist)
    } else if x < min_x && x >= min_x - r {
        let point = Vec2::new(min_x, segment.y_at(min_x).unwrap_or(start.y));
        body.pos.x = min_x - r;
        body.vel.x = -body.vel.x;
        CollisionResult::hit(point, Vec2::NEG_X, x - (min_x - r))
    } else if x > max_x && x <= max_x + r {
        let point = Vec2::new(max_x, segment.y_at(max_x).unwrap_or(start.y));
        body.pos.x = max_x + r;
        body.vel.x = -body.vel.x;
        CollisionResult::hit(point, Vec2::X, max_x + r - x)
    } else {
        CollisionResult::miss()
    }
}

/// Reflect off the ramp face and place the body back on the face
fn resolve_ramp(body: &mut Body, segment: &Segment, slope: f32, dist: f32) -> CollisionResult {
    let r = body.radius();
    let n = segment.normal();
    let start = segment.start();
    let penetration = r - dist;
    let foot = body.pos - n * dist;

    let Some(incoming) = body.velocity_unit_vector() else {
        // At rest: nothing to reflect, push straight out of the face
        body.pos = foot + n * r;
        return CollisionResult::hit(foot, n, penetration);
    };

    // Where the path of travel meets the segment's line
    let contact = if incoming.x != 0.0 {
        body.velocity_slope()
            .and_then(|m| slope_intersection_x(body.pos, m, start, slope))
            .map(|x| Vec2::new(x, slope * (x - start.x) + start.y))
    } else {
        line_intersection(body.pos, incoming, start, segment.direction())
    };

    if body.vel.dot(n) < 0.0 {
        body.vel = reflect(body.vel, n);
    }

    let fallback = foot + n * r;
    let resolved = match (contact, body.velocity_unit_vector()) {
        (Some(contact), Some(outgoing)) => clear_line_along(contact, outgoing, n, r)
            .filter(|p| p.distance(body.pos) <= 2.0 * r + body.speed())
            .unwrap_or_else(|| {
                log::debug!("Grazing ramp contact at {:?}, pushing out along normal", contact);
                fallback
            }),
        _ => {
            log::warn!("Path parallel to ramp, pushing out along normal");
            fallback
        }
    };

    body.pos = resolved;
    CollisionResult::hit(contact.unwrap_or(foot), n, penetration)
}

/// Vertical segment: a thin post that pushes the body back to the side it
/// came from
fn post_collision(body: &mut Body, segment: &Segment) -> CollisionResult {
    let r = body.radius();
    let post_x = segment.start().x;
    let (top, bottom) = segment.y_span();
    let dx = body.pos.x - post_x;

    if dx.abs() >= r || body.pos.y + r < top || body.pos.y - r > bottom {
        return CollisionResult::miss();
    }

    let before = dx - body.vel.x;
    let side = if before != 0.0 {
        before.signum()
    } else if dx != 0.0 {
        dx.signum()
    } else {
        1.0
    };

    let point = Vec2::new(post_x, body.pos.y.clamp(top, bottom));
    let penetration = r - dx.abs();
    body.pos.x = post_x + side * r;
    body.vel.x = side * body.vel.x.abs();
    CollisionResult::hit(point, Vec2::new(side, 0.0), penetration)
}

/// Check the body against one peg and resolve the contact
///
/// Overlap is `dist² <= (r_body + r_peg)²`. The velocity's normal component
/// is negated and the body is pushed out along the normal by the penetration
/// depth. The peg does not move.
pub fn peg_collision(body: &mut Body, peg: &Peg) -> CollisionResult {
    let reach = body.radius() + peg.radius;
    let offset = body.pos - peg.pos;
    let dist_sq = offset.length_squared();

    if dist_sq > reach * reach {
        return CollisionResult::miss();
    }

    let dist = dist_sq.sqrt();
    // Concentric: no normal to speak of, send the body up
    let normal = unit(offset).unwrap_or(Vec2::NEG_Y);
    let penetration = reach - dist;

    body.vel = reflect(body.vel, normal);
    body.pos += normal * penetration;

    CollisionResult::hit(peg.pos + normal * peg.radius, normal, penetration)
}
