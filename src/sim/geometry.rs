//! Vector and line geometry helpers
//!
//! Screen coordinates: x grows right, y grows down.

use glam::Vec2;

/// Below this squared length a vector is treated as having no direction
const MIN_LENGTH_SQ: f32 = 1e-12;

/// Unit vector in the direction of `v`, or `None` for the zero vector
#[inline]
pub fn unit(v: Vec2) -> Option<Vec2> {
    if v.length_squared() <= MIN_LENGTH_SQ {
        None
    } else {
        Some(v.normalize())
    }
}

/// Normal of the segment `start -> end`
///
/// With unit direction `(nx, ny)` the normal is `(ny, -nx)`, which points up
/// for a segment drawn left to right.
pub fn segment_normal(start: Vec2, end: Vec2) -> Option<Vec2> {
    unit(end - start).map(|d| Vec2::new(d.y, -d.x))
}

/// Reflect velocity off a surface
///
/// Splits `velocity` into parts along and across `normal`, negates the part
/// along it and recombines: v' = v - 2(v·n)n
#[inline]
pub fn reflect(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// X where two lines in slope form cross
///
/// Line A passes through `a` with slope `slope_a`, line B through `b` with
/// slope `slope_b`. Returns `None` for parallel lines.
pub fn slope_intersection_x(a: Vec2, slope_a: f32, b: Vec2, slope_b: f32) -> Option<f32> {
    let denom = slope_a - slope_b;
    if denom.abs() <= f32::EPSILON {
        return None;
    }
    Some((slope_a * a.x - slope_b * b.x + b.y - a.y) / denom)
}

/// Point where the ray `origin + t * dir` crosses the line through `point`
/// along `line_dir`
pub fn line_intersection(origin: Vec2, dir: Vec2, point: Vec2, line_dir: Vec2) -> Option<Vec2> {
    let denom = dir.perp_dot(line_dir);
    if denom.abs() <= f32::EPSILON {
        return None;
    }
    let t = (point - origin).perp_dot(line_dir) / denom;
    Some(origin + dir * t)
}

/// Signed distance from `p` to the line through `point` with unit `normal`
///
/// Positive on the side the normal points to.
#[inline]
pub fn signed_distance(p: Vec2, point: Vec2, normal: Vec2) -> f32 {
    (p - point).dot(normal)
}

/// Center of a circle that leaves the line at `on_line` along `dir` and
/// has just cleared it
///
/// The result sits at distance `radius` from the line on the side `normal`
/// points to. `None` when `dir` does not move away from the line.
pub fn clear_line_along(on_line: Vec2, dir: Vec2, normal: Vec2, radius: f32) -> Option<Vec2> {
    let departure = dir.dot(normal);
    if departure <= f32::EPSILON {
        return None;
    }
    Some(on_line + dir * (radius / departure))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_zero_vector() {
        assert!(unit(Vec2::ZERO).is_none());
        let u = unit(Vec2::new(3.0, 4.0)).unwrap();
        assert!((u - Vec2::new(0.6, 0.8)).length() < 1e-6);
    }

    #[test]
    fn test_segment_normal_points_up_for_left_to_right() {
        let n = segment_normal(Vec2::new(0.0, 10.0), Vec2::new(10.0, 10.0)).unwrap();
        assert!((n - Vec2::new(0.0, -1.0)).length() < 1e-6);
        assert!(segment_normal(Vec2::ONE, Vec2::ONE).is_none());
    }

    #[test]
    fn test_reflect_velocity() {
        // Ball moving right, hits vertical wall (normal pointing left)
        let reflected = reflect(Vec2::new(100.0, 0.0), Vec2::new(-1.0, 0.0));
        assert!((reflected.x - (-100.0)).abs() < 0.001);
        assert!(reflected.y.abs() < 0.001);
    }

    #[test]
    fn test_slope_intersection() {
        // y = x and y = -x + 10 meet at x = 5
        let x = slope_intersection_x(Vec2::ZERO, 1.0, Vec2::new(0.0, 10.0), -1.0).unwrap();
        assert!((x - 5.0).abs() < 1e-5);
        assert!(slope_intersection_x(Vec2::ZERO, 2.0, Vec2::ONE, 2.0).is_none());
    }

    #[test]
    fn test_line_intersection() {
        let p = line_intersection(
            Vec2::new(5.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(0.0, 20.0),
            Vec2::new(1.0, 0.0),
        )
        .unwrap();
        assert!((p - Vec2::new(5.0, 20.0)).length() < 1e-5);
    }

    #[test]
    fn test_clear_line_along() {
        // Leaving a floor at y = 100 at 45 degrees up-right
        let dir = Vec2::new(1.0, -1.0).normalize();
        let normal = Vec2::new(0.0, -1.0);
        let center = clear_line_along(Vec2::new(50.0, 100.0), dir, normal, 10.0).unwrap();
        assert!((signed_distance(center, Vec2::new(0.0, 100.0), normal) - 10.0).abs() < 1e-4);
        assert!((center - Vec2::new(60.0, 90.0)).length() < 1e-4);

        // Moving into the line never clears it
        assert!(clear_line_along(Vec2::new(50.0, 100.0), -dir, normal, 10.0).is_none());
    }
}
