//! Debug geometry for hosts that draw gizmos.
//!
//! Everything is in the widget's local frame; transform with
//! [`Frame::transform_point`](crate::math::Frame::transform_point) to draw in
//! world space.

use crate::math::{DIRECTION_EPSILON, Quat, Vec3};

/// Segments used to draw the position tracking ring.
pub const RING_SEGMENTS: usize = 16;

/// Default length of a lever limit ray.
pub const LIMIT_RAY_LENGTH: f32 = 0.25;

/// Line segments outlining a knob's position tracking radius in the XZ plane.
///
/// Yields nothing when the radius is too small to track position.
pub fn tracking_ring(center: Vec3, radius: f32) -> impl Iterator<Item = (Vec3, Vec3)> {
    let segments = if radius > DIRECTION_EPSILON { RING_SEGMENTS } else { 0 };
    let point = move |index: usize| {
        let angle = index as f32 / RING_SEGMENTS as f32 * core::f32::consts::TAU;
        center + Vec3::new(libm::cosf(angle), 0.0, libm::sinf(angle)) * radius
    };

    (0..segments).map(move |index| (point(index), point(index + 1)))
}

/// Rays from `origin` toward a lever's off and on angles, `(off, on)`.
///
/// Lever angles turn the up axis about X.
pub fn lever_limits(origin: Vec3, min_angle: f32, max_angle: f32, length: f32) -> [(Vec3, Vec3); 2] {
    let ray = |angle: f32| (origin, origin + Quat::from_axis_angle(Vec3::X, angle) * Vec3::Y * length);
    [ray(min_angle), ray(max_angle)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_is_closed() {
        let center = Vec3::new(0.0, 1.0, 0.0);
        let mut count = 0;
        let mut first = None;
        let mut last = None;

        for (start, end) in tracking_ring(center, 0.1) {
            assert!((start.distance(center) - 0.1).abs() < 1e-5);
            assert_eq!(start.y, 1.0);
            first.get_or_insert(start);
            last = Some(end);
            count += 1;
        }

        assert_eq!(count, RING_SEGMENTS);
        assert!(first.unwrap().distance(last.unwrap()) < 1e-5);
    }

    #[test]
    fn test_no_ring_without_radius() {
        assert_eq!(tracking_ring(Vec3::ZERO, 0.0).count(), 0);
    }

    #[test]
    fn test_lever_limits() {
        let [off, on] = lever_limits(Vec3::ZERO, -90.0, 90.0, LIMIT_RAY_LENGTH);
        assert!(off.1.distance(Vec3::new(0.0, 0.0, -0.25)) < 1e-5);
        assert!(on.1.distance(Vec3::new(0.0, 0.0, 0.25)) < 1e-5);
    }
}
