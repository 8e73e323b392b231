//! Continuous angle tracking across the ±180° wrap.
//!
//! A sampled direction only tells us an angle modulo 360°. The accumulator
//! turns a stream of such samples into an unbounded offset by summing the
//! shortest step between consecutive readings.

use num_traits::Float;

use crate::math::{DIRECTION_EPSILON, Vec3, heading_degrees};

/// Offsets beyond a quarter turn from the base are folded into the
/// accumulated angle and the base moves to the sample.
pub const REBASE_LIMIT_DEGREES: f32 = 90.0;

/// Signed minimal rotation carrying `start` to an angle congruent to `end`
/// modulo `max`.
///
/// The result lies in `(-max/2, max/2]`. With `max = 360` this is the
/// shortest signed angle in degrees.
pub fn shortest_angle_distance<T: Float>(start: T, end: T, max: T) -> T {
    let delta = end - start;
    let sign = if delta < T::zero() { -T::one() } else { T::one() };
    let half = max / (T::one() + T::one());

    let mut magnitude = delta.abs() % max;
    if magnitude > half {
        magnitude = -(max - magnitude);
    }

    let result = magnitude * sign;
    // An exact half turn backwards is reported as a half turn forwards
    if result <= -half { result + max } else { result }
}

/// Tracks one rotation signal as base + offset + accumulated history.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AngleAccumulator {
    base_angle: f32,
    current_offset: f32,
    accumulated_angle: f32,
}

impl AngleAccumulator {
    pub const fn new() -> Self {
        Self {
            base_angle: 0.0,
            current_offset: 0.0,
            accumulated_angle: 0.0,
        }
    }

    /// Accumulated history plus the live offset from the base.
    #[inline]
    pub fn total_offset(&self) -> f32 {
        self.accumulated_angle + self.current_offset
    }

    pub fn base_angle(&self) -> f32 {
        self.base_angle
    }

    pub fn current_offset(&self) -> f32 {
        self.current_offset
    }

    pub fn accumulated_angle(&self) -> f32 {
        self.accumulated_angle
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Makes `direction` the new zero reference.
    ///
    /// The live offset is folded into the accumulated angle first, so
    /// `total_offset` is unchanged. Returns `false` and leaves the state alone
    /// when `direction` has no usable XZ heading.
    pub fn set_base_from_vector(&mut self, direction: Vec3) -> bool {
        let Some(angle) = sample_heading(direction) else {
            return false;
        };

        self.accumulated_angle += self.current_offset;
        self.base_angle = angle;
        self.current_offset = 0.0;
        true
    }

    /// Measures `direction` against the base.
    ///
    /// A jump of more than [`REBASE_LIMIT_DEGREES`] rebases onto the sample
    /// while keeping the measured step in the accumulated angle. Returns
    /// `false` and leaves the state alone when `direction` has no usable XZ
    /// heading.
    pub fn set_target_from_vector(&mut self, direction: Vec3) -> bool {
        let Some(target) = sample_heading(direction) else {
            return false;
        };

        self.current_offset = shortest_angle_distance(self.base_angle, target, 360.0);

        if self.current_offset.abs() > REBASE_LIMIT_DEGREES {
            self.base_angle = target;
            self.accumulated_angle += self.current_offset;
            self.current_offset = 0.0;
        }
        true
    }
}

fn sample_heading(direction: Vec3) -> Option<f32> {
    let planar = direction.flatten();
    let len = planar.length();
    if !len.is_finite() || len < DIRECTION_EPSILON {
        log::trace!("skipping degenerate direction {:?}", direction);
        return None;
    }
    Some(heading_degrees(planar))
}
