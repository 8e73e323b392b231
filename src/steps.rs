//! Angle increments (detents).
//!
//! A knob with a non-zero increment only rests on multiples of that many
//! degrees counted from its minimum angle. Rotation and value are snapped
//! with the same rounding so they never disagree.

/// Detent spacing for a knob's angle range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleSteps {
    /// Degrees between detents; `0.0` disables snapping.
    pub increment: f32,
}

/// Tolerance, in detents, for a range that is a whole number of increments
/// up to rounding.
const DETENT_EPSILON: f32 = 1e-4;

impl AngleSteps {
    pub const CONTINUOUS: Self = Self { increment: 0.0 };

    pub const fn new(increment: f32) -> Self {
        Self { increment }
    }

    #[inline]
    pub fn is_continuous(&self) -> bool {
        self.increment <= 0.0
    }

    /// Snaps an absolute angle to the nearest detent relative to `min_angle`.
    pub fn snap_angle(&self, angle: f32, min_angle: f32) -> f32 {
        if self.is_continuous() {
            return angle;
        }
        self.snap_span(angle - min_angle) + min_angle
    }

    /// Snaps a normalized value for a range spanning `range` degrees.
    ///
    /// Equivalent to snapping `min + value * range` and mapping back.
    pub fn snap_value(&self, value: f32, range: f32) -> f32 {
        if self.is_continuous() || range <= 0.0 {
            return value;
        }
        self.snap_span(value * range) / range
    }

    /// Like [`snap_angle`](Self::snap_angle), but never leaves
    /// `min_angle..=max_angle`. When the nearest detent lies past an end of a
    /// range the increment does not divide, the last detent inside is used.
    pub fn snap_angle_within(&self, angle: f32, min_angle: f32, max_angle: f32) -> f32 {
        if self.is_continuous() {
            return angle.clamp(min_angle, max_angle);
        }
        let index = self.detent_index(angle - min_angle, max_angle - min_angle);
        (min_angle + index * self.increment).clamp(min_angle, max_angle)
    }

    /// Like [`snap_value`](Self::snap_value), but stays within `0.0..=1.0` on
    /// the same detents as [`snap_angle_within`](Self::snap_angle_within).
    pub fn snap_value_within(&self, value: f32, range: f32) -> f32 {
        if self.is_continuous() || range <= 0.0 {
            return value.clamp(0.0, 1.0);
        }
        let index = self.detent_index(value * range, range);
        (index * self.increment / range).clamp(0.0, 1.0)
    }

    /// Number of detents between `min_angle` and `max_angle`, both ends
    /// included. `None` for continuous motion.
    pub fn detent_count(&self, min_angle: f32, max_angle: f32) -> Option<u32> {
        if self.is_continuous() {
            return None;
        }
        let spans = libm::floorf((max_angle - min_angle).max(0.0) / self.increment + DETENT_EPSILON);
        Some(spans as u32 + 1)
    }

    fn snap_span(&self, span: f32) -> f32 {
        libm::roundf(span / self.increment) * self.increment
    }

    /// Nearest detent to `span`, limited to the detents inside `0..=range`.
    fn detent_index(&self, span: f32, range: f32) -> f32 {
        let last = self.detent_count(0.0, range).map_or(0, |count| count - 1);
        libm::roundf(span / self.increment).clamp(0.0, last as f32)
    }
}

impl Default for AngleSteps {
    fn default() -> Self {
        Self::CONTINUOUS
    }
}
