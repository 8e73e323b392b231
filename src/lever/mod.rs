//! Binary levers.
//!
//! Both levers report a boolean value and fire [`SwitchEvent`]s on every flip:
//!
//! - [`LeverHinge`] swings about its pivot toward the controller's position;
//! - [`TwistLever`] follows the controller's roll once the hand has moved away
//!   from where it grabbed.
//!
//! [`SwitchEvent`]: crate::listener::SwitchEvent

mod hinge;
mod twist;

pub use hinge::{LeverHinge, LeverHingeConfig};
pub use twist::{TwistLever, TwistLeverConfig};

use crate::config::ConfigError;

/// Lever angles are limited to a quarter turn either side of upright.
pub const LEVER_ANGLE_LIMIT: f32 = 90.0;

/// Off/on angles of a lever, in degrees. Either order is accepted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeverRange {
    /// Angle in the off position.
    pub min_angle: f32,
    /// Angle in the on position.
    pub max_angle: f32,
}

impl Default for LeverRange {
    fn default() -> Self {
        Self {
            min_angle: -90.0,
            max_angle: 90.0,
        }
    }
}

impl LeverRange {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let in_range = |angle: f32| (-LEVER_ANGLE_LIMIT..=LEVER_ANGLE_LIMIT).contains(&angle);
        if !in_range(self.min_angle) || !in_range(self.max_angle) {
            return Err(ConfigError::LeverAngleOutOfRange);
        }
        Ok(())
    }

    /// Resting angle for a value.
    #[inline]
    pub fn rest_angle(&self, on: bool) -> f32 {
        if on { self.max_angle } else { self.min_angle }
    }

    /// Clamps to the range whichever way round it is configured.
    pub fn clamp(&self, angle: f32) -> f32 {
        angle.clamp(self.min_angle.min(self.max_angle), self.min_angle.max(self.max_angle))
    }

    /// Distances from `angle` to the off and on angles.
    pub fn distances(&self, angle: f32) -> (f32, f32) {
        ((self.min_angle - angle).abs(), (self.max_angle - angle).abs())
    }
}
