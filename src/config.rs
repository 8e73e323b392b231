use crate::filters::PoseSmoothing;
use crate::math::Vec3;
use crate::steps::AngleSteps;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    NonFiniteAngle,
    NegativeAngleIncrement,
    InvalidTrackedRadius,
    InvalidTwistSensitivity,
    InvalidValue,
    InvalidSmoothing(&'static str),
    LeverAngleOutOfRange,
    InvalidSmoothTime,
    InvalidDampingSpeed,
    InvalidDistance,
    InvalidMotor,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::NonFiniteAngle => write!(f, "min_angle and max_angle must be finite"),
            ConfigError::NegativeAngleIncrement => write!(f, "angle_increment must be finite and >= 0.0"),
            ConfigError::InvalidTrackedRadius => write!(f, "position_tracked_radius must be finite and >= 0.0"),
            ConfigError::InvalidTwistSensitivity => write!(f, "twist_sensitivity must be finite"),
            ConfigError::InvalidValue => write!(f, "value must be finite"),
            ConfigError::InvalidSmoothing(reason) => write!(f, "{}", reason),
            ConfigError::LeverAngleOutOfRange => write!(f, "lever angles must be within -90.0..=90.0"),
            ConfigError::InvalidSmoothTime => write!(f, "smooth_time must be finite and > 0.0"),
            ConfigError::InvalidDampingSpeed => write!(f, "damping_speed must be finite and > 0.0"),
            ConfigError::InvalidDistance => write!(f, "distances must be finite and >= 0.0"),
            ConfigError::InvalidMotor => write!(f, "motor target_velocity and force must be finite, force >= 0.0"),
        }
    }
}

/// Knob configuration. Every field may be changed live through
/// [`Knob::set_config`](crate::Knob::set_config).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnobConfig {
    /// Initial normalized value.
    pub value: f32,
    /// Clamp rotation to `min_angle..=max_angle` and value to `0.0..=1.0`.
    pub clamped_motion: bool,
    /// Rotation in degrees at value 0.0.
    pub min_angle: f32,
    /// Rotation in degrees at value 1.0.
    pub max_angle: f32,
    /// Detent spacing in degrees, 0.0 for continuous motion.
    pub angle_increment: f32,
    /// Horizontal distance from the hub beyond which the controller's
    /// position sweeps the knob. 0.0 disables position tracking.
    pub position_tracked_radius: f32,
    /// Scale applied to wrist twist.
    pub twist_sensitivity: f32,
    /// Hub position in the knob's local frame.
    pub hub_offset: Vec3,
    pub smoothing: PoseSmoothing,
}

impl Default for KnobConfig {
    fn default() -> Self {
        Self {
            value: 0.5,
            clamped_motion: true,
            min_angle: -90.0,
            max_angle: 90.0,
            angle_increment: 0.0,
            position_tracked_radius: 0.1,
            twist_sensitivity: 1.5,
            hub_offset: Vec3::ZERO,
            smoothing: PoseSmoothing::None,
        }
    }
}

impl KnobConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_angle.is_finite() || !self.max_angle.is_finite() {
            return Err(ConfigError::NonFiniteAngle);
        }

        // NaN fails this comparison too
        if !(self.angle_increment >= 0.0) || !self.angle_increment.is_finite() {
            return Err(ConfigError::NegativeAngleIncrement);
        }

        if !(self.position_tracked_radius >= 0.0) || !self.position_tracked_radius.is_finite() {
            return Err(ConfigError::InvalidTrackedRadius);
        }

        if !self.twist_sensitivity.is_finite() {
            return Err(ConfigError::InvalidTwistSensitivity);
        }

        if !self.value.is_finite() {
            return Err(ConfigError::InvalidValue);
        }

        if !self.hub_offset.is_finite() {
            return Err(ConfigError::InvalidDistance);
        }

        self.smoothing.validate().map_err(ConfigError::InvalidSmoothing)
    }

    /// Repairs what can be repaired: an inverted range pulls `min_angle` down
    /// to `max_angle`, and a clamped knob's value is clamped to `0.0..=1.0`.
    pub fn sanitized(mut self) -> Self {
        if self.min_angle > self.max_angle {
            log::warn!(
                "knob min_angle {} exceeds max_angle {}, clamping",
                self.min_angle,
                self.max_angle
            );
            self.min_angle = self.max_angle;
        }

        if self.clamped_motion {
            self.value = self.value.clamp(0.0, 1.0);
        }

        self
    }

    #[inline]
    pub fn angle_range(&self) -> f32 {
        self.max_angle - self.min_angle
    }

    #[inline]
    pub fn steps(&self) -> AngleSteps {
        AngleSteps::new(self.angle_increment)
    }

    /// Position tracking needs a radius to sweep around.
    #[inline]
    pub fn tracks_position(&self) -> bool {
        self.position_tracked_radius > f32::EPSILON
    }
}
