use crate::config::KnobConfig;
use crate::math::{lerp, lerp_unclamped};
use crate::selector::RotationModeSelector;

/// Mutable per-knob state. Only [`Knob`](crate::Knob) drives it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KnobState {
    /// Published normalized value
    pub(crate) value: f32,

    /// Last rotation applied to the handle, in degrees
    pub(crate) rotation: f32,

    /// Rotation at the last grab start; the combined delta is measured from it
    pub(crate) base_rotation: f32,

    /// Mode flags and accumulated angles
    pub(crate) selector: RotationModeSelector,
}

impl KnobState {
    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn base_rotation(&self) -> f32 {
        self.base_rotation
    }

    pub fn selector(&self) -> &RotationModeSelector {
        &self.selector
    }

    /// Starts a grab session: clears the accumulated angles and takes the
    /// current value's rotation as zero reference.
    pub(crate) fn begin_grab(&mut self, config: &KnobConfig) {
        self.selector.reset();
        self.base_rotation = lerp_unclamped(config.min_angle, config.max_angle, self.value);
    }

    /// Clamps and quantizes a raw rotation, stores and returns it. A clamped
    /// knob only rests on detents inside its range.
    pub(crate) fn apply_rotation(&mut self, raw: f32, config: &KnobConfig) -> f32 {
        let steps = config.steps();
        self.rotation = if config.clamped_motion {
            steps.snap_angle_within(raw, config.min_angle, config.max_angle)
        } else {
            steps.snap_angle(raw, config.min_angle)
        };
        self.rotation
    }

    /// Rotation that displays the current value.
    pub(crate) fn rotation_for_value(&self, config: &KnobConfig) -> f32 {
        let steps = config.steps();
        if config.clamped_motion {
            let angle = lerp(config.min_angle, config.max_angle, self.value);
            steps.snap_angle_within(angle, config.min_angle, config.max_angle)
        } else {
            let angle = lerp_unclamped(config.min_angle, config.max_angle, self.value);
            steps.snap_angle(angle, config.min_angle)
        }
    }

    /// Value shown by `rotation`, or `None` for a zero-width range where
    /// every rotation maps to every value.
    pub(crate) fn value_for_rotation(rotation: f32, config: &KnobConfig) -> Option<f32> {
        let range = config.angle_range();
        if range <= f32::EPSILON {
            return None;
        }
        Some((rotation - config.min_angle) / range)
    }

    /// Clamps and quantizes `value` the same way rotations are, then stores
    /// it. Returns `true` when the stored value changed.
    pub(crate) fn set_value(&mut self, value: f32, config: &KnobConfig) -> bool {
        if !value.is_finite() {
            return false;
        }

        let steps = config.steps();
        let value = if config.clamped_motion {
            steps.snap_value_within(value, config.angle_range())
        } else {
            steps.snap_value(value, config.angle_range())
        };

        let changed = value != self.value;
        self.value = value;
        changed
    }
}
