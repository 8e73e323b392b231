//! Controller pose and the flattened signals derived from it.

use crate::math::{Frame, Vec3};

/// Tracked controller pose.
///
/// Widgets expect it in their own local frame; use [`ControllerPose::to_local`]
/// when the host samples in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerPose {
    pub position: Vec3,
    /// Controller forward axis (unit length).
    pub forward: Vec3,
    /// Controller up axis (unit length).
    pub up: Vec3,
}

impl Default for ControllerPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            forward: Vec3::Z,
            up: Vec3::Y,
        }
    }
}

impl ControllerPose {
    pub const fn new(position: Vec3, forward: Vec3, up: Vec3) -> Self {
        Self { position, forward, up }
    }

    /// Re-expresses a world-space pose in `frame`.
    pub fn to_local(&self, frame: &Frame) -> Self {
        Self {
            position: frame.inverse_transform_point(self.position),
            forward: frame.inverse_transform_direction(self.forward),
            up: frame.inverse_transform_direction(self.up),
        }
    }
}

/// Per-tick knob tracking signals, all in the knob's local frame with the spin
/// axis (Y) stripped.
///
/// Directions are `None` when the flattened vector is degenerate, e.g. the
/// controller sits exactly above the hub or points straight along the axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackingSample {
    /// Horizontal direction from hub to controller.
    pub offset_direction: Option<Vec3>,
    /// Horizontal distance from hub to controller.
    pub radius: f32,
    /// Flattened controller forward axis.
    pub forward: Option<Vec3>,
    /// Flattened controller up axis.
    pub up: Option<Vec3>,
    /// `|forward.y|` before flattening: how far the controller points along
    /// the spin axis.
    pub tilt: f32,
}

impl TrackingSample {
    /// Derives the tracking signals of `pose` around a hub at `hub`.
    pub fn from_pose(pose: &ControllerPose, hub: Vec3) -> Self {
        let planar_offset = (pose.position - hub).flatten();
        let radius = planar_offset.length();

        Self {
            offset_direction: planar_offset.try_normalize(),
            radius: if radius.is_finite() { radius } else { 0.0 },
            forward: pose.forward.flatten().try_normalize(),
            up: pose.up.flatten().try_normalize(),
            tilt: if pose.forward.y.is_finite() {
                pose.forward.y.abs()
            } else {
                0.0
            },
        }
    }
}
