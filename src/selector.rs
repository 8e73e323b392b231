//! Knob rotation mode selection.
//!
//! Three signals can turn a knob:
//!
//! - **position**: the controller sweeping around the hub, used once the
//!   hand is far enough from the hub for the sweep angle to be stable;
//! - **up vector**: wrist twist read from the controller's up axis, used
//!   when the controller points along the spin axis (grabbing from above);
//! - **forward vector**: wrist twist read from the controller's forward
//!   axis, used otherwise (grabbing from the side).
//!
//! Position tracking runs independently of twist tracking, and exactly one of
//! the twist signals is live at a time. Every switch goes through a dead-zone
//! latch and rebases the newly live signal so the combined rotation does not
//! jump.

use crate::angle::AngleAccumulator;
use crate::hysteresis::{ModeHysteresis, ModeLatch, Transition};
use crate::math::Vec3;
use crate::pose::TrackingSample;

/// An accumulator that remembers a rebase it could not perform.
///
/// When the sample at a mode switch is degenerate, the rebase happens on the
/// first usable sample instead of measuring against a stale base.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct TrackedSignal {
    angles: AngleAccumulator,
    pending_rebase: bool,
}

impl TrackedSignal {
    fn reset(&mut self) {
        self.angles.reset();
        self.pending_rebase = false;
    }

    fn rebase(&mut self, direction: Option<Vec3>) {
        self.pending_rebase = !direction.is_some_and(|d| self.angles.set_base_from_vector(d));
    }

    fn follow(&mut self, direction: Option<Vec3>) {
        let Some(direction) = direction else {
            return;
        };

        if self.pending_rebase {
            self.pending_rebase = !self.angles.set_base_from_vector(direction);
        }
        self.angles.set_target_from_vector(direction);
    }
}

/// Position/twist mode state machine and its three accumulators.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotationModeSelector {
    position: TrackedSignal,
    up: TrackedSignal,
    forward: TrackedSignal,
    position_driven: ModeLatch,
    up_vector_driven: ModeLatch,
}

impl RotationModeSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zeroes all accumulators. Mode flags are kept; the next fresh
    /// [`track`](Self::track) re-evaluates them.
    pub fn reset(&mut self) {
        self.position.reset();
        self.up.reset();
        self.forward.reset();
    }

    pub fn is_position_driven(&self) -> bool {
        self.position_driven.engaged
    }

    pub fn is_up_vector_driven(&self) -> bool {
        self.up_vector_driven.engaged
    }

    pub fn position_angles(&self) -> &AngleAccumulator {
        &self.position.angles
    }

    pub fn up_vector_angles(&self) -> &AngleAccumulator {
        &self.up.angles
    }

    pub fn forward_vector_angles(&self) -> &AngleAccumulator {
        &self.forward.angles
    }

    /// Feeds one tick of tracking signals.
    ///
    /// `tracked_radius` is the position-tracking radius, `None` when position
    /// tracking is disabled. A `fresh` sample (the one taken at grab start)
    /// bypasses the dead zones and rebases every live signal.
    pub fn track(&mut self, sample: &TrackingSample, tracked_radius: Option<f32>, fresh: bool) {
        let position_mode = tracked_radius.map(ModeHysteresis::position);
        let position = match position_mode {
            Some(mode) => mode.apply(sample.radius, &mut self.position_driven, fresh),
            None if self.position_driven.engaged => {
                log::debug!("knob position tracking disabled");
                self.position_driven.engaged = false;
                Transition::Released
            }
            None => Transition::Idle,
        };

        if position == Transition::Engaged {
            self.position.rebase(sample.offset_direction);
        }

        let twist_mode = ModeHysteresis::up_vector();
        let twist = twist_mode.apply(sample.tilt, &mut self.up_vector_driven, fresh);
        match twist {
            Transition::Engaged => self.up.rebase(sample.up),
            Transition::Released => self.forward.rebase(sample.forward),
            Transition::Held | Transition::Idle => {}
        }

        if !fresh {
            if let (Some(mode), true) = (position_mode, position.is_edge()) {
                if position.is_engaged() {
                    log::debug!(
                        "knob position tracking engaged at radius {} (releases below {})",
                        sample.radius,
                        mode.exit_level()
                    );
                } else {
                    log::debug!(
                        "knob position tracking released at radius {} (re-engages at {})",
                        sample.radius,
                        mode.entry_level()
                    );
                }
            }
            if twist.is_edge() {
                let (source, next_switch) = if twist.is_engaged() {
                    ("up", twist_mode.exit_level())
                } else {
                    ("forward", twist_mode.entry_level())
                };
                log::debug!(
                    "knob twist now read from {} vector (tilt {}, switches back at {})",
                    source,
                    sample.tilt,
                    next_switch
                );
            }
        }

        if self.position_driven.engaged {
            self.position.follow(sample.offset_direction);
        }

        if self.up_vector_driven.engaged {
            self.up.follow(sample.up);
        } else {
            self.forward.follow(sample.forward);
        }
    }

    /// Combines the accumulated signals into a knob rotation relative to
    /// `base_rotation`.
    ///
    /// Both twist accumulators contribute their last total, frozen or live;
    /// only twist is scaled by `twist_sensitivity`.
    pub fn combined_rotation(&self, base_rotation: f32, twist_sensitivity: f32) -> f32 {
        let twist = self.up.angles.total_offset() + self.forward.angles.total_offset();
        base_rotation - twist * twist_sensitivity - self.position.angles.total_offset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::heading_degrees;

    fn sample(radius: f32, offset_heading: f32, tilt: f32, twist_heading: f32) -> TrackingSample {
        let dir = |deg: f32| Vec3::new(libm::cosf(deg.to_radians()), 0.0, libm::sinf(deg.to_radians()));
        TrackingSample {
            offset_direction: Some(dir(offset_heading)),
            radius,
            forward: Some(dir(twist_heading)),
            up: Some(dir(twist_heading)),
            tilt,
        }
    }

    #[test]
    fn test_fresh_read_yields_zero_offset() {
        let mut selector = RotationModeSelector::new();
        selector.track(&sample(0.2, 40.0, 0.1, 10.0), Some(0.1), true);

        assert!(selector.is_position_driven());
        assert!(!selector.is_up_vector_driven());
        assert_eq!(selector.combined_rotation(12.0, 1.5), 12.0);
    }

    #[test]
    fn test_forward_twist_scaled() {
        let mut selector = RotationModeSelector::new();
        selector.track(&sample(0.0, 0.0, 0.0, 0.0), Some(0.1), true);
        selector.track(&sample(0.0, 0.0, 0.0, 20.0), Some(0.1), false);

        assert!((selector.forward_vector_angles().total_offset() - 20.0).abs() < 1e-3);
        assert!((selector.combined_rotation(0.0, 1.5) + 30.0).abs() < 1e-3);
    }

    #[test]
    fn test_switch_to_up_vector_keeps_rotation() {
        let mut selector = RotationModeSelector::new();
        selector.track(&sample(0.0, 0.0, 0.0, 0.0), None, true);
        selector.track(&sample(0.0, 0.0, 0.0, 30.0), None, false);
        let before = selector.combined_rotation(0.0, 1.0);

        // Tip the controller over; the up axis reads a different heading
        let mut tipped = sample(0.0, 0.0, 0.95, 0.0);
        tipped.up = Some(Vec3::new(0.0, 0.0, -1.0));
        selector.track(&tipped, None, false);

        assert!(selector.is_up_vector_driven());
        assert!((selector.combined_rotation(0.0, 1.0) - before).abs() < 1e-3);
        assert!((heading_degrees(Vec3::new(0.0, 0.0, -1.0)) - selector.up_vector_angles().base_angle()).abs() < 1e-3);
    }

    #[test]
    fn test_pending_rebase_on_degenerate_switch() {
        let mut selector = RotationModeSelector::new();
        selector.track(&sample(0.0, 0.0, 0.0, 0.0), None, true);

        // Switch to up vector while the up axis is vertical
        let mut tipped = sample(0.0, 0.0, 0.95, 0.0);
        tipped.up = None;
        selector.track(&tipped, None, false);
        assert!(selector.is_up_vector_driven());

        // First usable up sample becomes the new base
        let mut usable = sample(0.0, 0.0, 0.95, 0.0);
        usable.up = Some(Vec3::new(-1.0, 0.0, 0.0));
        selector.track(&usable, None, false);
        assert_eq!(selector.combined_rotation(0.0, 1.0), 0.0);
    }

    #[test]
    fn test_disabled_position_tracking() {
        let mut selector = RotationModeSelector::new();
        selector.track(&sample(5.0, 0.0, 0.0, 0.0), None, true);
        assert!(!selector.is_position_driven());

        selector.track(&sample(5.0, 60.0, 0.0, 0.0), None, false);
        assert_eq!(selector.position_angles().total_offset(), 0.0);
    }
}
