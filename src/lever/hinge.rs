use super::LeverRange;
use crate::config::ConfigError;
use crate::grab::{ControllerId, GrabState};
use crate::listener::{Handle, ListenerError, ListenerSet, SwitchEvent, SwitchListener};
use crate::math::{Quat, Vec3, smooth_damp};
use crate::pose::ControllerPose;

/// Keeps a lever sitting halfway from flickering between on and off.
const LEVER_DEAD_ZONE: f32 = 0.1;

/// Settling stops within this many degrees of the rest angle.
const SETTLE_TOLERANCE: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeverHingeConfig {
    /// Initial value.
    pub value: bool,
    pub range: LeverRange,
    /// Pivot position in the lever's local frame.
    pub pivot: Vec3,
    /// Distance from the pivot to the handle.
    pub handle_distance: f32,
    /// Seconds the handle takes to catch up with the controller.
    pub smooth_time: f32,
}

impl Default for LeverHingeConfig {
    fn default() -> Self {
        Self {
            value: false,
            range: LeverRange::default(),
            pivot: Vec3::ZERO,
            handle_distance: 0.1,
            smooth_time: 0.1,
        }
    }
}

impl LeverHingeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.range.validate()?;

        if !self.pivot.is_finite() || !(self.handle_distance >= 0.0) || !self.handle_distance.is_finite() {
            return Err(ConfigError::InvalidDistance);
        }

        if !(self.smooth_time > 0.0) || !self.smooth_time.is_finite() {
            return Err(ConfigError::InvalidSmoothTime);
        }

        Ok(())
    }
}

/// A lever swinging about the local X axis through its pivot.
///
/// While grabbed the lever points at the controller: the look angle is
/// measured in the YZ plane from +Y toward +Z and clamped to the range. The
/// handle follows with critically damped smoothing and the value flips to
/// whichever end is closer, with a dead zone favouring the current value.
pub struct LeverHinge<'l> {
    config: LeverHingeConfig,
    value: bool,
    angle: f32,
    angle_velocity: f32,
    settling: bool,
    grab: GrabState,
    handle: Option<&'l dyn Handle>,
    listeners: ListenerSet<'l, dyn SwitchListener + 'l>,
}

impl<'l> LeverHinge<'l> {
    pub fn new(config: LeverHingeConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            value: config.value,
            angle: config.range.rest_angle(config.value),
            angle_velocity: 0.0,
            settling: false,
            grab: GrabState::default(),
            handle: None,
            listeners: ListenerSet::new(),
            config,
        })
    }

    pub fn config(&self) -> &LeverHingeConfig {
        &self.config
    }

    pub fn value(&self) -> bool {
        self.value
    }

    /// Current handle angle in degrees about the local X axis.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn is_grabbed(&self) -> bool {
        self.grab.is_held()
    }

    /// Whether the released lever is still moving to its rest angle.
    pub fn is_settling(&self) -> bool {
        self.settling
    }

    /// Handle position in the lever's local frame.
    pub fn handle_position(&self) -> Vec3 {
        self.config.pivot + Quat::from_axis_angle(Vec3::X, self.angle) * Vec3::Y * self.config.handle_distance
    }

    /// Attaches the handle and places it at the current angle.
    pub fn attach_handle(&mut self, handle: &'l dyn Handle) {
        self.handle = Some(handle);
        self.show();
    }

    pub fn detach_handle(&mut self) {
        self.handle = None;
    }

    pub fn add_listener(&mut self, listener: &'l dyn SwitchListener) -> Result<(), ListenerError> {
        self.listeners.add(listener)
    }

    pub fn remove_listener(&mut self, listener: &(dyn SwitchListener + 'l)) -> bool {
        self.listeners.remove(listener)
    }

    /// Sets the value programmatically. A released lever jumps to the rest
    /// angle of the value.
    pub fn set_value(&mut self, on: bool) -> Option<SwitchEvent> {
        let event = self.switch(on);
        if !self.grab.is_held() {
            self.angle = self.config.range.rest_angle(self.value);
            self.angle_velocity = 0.0;
            self.settling = false;
            self.show();
        }
        event
    }

    pub fn grab_start(&mut self, controller: ControllerId) {
        log::debug!("hinge lever grabbed by {:?}", controller);
        self.grab.begin(controller);
        self.settling = false;
    }

    /// Releases the lever; it then settles toward the rest angle of its value
    /// through [`update_released`](Self::update_released).
    pub fn grab_end(&mut self, controller: ControllerId) -> bool {
        let released = self.grab.end(controller);
        if released {
            log::debug!("hinge lever released by {:?}, value {}", controller, self.value);
            self.settling = true;
        }
        released
    }

    /// Per-tick update while grabbed. Returns the switch event, if the value
    /// flipped this tick.
    pub fn update(&mut self, pose: &ControllerPose, dt: f32) -> Option<SwitchEvent> {
        if !self.grab.is_held() {
            return None;
        }

        let Some(look) = (pose.position - self.config.pivot).flatten_x().try_normalize() else {
            log::trace!("hinge lever look direction degenerate, holding {}", self.angle);
            return None;
        };

        let range = self.config.range;
        let look_angle = range.clamp(libm::atan2f(look.z, look.y).to_degrees());

        let (mut off_distance, mut on_distance) = range.distances(look_angle);
        if self.value {
            on_distance *= 1.0 - LEVER_DEAD_ZONE;
        } else {
            off_distance *= 1.0 - LEVER_DEAD_ZONE;
        }

        self.angle = smooth_damp(self.angle, look_angle, &mut self.angle_velocity, self.config.smooth_time, dt);
        self.show();

        self.switch(on_distance < off_distance)
    }

    /// Per-tick update while released: eases the handle to its rest angle.
    pub fn update_released(&mut self, dt: f32) {
        if self.grab.is_held() || !self.settling {
            return;
        }

        let target = self.config.range.rest_angle(self.value);
        self.angle = smooth_damp(self.angle, target, &mut self.angle_velocity, self.config.smooth_time, dt);

        if (self.angle - target).abs() < SETTLE_TOLERANCE {
            self.angle = target;
            self.angle_velocity = 0.0;
            self.settling = false;
        }
        self.show();
    }

    fn switch(&mut self, on: bool) -> Option<SwitchEvent> {
        if self.value == on {
            return None;
        }

        self.value = on;
        let event = if on {
            SwitchEvent::Activated
        } else {
            SwitchEvent::Deactivated
        };
        log::debug!("hinge lever {:?}", event);
        self.listeners.notify(event);
        Some(event)
    }

    fn show(&self) {
        if let Some(handle) = self.handle {
            handle.set_orientation(self.angle);
            handle.set_position(self.handle_position());
        }
    }
}

impl core::fmt::Debug for LeverHinge<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LeverHinge")
            .field("config", &self.config)
            .field("value", &self.value)
            .field("angle", &self.angle)
            .field("grab", &self.grab)
            .field("listeners", &self.listeners)
            .finish()
    }
}
