use super::LeverRange;
use crate::config::ConfigError;
use crate::grab::{ControllerId, GrabState};
use crate::listener::{Handle, ListenerError, ListenerSet, SwitchEvent, SwitchListener};
use crate::math::{Vec3, exp_blend, inverse_lerp, lerp, smooth_damp};
use crate::pose::ControllerPose;

/// Damping speed range, picked by how far the hand has moved since the grab.
const MIN_DAMPING_SPEED: f32 = 2.0;
const MAX_DAMPING_SPEED: f32 = 10.0;

/// Seconds the damping speed takes to follow the hand.
const DAMPING_SMOOTH_TIME: f32 = 0.1;

const REST_TOLERANCE: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwistLeverConfig {
    /// Initial value.
    pub value: bool,
    pub range: LeverRange,
    /// Initial easing speed (1/s).
    pub damping_speed: f32,
    /// The lever ignores the controller until it has moved this far from
    /// where it grabbed.
    pub activation_distance: f32,
    /// Snap the handle to the rest angle when the value flips while released.
    pub lock_to_value: bool,
    /// Ease back to the rest angle after release.
    pub return_to_rest: bool,
}

impl Default for TwistLeverConfig {
    fn default() -> Self {
        Self {
            value: false,
            range: LeverRange::default(),
            damping_speed: 5.0,
            activation_distance: 0.1,
            lock_to_value: false,
            return_to_rest: false,
        }
    }
}

impl TwistLeverConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.range.validate()?;

        if !(self.damping_speed > 0.0) || !self.damping_speed.is_finite() {
            return Err(ConfigError::InvalidDampingSpeed);
        }

        if !(self.activation_distance >= 0.0) || !self.activation_distance.is_finite() {
            return Err(ConfigError::InvalidDistance);
        }

        Ok(())
    }
}

/// A lever turned by rolling the controller about the local Z axis.
pub struct TwistLever<'l> {
    config: TwistLeverConfig,
    value: bool,
    angle: f32,
    damping_speed: f32,
    damping_velocity: f32,
    grab_origin: Option<Vec3>,
    returning: bool,
    grab: GrabState,
    handle: Option<&'l dyn Handle>,
    listeners: ListenerSet<'l, dyn SwitchListener + 'l>,
}

impl<'l> TwistLever<'l> {
    pub fn new(config: TwistLeverConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            value: config.value,
            angle: config.range.rest_angle(config.value),
            damping_speed: config.damping_speed,
            damping_velocity: 0.0,
            grab_origin: None,
            returning: false,
            grab: GrabState::default(),
            handle: None,
            listeners: ListenerSet::new(),
            config,
        })
    }

    pub fn config(&self) -> &TwistLeverConfig {
        &self.config
    }

    pub fn value(&self) -> bool {
        self.value
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Current easing speed (1/s).
    pub fn damping_speed(&self) -> f32 {
        self.damping_speed
    }

    pub fn is_grabbed(&self) -> bool {
        self.grab.is_held()
    }

    pub fn is_returning(&self) -> bool {
        self.returning
    }

    pub fn attach_handle(&mut self, handle: &'l dyn Handle) {
        handle.set_orientation(self.angle);
        self.handle = Some(handle);
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

    /// Sets the value programmatically and shows its rest angle.
    pub fn set_value(&mut self, on: bool) -> Option<SwitchEvent> {
        self.switch(on, true)
    }

    /// Grab-start edge; `pose` is the controller's pose at the moment of grab.
    pub fn grab_start(&mut self, controller: ControllerId, pose: &ControllerPose) {
        log::debug!("twist lever grabbed by {:?}", controller);
        self.grab.begin(controller);
        self.grab_origin = Some(pose.position);
        self.returning = false;
    }

    pub fn grab_end(&mut self, controller: ControllerId) -> bool {
        let released = self.grab.end(controller);
        if released {
            log::debug!("twist lever released by {:?}, value {}", controller, self.value);
            self.grab_origin = None;
            self.returning = self.config.return_to_rest;
        }
        released
    }

    /// Per-tick update while grabbed. Returns the switch event, if the value
    /// flipped this tick.
    pub fn update(&mut self, pose: &ControllerPose, dt: f32) -> Option<SwitchEvent> {
        let origin = match (self.grab.is_held(), self.grab_origin) {
            (true, Some(origin)) => origin,
            _ => return None,
        };

        let moved = pose.position.distance(origin);
        if !(moved > self.config.activation_distance) {
            return None;
        }

        // Roll about Z: the up axis leaning toward -X is a positive angle
        if !pose.up.x.is_finite() || !pose.up.y.is_finite() || (pose.up.x == 0.0 && pose.up.y == 0.0) {
            log::trace!("twist lever roll undefined, holding {}", self.angle);
            return None;
        }
        let roll = libm::atan2f(-pose.up.x, pose.up.y).to_degrees();
        let target = self.config.range.clamp(roll);

        let target_speed = lerp(MIN_DAMPING_SPEED, MAX_DAMPING_SPEED, inverse_lerp(0.0, 1.0, moved));
        self.damping_speed = smooth_damp(
            self.damping_speed,
            target_speed,
            &mut self.damping_velocity,
            DAMPING_SMOOTH_TIME,
            dt,
        );

        self.angle += (target - self.angle) * exp_blend(self.damping_speed, dt);
        self.show();

        let (off_distance, on_distance) = self.config.range.distances(self.angle);
        self.switch(on_distance < off_distance, false)
    }

    /// Per-tick update while released: eases back to the rest angle when
    /// `return_to_rest` is set.
    pub fn update_released(&mut self, dt: f32) {
        if self.grab.is_held() || !self.returning {
            return;
        }

        let target = self.config.range.rest_angle(self.value);
        self.angle += (target - self.angle) * exp_blend(self.damping_speed, dt);

        if (self.angle - target).abs() < REST_TOLERANCE {
            self.angle = target;
            self.returning = false;
        }
        self.show();
    }

    fn switch(&mut self, on: bool, force_rotation: bool) -> Option<SwitchEvent> {
        if self.value == on {
            if force_rotation {
                self.rest();
            }
            return None;
        }

        self.value = on;
        let event = if on {
            SwitchEvent::Activated
        } else {
            SwitchEvent::Deactivated
        };
        log::debug!("twist lever {:?}", event);
        self.listeners.notify(event);

        if !self.grab.is_held() && (self.config.lock_to_value || force_rotation) {
            self.rest();
        }
        Some(event)
    }

    fn rest(&mut self) {
        self.angle = self.config.range.rest_angle(self.value);
        self.returning = false;
        self.show();
    }

    fn show(&self) {
        if let Some(handle) = self.handle {
            handle.set_orientation(self.angle);
        }
    }
}

impl core::fmt::Debug for TwistLever<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TwistLever")
            .field("config", &self.config)
            .field("value", &self.value)
            .field("angle", &self.angle)
            .field("grab", &self.grab)
            .field("listeners", &self.listeners)
            .finish()
    }
}
