use crate::config::{ConfigError, KnobConfig};
use crate::filters::EmaFilter;
use crate::grab::{ControllerId, GrabState};
use crate::listener::{Handle, ListenerError, ListenerSet, ValueListener};
use crate::math::{Quat, Vec3};
use crate::pose::{ControllerPose, TrackingSample};
use crate::selector::RotationModeSelector;
use crate::state::KnobState;

/// A rotary knob driven by a grabbing controller.
///
/// The host forwards grab edges and, while grabbed, one controller pose per
/// tick. The knob rotates its [`Handle`] about the local Y axis and notifies
/// its [`ValueListener`]s when the normalized value changes.
pub struct Knob<'l> {
    config: KnobConfig,
    state: KnobState,
    grab: GrabState,
    filter: EmaFilter,
    handle: Option<&'l dyn Handle>,
    listeners: ListenerSet<'l, dyn ValueListener + 'l>,
}

impl<'l> Knob<'l> {
    pub fn new(config: KnobConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let config = config.sanitized();

        let mut state = KnobState::default();
        state.set_value(config.value, &config);
        state.rotation = state.rotation_for_value(&config);

        Ok(Self {
            config,
            state,
            grab: GrabState::default(),
            filter: EmaFilter::new(),
            handle: None,
            listeners: ListenerSet::new(),
        })
    }

    pub fn config(&self) -> &KnobConfig {
        &self.config
    }

    /// Replaces the configuration live.
    ///
    /// `config.value` is only read at construction; the current value is
    /// re-clamped and re-quantized under the new configuration instead.
    pub fn set_config(&mut self, config: KnobConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config.sanitized();

        let value = self.state.value;
        self.apply_value(value);
        Ok(())
    }

    pub fn state(&self) -> &KnobState {
        &self.state
    }

    pub fn value(&self) -> f32 {
        self.state.value
    }

    /// Handle rotation in degrees about the local Y axis.
    pub fn rotation(&self) -> f32 {
        self.state.rotation
    }

    /// Handle rotation as a quaternion in the knob's local frame.
    pub fn handle_rotation(&self) -> Quat {
        Quat::from_axis_angle(Vec3::Y, self.state.rotation)
    }

    /// Sets the value programmatically, rotating the handle to match.
    ///
    /// Returns `true` when the value changed.
    pub fn set_value(&mut self, value: f32) -> bool {
        self.apply_value(value)
    }

    pub fn is_grabbed(&self) -> bool {
        self.grab.is_held()
    }

    pub fn controller(&self) -> Option<ControllerId> {
        self.grab.controller()
    }

    pub fn is_position_driven(&self) -> bool {
        self.state.selector.is_position_driven()
    }

    pub fn is_up_vector_driven(&self) -> bool {
        self.state.selector.is_up_vector_driven()
    }

    pub fn selector(&self) -> &RotationModeSelector {
        &self.state.selector
    }

    /// Attaches the visual handle and shows the current rotation on it.
    pub fn attach_handle(&mut self, handle: &'l dyn Handle) {
        handle.set_orientation(self.state.rotation);
        self.handle = Some(handle);
    }

    pub fn detach_handle(&mut self) {
        self.handle = None;
    }

    pub fn has_handle(&self) -> bool {
        self.handle.is_some()
    }

    pub fn add_listener(&mut self, listener: &'l dyn ValueListener) -> Result<(), ListenerError> {
        self.listeners.add(listener)
    }

    /// Returns `true` if the listener was registered.
    pub fn remove_listener(&mut self, listener: &(dyn ValueListener + 'l)) -> bool {
        self.listeners.remove(listener)
    }

    /// Grab-start edge.
    ///
    /// Clears all accumulated angles, takes the current value as the zero
    /// reference and immediately tracks `pose` as a fresh read. Calling it
    /// again while grabbed re-initializes the session.
    pub fn grab_start(&mut self, controller: ControllerId, pose: &ControllerPose) -> Option<f32> {
        log::debug!("knob grabbed by {:?} at value {}", controller, self.state.value);

        self.grab.begin(controller);
        self.filter.reset();
        self.state.begin_grab(&self.config);
        self.track(pose, 0.0, true)
    }

    /// Grab-end edge. Accumulated angles are kept until the next grab start.
    ///
    /// Returns `true` when `controller` was holding the knob.
    pub fn grab_end(&mut self, controller: ControllerId) -> bool {
        let released = self.grab.end(controller);
        if released {
            log::debug!("knob released by {:?} at value {}", controller, self.state.value);
        }
        released
    }

    /// Per-tick update with the holding controller's pose, `dt` seconds after
    /// the previous one.
    ///
    /// Returns the new value when it changed. Does nothing while released.
    pub fn update(&mut self, pose: &ControllerPose, dt: f32) -> Option<f32> {
        if !self.grab.is_held() {
            return None;
        }
        self.track(pose, dt, false)
    }

    fn track(&mut self, pose: &ControllerPose, dt: f32, fresh: bool) -> Option<f32> {
        let position = self.config.smoothing.apply(&mut self.filter, pose.position, dt);
        let smoothed = ControllerPose { position, ..*pose };
        let sample = TrackingSample::from_pose(&smoothed, self.config.hub_offset);

        let tracked_radius = self
            .config
            .tracks_position()
            .then_some(self.config.position_tracked_radius);
        self.state.selector.track(&sample, tracked_radius, fresh);

        let raw = self
            .state
            .selector
            .combined_rotation(self.state.base_rotation, self.config.twist_sensitivity);
        if !raw.is_finite() {
            log::trace!("knob rotation not finite, holding {}", self.state.rotation);
            return None;
        }

        let rotation = self.state.apply_rotation(raw, &self.config);
        if let Some(handle) = self.handle {
            handle.set_orientation(rotation);
        }

        let value = KnobState::value_for_rotation(rotation, &self.config)?;
        let changed = self.state.set_value(value, &self.config);
        log::trace!("knob rotation {} value {}", rotation, self.state.value);

        if changed {
            self.publish();
            Some(self.state.value)
        } else {
            None
        }
    }

    /// Stores a value, rotates the handle to it and publishes a change.
    fn apply_value(&mut self, value: f32) -> bool {
        let changed = self.state.set_value(value, &self.config);
        self.state.rotation = self.state.rotation_for_value(&self.config);

        if let Some(handle) = self.handle {
            handle.set_orientation(self.state.rotation);
        }
        if changed {
            self.publish();
        }
        changed
    }

    fn publish(&self) {
        // Without a handle the knob is not live yet; the value is kept but not broadcast
        if self.handle.is_none() || self.listeners.is_empty() {
            return;
        }
        self.listeners.notify(self.state.value);
    }
}

impl core::fmt::Debug for Knob<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Knob")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("grab", &self.grab)
            .field("has_handle", &self.handle.is_some())
            .field("listeners", &self.listeners)
            .finish()
    }
}
