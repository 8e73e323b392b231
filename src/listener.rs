//! Observer traits and a bounded listener registry.
//!
//! Widgets never own host objects. They hold shared references to whatever
//! the host registers and call into them synchronously during an update, so
//! implementations use interior mutability (`Cell`, `RefCell`) when they need
//! to record something.

use heapless::Vec;

/// Maximum listeners per widget registry.
pub const MAX_LISTENERS: usize = 8;

/// Receives a knob's normalized value whenever it changes.
pub trait ValueListener {
    fn on_value_changed(&self, value: f32);
}

/// Lever activation edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchEvent {
    /// The lever flipped to its on position.
    Activated,
    /// The lever flipped to its off position.
    Deactivated,
}

/// Receives a lever's activation edges.
pub trait SwitchListener {
    fn on_switch(&self, event: SwitchEvent);
}

/// The visual handle a widget rotates.
pub trait Handle {
    /// Applies a single-axis rotation in degrees about the widget's spin axis.
    fn set_orientation(&self, angle_degrees: f32);

    /// Moves the handle, in the widget's local frame. Only levers that swing
    /// their handle around a pivot call this.
    fn set_position(&self, _position: crate::math::Vec3) {}
}

impl<F: Fn(f32)> ValueListener for F {
    fn on_value_changed(&self, value: f32) {
        self(value)
    }
}

/// Listener registration failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerError {
    /// The registry already holds [`MAX_LISTENERS`] entries.
    Full,
}

impl core::fmt::Display for ListenerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ListenerError::Full => write!(f, "listener registry is full ({} entries)", MAX_LISTENERS),
        }
    }
}

/// Ordered set of listener references.
///
/// Listeners are notified in registration order. Identity is by address, so
/// registering the same object twice is a no-op.
pub struct ListenerSet<'l, L: ?Sized> {
    entries: Vec<&'l L, MAX_LISTENERS>,
}

impl<'l, L: ?Sized> ListenerSet<'l, L> {
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, listener: &L) -> bool {
        self.entries
            .iter()
            .any(|entry| core::ptr::addr_eq(*entry as *const L, listener as *const L))
    }

    pub fn add(&mut self, listener: &'l L) -> Result<(), ListenerError> {
        if self.contains(listener) {
            return Ok(());
        }
        self.entries.push(listener).map_err(|_| ListenerError::Full)
    }

    /// Returns `true` if the listener was registered.
    pub fn remove(&mut self, listener: &L) -> bool {
        let position = self
            .entries
            .iter()
            .position(|entry| core::ptr::addr_eq(*entry as *const L, listener as *const L));

        match position {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'l L> + '_ {
        self.entries.iter().copied()
    }
}

impl<'l, L: ?Sized> Default for ListenerSet<'l, L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'l, L: ?Sized> core::fmt::Debug for ListenerSet<'l, L> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListenerSet").field("len", &self.len()).finish()
    }
}

impl<'l, 'a> ListenerSet<'l, dyn ValueListener + 'a> {
    pub fn notify(&self, value: f32) {
        for listener in self.iter() {
            listener.on_value_changed(value);
        }
    }
}

impl<'l, 'a> ListenerSet<'l, dyn SwitchListener + 'a> {
    pub fn notify(&self, event: SwitchEvent) {
        for listener in self.iter() {
            listener.on_switch(event);
        }
    }
}
