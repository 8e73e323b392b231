//! Grab lifecycle.
//!
//! The host's interaction system reports select enter/exit edges. A widget
//! follows exactly one controller at a time; edges are idempotent so a
//! repeated or stray callback cannot corrupt the tracking state.

/// Host-assigned identity of an interacting controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControllerId(pub u32);

/// Which controller, if any, currently holds the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrabState {
    /// Not held; per-tick updates are ignored.
    Released,

    /// Held by `controller`.
    Held { controller: ControllerId },
}

impl Default for GrabState {
    fn default() -> Self {
        Self::Released
    }
}

impl GrabState {
    pub fn is_held(&self) -> bool {
        matches!(self, GrabState::Held { .. })
    }

    pub fn controller(&self) -> Option<ControllerId> {
        match self {
            GrabState::Held { controller } => Some(*controller),
            GrabState::Released => None,
        }
    }

    /// Takes hold with `controller`. Grabbing while already held switches to
    /// the new controller; the caller re-initializes tracking either way.
    pub fn begin(&mut self, controller: ControllerId) {
        *self = GrabState::Held { controller };
    }

    /// Lets go if `controller` is the one holding the widget.
    ///
    /// Returns `true` when this call released the grab. Releases from other
    /// controllers, or while already released, are ignored.
    pub fn end(&mut self, controller: ControllerId) -> bool {
        match self {
            GrabState::Held { controller: held } if *held == controller => {
                *self = GrabState::Released;
                true
            }
            _ => false,
        }
    }
}
