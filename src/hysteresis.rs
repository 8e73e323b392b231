//! Dead-zone latches for tracking mode switches.
//!
//! A latch turns a continuous signal into a binary mode. The signal is scaled
//! by a dead-zone factor that depends on the current mode before it is
//! compared against the threshold, so entering and leaving happen at
//! different points and a signal hovering at the threshold does not toggle.

/// Dead zone shared by the knob's mode switches.
pub const MODE_SWITCH_DEAD_ZONE: f32 = 0.1;

/// Cosine of ~45°: controller forward tilt above which twist is read from
/// the up vector.
pub const UP_VECTOR_THRESHOLD: f32 = 0.707;

/// Latch shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModeHysteresis {
    /// Signal is boosted by `(1 + dead_zone)` while engaged, unscaled
    /// otherwise. Engages at `signal >= threshold`.
    Sticky { threshold: f32, dead_zone: f32 },

    /// Signal is attenuated by `(1 - dead_zone / 2)` while disengaged and
    /// boosted by `(1 + dead_zone / 2)` while engaged. Engages at
    /// `signal > threshold`.
    Balanced { threshold: f32, dead_zone: f32 },
}

/// Latch output for one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Newly engaged, or engaged on a fresh read.
    Engaged,
    /// Was engaged and stays engaged.
    Held,
    /// Newly disengaged, or disengaged on a fresh read.
    Released,
    /// Was disengaged and stays disengaged.
    Idle,
}

impl Transition {
    /// Whether the latch is engaged after this sample.
    pub fn is_engaged(self) -> bool {
        matches!(self, Transition::Engaged | Transition::Held)
    }

    /// Whether this sample changed mode (or was a fresh read).
    pub fn is_edge(self) -> bool {
        matches!(self, Transition::Engaged | Transition::Released)
    }
}

/// Latch state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModeLatch {
    pub engaged: bool,
}

impl ModeHysteresis {
    /// Knob position tracking: sticky around the tracked radius.
    pub const fn position(radius: f32) -> Self {
        ModeHysteresis::Sticky {
            threshold: radius,
            dead_zone: MODE_SWITCH_DEAD_ZONE,
        }
    }

    /// Knob up/forward selection: balanced around 45° of tilt.
    pub const fn up_vector() -> Self {
        ModeHysteresis::Balanced {
            threshold: UP_VECTOR_THRESHOLD,
            dead_zone: MODE_SWITCH_DEAD_ZONE,
        }
    }

    /// Feeds one sample through the latch.
    ///
    /// A `fresh` sample skips the dead-zone scaling and always reports an
    /// edge, so callers rebase whatever depends on the mode.
    pub fn apply(&self, signal: f32, state: &mut ModeLatch, fresh: bool) -> Transition {
        let was_engaged = state.engaged;

        let engaged = match *self {
            ModeHysteresis::Sticky { threshold, dead_zone } => {
                let scaled = if was_engaged && !fresh {
                    signal * (1.0 + dead_zone)
                } else {
                    signal
                };
                scaled >= threshold
            }

            ModeHysteresis::Balanced { threshold, dead_zone } => {
                let scaled = if fresh {
                    signal
                } else if was_engaged {
                    signal * (1.0 + dead_zone * 0.5)
                } else {
                    signal * (1.0 - dead_zone * 0.5)
                };
                scaled > threshold
            }
        };

        state.engaged = engaged;

        match (engaged, was_engaged && !fresh, !was_engaged && !fresh) {
            (true, true, _) => Transition::Held,
            (true, false, _) => Transition::Engaged,
            (false, _, true) => Transition::Idle,
            (false, _, false) => Transition::Released,
        }
    }

    /// Signal level at which a disengaged latch engages.
    pub fn entry_level(&self) -> f32 {
        match *self {
            ModeHysteresis::Sticky { threshold, .. } => threshold,
            ModeHysteresis::Balanced { threshold, dead_zone } => threshold / (1.0 - dead_zone * 0.5),
        }
    }

    /// Signal level below which an engaged latch releases.
    pub fn exit_level(&self) -> f32 {
        match *self {
            ModeHysteresis::Sticky { threshold, dead_zone } => threshold / (1.0 + dead_zone),
            ModeHysteresis::Balanced { threshold, dead_zone } => threshold / (1.0 + dead_zone * 0.5),
        }
    }
}
