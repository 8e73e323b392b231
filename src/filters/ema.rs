use crate::math::{Vec3, exp_blend};

/// Exponential smoothing state for a tracked position
#[derive(Debug, Clone, Copy)]
pub struct EmaFilter {
    previous: Vec3,
    initialized: bool,
}

impl EmaFilter {
    /// Create new filter with uninitialized state
    pub const fn new() -> Self {
        Self {
            previous: Vec3::ZERO,
            initialized: false,
        }
    }

    /// Moves the smoothed position toward `input` by `1 - e^(-rate * dt)`.
    ///
    /// First call initializes the filter to the input value.
    pub fn apply(&mut self, input: Vec3, rate: f32, dt: f32) -> Vec3 {
        debug_assert!(rate > 0.0, "smoothing rate must be > 0.0, got {}", rate);

        if !self.initialized || !self.previous.is_finite() {
            self.previous = input;
            self.initialized = true;
            return input;
        }

        let output = self.previous.lerp(input, exp_blend(rate, dt));
        self.previous = output;
        output
    }

    /// Reset filter state
    pub fn reset(&mut self) {
        self.initialized = false;
        self.previous = Vec3::ZERO;
    }
}

impl Default for EmaFilter {
    fn default() -> Self {
        Self::new()
    }
}
