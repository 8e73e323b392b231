/// Controller position smoothing
///
/// Hand tracking jitters by a few millimetres every tick. Near the hub that is
/// enough to swing the position-driven angle, so the sampled position can be
/// smoothed before tracking. Smoothing is scaled by elapsed time.
mod ema;

pub use ema::EmaFilter;

/// Position smoothing configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PoseSmoothing {
    /// Raw samples are used as-is
    None,

    /// Exponential smoothing: each tick moves `1 - e^(-rate * dt)` of the way
    /// toward the new sample. Higher rate = more responsive. A rate of 9.48
    /// matches a fixed 0.1 blend per frame at 90 Hz.
    /// Requires: rate > 0.0
    Exponential { rate: f32 },
}

impl Default for PoseSmoothing {
    fn default() -> Self {
        Self::None
    }
}

impl PoseSmoothing {
    pub const fn validate(&self) -> Result<(), &'static str> {
        match self {
            PoseSmoothing::None => Ok(()),

            PoseSmoothing::Exponential { rate } => {
                if !rate.is_finite() || *rate <= 0.0 {
                    return Err("Exponential smoothing rate must be finite and > 0.0");
                }
                Ok(())
            }
        }
    }

    /// Runs `position` through `filter` according to this setting.
    pub fn apply(&self, filter: &mut EmaFilter, position: crate::math::Vec3, dt: f32) -> crate::math::Vec3 {
        match self {
            PoseSmoothing::None => position,
            PoseSmoothing::Exponential { rate } => filter.apply(position, *rate, dt),
        }
    }
}
