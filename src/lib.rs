#![no_std]

mod config;
mod state;
mod knob;
pub mod math;
pub mod angle;
pub mod hysteresis;
pub mod pose;
pub mod selector;
pub mod steps;
pub mod filters;
pub mod grab;
pub mod listener;
pub mod gizmo;

#[cfg(feature = "lever")]
pub mod lever;

#[cfg(feature = "hinge")]
pub mod motor;

pub use config::{ConfigError, KnobConfig};
pub use state::KnobState;
pub use knob::Knob;
pub use math::{Frame, Quat, Vec3};
pub use angle::{AngleAccumulator, shortest_angle_distance};
pub use hysteresis::{ModeHysteresis, ModeLatch, Transition};
pub use pose::{ControllerPose, TrackingSample};
pub use selector::RotationModeSelector;
pub use steps::AngleSteps;
pub use filters::PoseSmoothing;
pub use grab::{ControllerId, GrabState};
pub use listener::{Handle, ListenerError, SwitchEvent, SwitchListener, ValueListener};

#[cfg(feature = "lever")]
pub use lever::{LeverHinge, LeverHingeConfig, LeverRange, TwistLever, TwistLeverConfig};

#[cfg(feature = "hinge")]
pub use motor::{HingeMotor, MotorCommand, MotorConfig};
