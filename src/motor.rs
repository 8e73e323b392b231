//! Hinge motor toggling.
//!
//! Physically simulated knobs sit on a host hinge joint. While the knob is
//! held the joint's motor is engaged so the knob resists and follows the hand;
//! on release the motor is let go and the knob spins freely. The host applies
//! the returned [`MotorCommand`]s to its joint.

use crate::config::ConfigError;
use crate::grab::{ControllerId, GrabState};

/// Motor drive applied while grabbed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotorConfig {
    /// Target angular velocity, degrees per second.
    pub target_velocity: f32,
    /// Maximum force the motor may apply.
    pub force: f32,
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self {
            target_velocity: 100.0,
            force: 100.0,
        }
    }
}

impl MotorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.target_velocity.is_finite() || !self.force.is_finite() || self.force < 0.0 {
            return Err(ConfigError::InvalidMotor);
        }
        Ok(())
    }
}

/// Instruction for the host's hinge joint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotorCommand {
    Engage { target_velocity: f32, force: f32 },
    Release,
}

/// Grab-driven motor switch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HingeMotor {
    config: MotorConfig,
    grab: GrabState,
}

impl HingeMotor {
    pub fn new(config: MotorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            grab: GrabState::default(),
        })
    }

    pub fn config(&self) -> &MotorConfig {
        &self.config
    }

    pub fn is_engaged(&self) -> bool {
        self.grab.is_held()
    }

    /// Engages the motor. `None` when it was already engaged; a second
    /// controller taking over does not re-send the drive.
    pub fn grab_start(&mut self, controller: ControllerId) -> Option<MotorCommand> {
        let was_engaged = self.grab.is_held();
        self.grab.begin(controller);
        if was_engaged {
            return None;
        }

        log::debug!("hinge motor engaged by {:?}", controller);
        Some(MotorCommand::Engage {
            target_velocity: self.config.target_velocity,
            force: self.config.force,
        })
    }

    /// Releases the motor when `controller` was the one holding it.
    pub fn grab_end(&mut self, controller: ControllerId) -> Option<MotorCommand> {
        if !self.grab.end(controller) {
            return None;
        }

        log::debug!("hinge motor released by {:?}", controller);
        Some(MotorCommand::Release)
    }
}

impl Default for HingeMotor {
    fn default() -> Self {
        Self {
            config: MotorConfig::default(),
            grab: GrabState::default(),
        }
    }
}
