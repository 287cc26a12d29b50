//! Motor driver implementations
//!
//! - [`DcMotor`]: PWM + direction H-bridge motor with encoder feedback
//! - [`MotorBank`]: the plotter's four motors behind the core
//!   [`Actuators`] trait

pub mod dc;

pub use dc::{DcMotor, DcMotorConfig, EncoderCount};

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;
use stipple_core::traits::{ActuatorId, Actuators};

/// The four plotter motors, indexed by [`ActuatorId`]
pub struct MotorBank<P, D, E> {
    motors: [DcMotor<P, D, E>; 4],
}

impl<P, D, E> MotorBank<P, D, E>
where
    P: SetDutyCycle,
    D: OutputPin,
    E: EncoderCount,
{
    /// Create a bank from motors wired in [`ActuatorId::ALL`] order
    pub fn new(motors: [DcMotor<P, D, E>; 4]) -> Self {
        Self { motors }
    }

    pub fn motor(&self, id: ActuatorId) -> &DcMotor<P, D, E> {
        &self.motors[id.index()]
    }

    pub fn motor_mut(&mut self, id: ActuatorId) -> &mut DcMotor<P, D, E> {
        &mut self.motors[id.index()]
    }
}

impl<P, D, E> Actuators for MotorBank<P, D, E>
where
    P: SetDutyCycle,
    D: OutputPin,
    E: EncoderCount,
{
    fn set_power(&mut self, id: ActuatorId, power: i16) {
        self.motors[id.index()].set_power(power);
    }

    fn power(&self, id: ActuatorId) -> i16 {
        self.motors[id.index()].power()
    }

    fn displacement(&mut self, id: ActuatorId) -> i32 {
        self.motors[id.index()].displacement()
    }

    fn reset_displacement(&mut self, id: ActuatorId) {
        self.motors[id.index()].reset_displacement();
    }

    fn fault(&self) -> Option<ActuatorId> {
        ActuatorId::ALL
            .into_iter()
            .find(|&id| self.motors[id.index()].has_fault())
    }
}
