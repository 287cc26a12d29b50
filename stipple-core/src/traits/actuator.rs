//! Actuator trait
//!
//! The plotter has four DC motors with encoder feedback. Each is driven by
//! a signed power and reports an accumulated displacement in encoder
//! degrees since its counter was last reset.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest power magnitude an actuator accepts
pub const MAX_POWER: i16 = 100;

/// Actuator identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ActuatorId {
    /// Left vertical lift (positive power raises the marker)
    LeftLift,
    /// Horizontal carriage (positive power moves away from the limit switch)
    Carriage,
    /// Paper feed roller (positive power feeds paper forward)
    Feed,
    /// Right vertical lift, the reference side for homing
    RightLift,
}

impl ActuatorId {
    /// All actuators, in index order
    pub const ALL: [ActuatorId; 4] = [
        ActuatorId::LeftLift,
        ActuatorId::Carriage,
        ActuatorId::Feed,
        ActuatorId::RightLift,
    ];

    /// The two synchronized lift actuators
    pub const LIFTS: [ActuatorId; 2] = [ActuatorId::LeftLift, ActuatorId::RightLift];

    /// Stable index (0-3) for array-backed implementations
    pub const fn index(self) -> usize {
        match self {
            ActuatorId::LeftLift => 0,
            ActuatorId::Carriage => 1,
            ActuatorId::Feed => 2,
            ActuatorId::RightLift => 3,
        }
    }
}

/// Clamp a computed power into the accepted range
pub fn clamp_power(power: i32) -> i16 {
    power.clamp(-(MAX_POWER as i32), MAX_POWER as i32) as i16
}

/// Trait for the plotter's motor bank
///
/// Implementations own the motors and their encoder counters.
pub trait Actuators {
    /// Drive an actuator at a signed power (-100..=100, 0 = stop)
    fn set_power(&mut self, id: ActuatorId, power: i16);

    /// Get the last commanded power
    fn power(&self, id: ActuatorId) -> i16;

    /// Read the displacement accumulated since the last reset (degrees)
    fn displacement(&mut self, id: ActuatorId) -> i32;

    /// Zero the displacement counter
    fn reset_displacement(&mut self, id: ActuatorId);

    /// First actuator whose driver failed to apply a command
    ///
    /// A faulted actuator may still be running whatever its last
    /// successful command was, so its commanded power cannot be trusted.
    fn fault(&self) -> Option<ActuatorId> {
        None
    }

    /// Command zero power on every actuator
    fn stop_all(&mut self) {
        for id in ActuatorId::ALL {
            self.set_power(id, 0);
        }
    }

    /// Check that every actuator is commanded to zero power and no driver
    /// has faulted
    fn all_stopped(&self) -> bool {
        self.fault().is_none() && ActuatorId::ALL.iter().all(|&id| self.power(id) == 0)
    }
}
