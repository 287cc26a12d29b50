//! Bounded waits
//!
//! The plotter has no interrupts in its motion path: every primitive
//! drives a motor and polls until a condition holds. These helpers add the
//! termination contract. When the bound is exceeded, or a motor driver
//! reports a fault, every actuator is stopped before the error is
//! returned; nothing is retried.

use crate::error::PlotError;
use crate::traits::{ActuatorId, Actuators, Clock};

/// A point in time after which a wait gives up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Deadline {
    start_ms: u64,
    timeout_ms: u32,
}

impl Deadline {
    /// Start a deadline `timeout_ms` from now (0 = never expires)
    pub fn start<C: Clock>(clock: &mut C, timeout_ms: u32) -> Self {
        Self {
            start_ms: clock.now_ms(),
            timeout_ms,
        }
    }

    /// Check whether the deadline has passed
    pub fn expired<C: Clock>(&self, clock: &mut C) -> bool {
        self.timeout_ms != 0 && clock.elapsed_ms(self.start_ms) > self.timeout_ms as u64
    }
}

/// Fail with [`PlotError::ActuatorFault`] if any driver has faulted
///
/// Every actuator is commanded off first, so the healthy ones stop even if
/// the faulted one cannot.
pub fn check_fault<H: Actuators>(hw: &mut H) -> Result<(), PlotError> {
    match hw.fault() {
        Some(actuator) => {
            hw.stop_all();
            error!("{} driver fault", actuator);
            Err(PlotError::ActuatorFault(actuator))
        }
        None => Ok(()),
    }
}

/// Poll until `pending` reports that no actuator is still outstanding
///
/// `pending` returns the actuator that has not yet reached its goal, or
/// `None` when the wait is over. On timeout all actuators are stopped and
/// the last outstanding actuator is reported. A driver fault ends the wait
/// immediately.
pub fn wait_for<H, F>(hw: &mut H, timeout_ms: u32, mut pending: F) -> Result<(), PlotError>
where
    H: Actuators + Clock,
    F: FnMut(&mut H) -> Option<ActuatorId>,
{
    let deadline = Deadline::start(hw, timeout_ms);
    loop {
        check_fault(hw)?;
        let Some(actuator) = pending(hw) else {
            return Ok(());
        };
        if deadline.expired(hw) {
            hw.stop_all();
            error!("{} did not reach its target within {} ms", actuator, timeout_ms);
            return Err(PlotError::ActuatorTimeout(actuator));
        }
    }
}

/// Poll until `done` holds, blaming `actuator` on timeout
pub fn wait_until<H, F>(
    hw: &mut H,
    actuator: ActuatorId,
    timeout_ms: u32,
    mut done: F,
) -> Result<(), PlotError>
where
    H: Actuators + Clock,
    F: FnMut(&mut H) -> bool,
{
    wait_for(hw, timeout_ms, |hw| if done(hw) { None } else { Some(actuator) })
}
