//! Vertical homing
//!
//! The lift has no limit switch. Instead both lift motors are driven
//! slowly upward until neither encoder changes over a sampling interval,
//! which means both racks are against their mechanical stops. Each side is
//! judged only by its own movement, so the two racks may start several
//! teeth apart and still both end up at the top.

use super::primitives::{home_carriage, set_lifts};
use super::wait::{check_fault, wait_until, Deadline};
use crate::config::PlotterConfig;
use crate::error::PlotError;
use crate::traits::{ActuatorId, Actuators, Clock, Sensors};

/// Lift used to measure the descent to printing height
pub const REFERENCE_LIFT: ActuatorId = ActuatorId::RightLift;

/// Raise both lifts to their top stops, then lower them to printing height
///
/// Phase one samples both encoders every `homing_interval_ms` and keeps
/// going while either side still moved at least `homing_min_change_deg`.
/// Phase two lowers both lifts at `speed` until the reference lift has
/// descended `homing_descent_deg`.
///
/// A side that is jammed shows no movement and so ends phase one early;
/// that cannot be told apart from a side at its stop.
pub fn reset_top<H>(hw: &mut H, config: &PlotterConfig, speed: i16) -> Result<(), PlotError>
where
    H: Actuators + Clock,
{
    let [left, right] = ActuatorId::LIFTS;
    let threshold = config.homing_min_change_deg;

    debug!("homing lifts at {}", speed);
    set_lifts(hw, speed.abs());

    let deadline = Deadline::start(hw, config.homing_timeout_ms);
    let mut samples: u32 = 0;
    loop {
        check_fault(hw)?;
        hw.reset_displacement(left);
        hw.reset_displacement(right);
        hw.delay_ms(config.homing_interval_ms);
        samples += 1;

        let left_moved = hw.displacement(left).abs() >= threshold;
        let right_moved = hw.displacement(right).abs() >= threshold;
        trace!("homing sample {}: left {} right {}", samples, left_moved, right_moved);

        if !left_moved && !right_moved {
            break;
        }
        if deadline.expired(hw) {
            hw.stop_all();
            let culprit = if left_moved { left } else { right };
            error!("lifts still moving after {} samples", samples);
            return Err(PlotError::ActuatorTimeout(culprit));
        }
    }
    set_lifts(hw, 0);

    hw.reset_displacement(REFERENCE_LIFT);
    set_lifts(hw, -speed.abs());
    let descent = config.homing_descent_deg;
    wait_until(hw, REFERENCE_LIFT, config.homing_timeout_ms, |hw| {
        hw.displacement(REFERENCE_LIFT) <= -descent
    })?;
    set_lifts(hw, 0);

    info!("lifts homed after {} samples", samples);
    Ok(())
}

/// Bring the plotter to its printing start position
///
/// Homes the lifts, lets them settle, zeroes both lift counters so marker
/// strokes are measured from printing height, then homes the carriage.
pub fn prepare<H>(hw: &mut H, config: &PlotterConfig) -> Result<(), PlotError>
where
    H: Actuators + Sensors + Clock,
{
    reset_top(hw, config, config.homing_power)?;
    hw.delay_ms(config.settle_ms);
    for lift in ActuatorId::LIFTS {
        hw.reset_displacement(lift);
    }
    home_carriage(hw, config, config.setup_home_power)
}
