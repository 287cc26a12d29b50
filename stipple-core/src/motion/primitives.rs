//! Motion primitives
//!
//! Each primitive zeroes the relevant encoder counter, drives the motor
//! and polls the counter until the target is reached, then stops. The sign
//! of the power picks the direction; targets are always compared by
//! magnitude so the primitives behave the same both ways.

use super::wait::{wait_for, wait_until};
use crate::config::PlotterConfig;
use crate::error::PlotError;
use crate::traits::{ActuatorId, Actuators, Clock, Sensors};

/// Move the carriage by `pixels` pixel widths
///
/// Caller invariant: `power` is non-zero. A zero-length move returns
/// without touching the motor.
pub fn translate_carriage<H>(
    hw: &mut H,
    config: &PlotterConfig,
    pixels: u16,
    power: i16,
) -> Result<(), PlotError>
where
    H: Actuators + Clock,
{
    let target = config.carriage_degrees(pixels);
    if target == 0 {
        return Ok(());
    }

    trace!("carriage: {} px ({} deg) at {}", pixels, target, power);
    drive_until_displaced(hw, ActuatorId::Carriage, target, power, config.move_timeout_ms)
}

/// Touch the marker to the paper and bring it back up
///
/// Both lifts go down at `-power` until each has travelled `depth`
/// degrees, then come up at 1.5 × `power` until each is back at or above
/// its starting height. The two sides are polled independently so one
/// finishing early never cuts the other short.
pub fn stroke_marker<H>(
    hw: &mut H,
    config: &PlotterConfig,
    depth: i32,
    power: i16,
) -> Result<(), PlotError>
where
    H: Actuators + Clock,
{
    if depth <= 0 {
        warn!("stroke depth {} is not below the paper, skipping", depth);
        return Ok(());
    }

    let [left, right] = ActuatorId::LIFTS;

    set_lifts(hw, -power);
    wait_for(hw, config.move_timeout_ms, |hw| {
        if hw.displacement(left).abs() < depth {
            Some(left)
        } else if hw.displacement(right).abs() < depth {
            Some(right)
        } else {
            None
        }
    })?;

    set_lifts(hw, config.lift_power(power));
    wait_for(hw, config.move_timeout_ms, |hw| {
        if hw.displacement(left) < 0 {
            Some(left)
        } else if hw.displacement(right) < 0 {
            Some(right)
        } else {
            None
        }
    })?;

    set_lifts(hw, 0);
    Ok(())
}

/// Feed the paper forward by `distance_um`
///
/// Only forward feeds are meaningful; the target is rounded up so a
/// fraction of a degree still moves the paper.
pub fn feed_paper<H>(
    hw: &mut H,
    config: &PlotterConfig,
    distance_um: u32,
    power: i16,
) -> Result<(), PlotError>
where
    H: Actuators + Clock,
{
    let target = config.feed_degrees(distance_um);
    if target == 0 {
        return Ok(());
    }

    trace!("feed: {} um ({} deg) at {}", distance_um, target, power);
    drive_until_displaced(hw, ActuatorId::Feed, target, power, config.move_timeout_ms)
}

/// Drive the carriage into the limit switch, then back off to clear it
///
/// This defines the carriage zero reference: the carriage ends
/// `carriage_clearance_px` pixels from the switch, on the far side of
/// `power`'s direction.
pub fn home_carriage<H>(hw: &mut H, config: &PlotterConfig, power: i16) -> Result<(), PlotError>
where
    H: Actuators + Sensors + Clock,
{
    hw.set_power(ActuatorId::Carriage, power);
    wait_until(hw, ActuatorId::Carriage, config.switch_timeout_ms, |hw| {
        hw.limit_switch_pressed()
    })?;
    hw.set_power(ActuatorId::Carriage, 0);

    translate_carriage(hw, config, config.carriage_clearance_px, -power)?;
    debug!("carriage homed");
    Ok(())
}

pub(crate) fn set_lifts<H: Actuators>(hw: &mut H, power: i16) {
    for lift in ActuatorId::LIFTS {
        hw.set_power(lift, power);
    }
}

fn drive_until_displaced<H>(
    hw: &mut H,
    actuator: ActuatorId,
    target: i32,
    power: i16,
    timeout_ms: u32,
) -> Result<(), PlotError>
where
    H: Actuators + Clock,
{
    hw.reset_displacement(actuator);
    hw.set_power(actuator, power);
    wait_until(hw, actuator, timeout_ms, |hw| {
        hw.displacement(actuator).abs() >= target
    })?;
    hw.set_power(actuator, 0);
    Ok(())
}
