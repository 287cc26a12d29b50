//! Paper handling
//!
//! The reflectance sensor sits under the paper path. It reads at or below
//! `paper_threshold` while paper covers it.

use crate::config::PlotterConfig;
use crate::error::PlotError;
use crate::motion::{home_carriage, reset_top, wait_until};
use crate::traits::{ActuatorId, Actuators, Clock, Sensors};

const FEED: ActuatorId = ActuatorId::Feed;

fn paper_present<H: Sensors>(hw: &mut H, config: &PlotterConfig) -> bool {
    hw.reflectance() <= config.paper_threshold
}

/// Advance freshly inserted paper to the print start position
///
/// Feeds slowly until the paper edge clears the sensor, lets the roller
/// settle, then backs off `paper_backoff_deg`.
pub fn load_paper<H>(hw: &mut H, config: &PlotterConfig) -> Result<(), PlotError>
where
    H: Actuators + Sensors + Clock,
{
    let power = config.paper_load_power;

    hw.set_power(FEED, power);
    wait_until(hw, FEED, config.paper_timeout_ms, |hw| {
        !paper_present(hw, config)
    })?;
    hw.set_power(FEED, 0);
    hw.delay_ms(config.paper_settle_ms);

    hw.reset_displacement(FEED);
    hw.set_power(FEED, -power);
    let backoff = config.paper_backoff_deg;
    wait_until(hw, FEED, config.paper_timeout_ms, |hw| {
        hw.displacement(FEED).abs() >= backoff
    })?;
    hw.set_power(FEED, 0);

    info!("paper loaded");
    Ok(())
}

/// Drive the paper out of the machine
pub fn eject_paper<H>(hw: &mut H, config: &PlotterConfig) -> Result<(), PlotError>
where
    H: Actuators + Sensors + Clock,
{
    hw.set_power(FEED, config.eject_power);
    wait_until(hw, FEED, config.paper_timeout_ms, |hw| {
        paper_present(hw, config)
    })?;
    hw.delay_ms(config.eject_run_on_ms);
    hw.set_power(FEED, 0);

    info!("paper ejected");
    Ok(())
}

/// Park the plotter after a session and hand the paper back
pub fn finish<H>(hw: &mut H, config: &PlotterConfig) -> Result<(), PlotError>
where
    H: Actuators + Sensors + Clock,
{
    reset_top(hw, config, config.homing_power)?;
    home_carriage(hw, config, config.setup_home_power)?;
    eject_paper(hw, config)
}
