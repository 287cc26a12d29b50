//! Configuration type definitions
//!
//! Every calibrated constant of the plotter lives in [`PlotterConfig`].
//! The defaults are the values measured on the reference machine.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::raster::MAX_COLUMNS;
use crate::traits::MAX_POWER;

/// Configuration validation problems
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigIssue {
    /// A power setting is zero; the wait loop using it could never finish
    ZeroPower,
    /// A power setting is outside -100..=100
    PowerOutOfRange,
    /// A calibration factor or pixel pitch is zero
    ZeroCalibration,
    /// `max_columns` is zero or larger than the row buffer capacity
    ColumnLimit,
    /// The homing sample interval is zero
    ZeroInterval,
    /// The homing descent or marker depth is not positive
    NonPositiveDepth,
    /// The homing stall threshold is not positive, so a stop is never seen
    NonPositiveStallThreshold,
}

/// Complete plotter configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlotterConfig {
    // Geometry and calibration
    /// Width of one pixel on paper (µm)
    pub pixel_pitch_um: u32,
    /// Carriage encoder degrees per mm of travel (× 1000)
    pub carriage_deg_per_mm_x1000: u32,
    /// Feed roller encoder degrees per mm of paper (× 1000)
    pub feed_deg_per_mm_x1000: u32,
    /// Widest image accepted (columns)
    pub max_columns: u16,

    // Marker and carriage
    /// Initial marker stroke depth (degrees below printing height)
    pub marker_depth_deg: i32,
    /// Power for marker strokes and the one-pixel advance after a mark
    pub print_power: i16,
    /// Power for travel across blank runs
    pub travel_power: i16,
    /// Power for the carriage return to the limit switch after each row
    pub row_return_power: i16,
    /// Power for carriage homing outside of printing
    pub setup_home_power: i16,
    /// Distance the carriage backs off the limit switch (pixels)
    pub carriage_clearance_px: u16,
    /// Paper feed per printed row (µm)
    pub row_feed_um: u32,
    /// Power for the per-row paper feed
    pub feed_power: i16,

    // Vertical homing
    /// Lift power while seeking the top stop and descending
    pub homing_power: i16,
    /// Sampling interval for stop detection (ms)
    pub homing_interval_ms: u32,
    /// Minimum movement per interval that still counts as moving (degrees)
    pub homing_min_change_deg: i32,
    /// Descent from the top stop to printing height (degrees)
    pub homing_descent_deg: i32,
    /// Settle time between homing and zeroing the lifts (ms)
    pub settle_ms: u32,

    // Paper handling
    /// Reflectance at or below which the sensor sees paper (%)
    pub paper_threshold: u8,
    /// Feed power while loading paper
    pub paper_load_power: i16,
    /// Back-off from the sensor edge to the first printable row (degrees)
    pub paper_backoff_deg: i32,
    /// Settle time after the sensor edge before backing off (ms)
    pub paper_settle_ms: u32,
    /// Feed power while ejecting (negative = backwards)
    pub eject_power: i16,
    /// How long the feed keeps running after the sensor edge on eject (ms)
    pub eject_run_on_ms: u32,

    // Operator controls
    /// Poll period of the pause screen (ms)
    pub pause_poll_ms: u32,
    /// Hold time after an abort before reporting it (ms)
    pub abort_hold_ms: u32,

    // Wait-loop bounds (0 = unbounded)
    /// Carriage translate, marker stroke and paper feed (ms)
    pub move_timeout_ms: u32,
    /// Carriage travel to the limit switch (ms)
    pub switch_timeout_ms: u32,
    /// Each vertical homing phase (ms)
    pub homing_timeout_ms: u32,
    /// Paper load and eject (ms)
    pub paper_timeout_ms: u32,
}

impl Default for PlotterConfig {
    fn default() -> Self {
        Self {
            pixel_pitch_um: 1000,
            // 180 / (π × 10 mm wheel) ≈ 5.730 deg/mm
            carriage_deg_per_mm_x1000: 5730,
            // 180 / (π × 12 mm roller) ≈ 4.775 deg/mm
            feed_deg_per_mm_x1000: 4775,
            max_columns: MAX_COLUMNS as u16,

            marker_depth_deg: 43,
            print_power: 35,
            travel_power: 30,
            row_return_power: -35,
            setup_home_power: -25,
            carriage_clearance_px: 12,
            row_feed_um: 571,
            feed_power: 20,

            homing_power: 10,
            homing_interval_ms: 150,
            homing_min_change_deg: 1,
            homing_descent_deg: 185,
            settle_ms: 1000,

            paper_threshold: 0,
            paper_load_power: 5,
            paper_backoff_deg: 58,
            paper_settle_ms: 500,
            eject_power: -100,
            eject_run_on_ms: 1000,

            pause_poll_ms: 20,
            abort_hold_ms: 2000,

            move_timeout_ms: 10_000,
            switch_timeout_ms: 20_000,
            homing_timeout_ms: 30_000,
            paper_timeout_ms: 15_000,
        }
    }
}

impl PlotterConfig {
    /// Check the configuration for values that would hang or misbehave
    pub fn validate(&self) -> Result<(), ConfigIssue> {
        let powers = [
            self.print_power,
            self.travel_power,
            self.row_return_power,
            self.setup_home_power,
            self.feed_power,
            self.homing_power,
            self.paper_load_power,
            self.eject_power,
        ];
        for power in powers {
            if power == 0 {
                return Err(ConfigIssue::ZeroPower);
            }
            if power.abs() > MAX_POWER {
                return Err(ConfigIssue::PowerOutOfRange);
            }
        }

        if self.pixel_pitch_um == 0
            || self.carriage_deg_per_mm_x1000 == 0
            || self.feed_deg_per_mm_x1000 == 0
        {
            return Err(ConfigIssue::ZeroCalibration);
        }

        if self.max_columns == 0 || self.max_columns as usize > MAX_COLUMNS {
            return Err(ConfigIssue::ColumnLimit);
        }

        if self.homing_interval_ms == 0 {
            return Err(ConfigIssue::ZeroInterval);
        }

        if self.homing_descent_deg <= 0 || self.marker_depth_deg <= 0 {
            return Err(ConfigIssue::NonPositiveDepth);
        }

        if self.homing_min_change_deg <= 0 {
            return Err(ConfigIssue::NonPositiveStallThreshold);
        }

        Ok(())
    }

    /// Carriage encoder degrees for a travel of `pixels` (truncated)
    pub fn carriage_degrees(&self, pixels: u16) -> i32 {
        let micro = pixels as u64 * self.pixel_pitch_um as u64;
        (micro * self.carriage_deg_per_mm_x1000 as u64 / 1_000_000) as i32
    }

    /// Feed encoder degrees for `distance_um` of paper (rounded up)
    pub fn feed_degrees(&self, distance_um: u32) -> i32 {
        let scaled = distance_um as u64 * self.feed_deg_per_mm_x1000 as u64;
        scaled.div_ceil(1_000_000) as i32
    }

    /// Power used for the return stroke of the marker (1.5 × print power)
    pub fn lift_power(&self, power: i16) -> i16 {
        crate::traits::clamp_power(power as i32 * 3 / 2)
    }
}
