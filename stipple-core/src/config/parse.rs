//! Simple TOML parser for plotter configuration
//!
//! This is a minimal parser that handles only the subset needed for the
//! plotter configuration. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - `[section]` headers (`geometry`, `marker`, `homing`, `paper`,
//!   `control`, `timeouts`)
//! - `key = value` pairs with integer values (`_` separators allowed)
//! - Comments (`# ...`), including trailing comments
//!
//! Keys that are absent keep their default value. Unknown sections or keys
//! are rejected so a typo never silently falls back to a default.

use super::types::{ConfigIssue, PlotterConfig};

/// Configuration errors
///
/// Line numbers are one-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Unknown or malformed section header
    InvalidSection { line: u32 },
    /// Line is not a `key = value` pair
    InvalidLine { line: u32 },
    /// Key not recognized in the current section
    UnknownKey { line: u32 },
    /// Value is not an integer or does not fit the field
    InvalidValue { line: u32 },
    /// Parsed configuration failed validation
    Invalid(ConfigIssue),
}

impl From<ConfigIssue> for ConfigError {
    fn from(issue: ConfigIssue) -> Self {
        ConfigError::Invalid(issue)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Geometry,
    Marker,
    Homing,
    Paper,
    Control,
    Timeouts,
}

/// Parse TOML configuration into a validated [`PlotterConfig`]
pub fn parse_config(input: &str) -> Result<PlotterConfig, ConfigError> {
    let mut config = PlotterConfig::default();
    let mut section = Section::Root;

    for (index, raw) in input.lines().enumerate() {
        let line_no = index as u32 + 1;
        let line = strip_comment(raw).trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') {
            if !line.ends_with(']') {
                return Err(ConfigError::InvalidSection { line: line_no });
            }
            section = parse_section_header(&line[1..line.len() - 1])
                .ok_or(ConfigError::InvalidSection { line: line_no })?;
            continue;
        }

        let (key, value) =
            parse_key_value(line).ok_or(ConfigError::InvalidLine { line: line_no })?;
        let value = parse_int(value).ok_or(ConfigError::InvalidValue { line: line_no })?;
        apply_value(&mut config, section, key, value, line_no)?;
    }

    config.validate()?;
    Ok(config)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_section_header(header: &str) -> Option<Section> {
    match header.trim() {
        "geometry" => Some(Section::Geometry),
        "marker" => Some(Section::Marker),
        "homing" => Some(Section::Homing),
        "paper" => Some(Section::Paper),
        "control" => Some(Section::Control),
        "timeouts" => Some(Section::Timeouts),
        _ => None,
    }
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a signed decimal integer, allowing `_` digit separators
fn parse_int(value: &str) -> Option<i64> {
    let (negative, digits) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };

    if digits.is_empty() || digits.starts_with('_') || digits.ends_with('_') {
        return None;
    }

    let mut result: i64 = 0;
    for c in digits.chars() {
        if c == '_' {
            continue;
        }
        let digit = c.to_digit(10)? as i64;
        result = result.checked_mul(10)?.checked_add(digit)?;
    }

    Some(if negative { -result } else { result })
}

fn set<T: TryFrom<i64>>(field: &mut T, value: i64, line: u32) -> Result<(), ConfigError> {
    *field = T::try_from(value).map_err(|_| ConfigError::InvalidValue { line })?;
    Ok(())
}

fn apply_value(
    config: &mut PlotterConfig,
    section: Section,
    key: &str,
    value: i64,
    line: u32,
) -> Result<(), ConfigError> {
    let c = config;
    match (section, key) {
        (Section::Geometry, "pixel_pitch_um") => set(&mut c.pixel_pitch_um, value, line),
        (Section::Geometry, "carriage_deg_per_mm_x1000") => {
            set(&mut c.carriage_deg_per_mm_x1000, value, line)
        }
        (Section::Geometry, "feed_deg_per_mm_x1000") => {
            set(&mut c.feed_deg_per_mm_x1000, value, line)
        }
        (Section::Geometry, "max_columns") => set(&mut c.max_columns, value, line),

        (Section::Marker, "depth_deg") => set(&mut c.marker_depth_deg, value, line),
        (Section::Marker, "print_power") => set(&mut c.print_power, value, line),
        (Section::Marker, "travel_power") => set(&mut c.travel_power, value, line),
        (Section::Marker, "row_return_power") => set(&mut c.row_return_power, value, line),
        (Section::Marker, "setup_home_power") => set(&mut c.setup_home_power, value, line),
        (Section::Marker, "clearance_px") => set(&mut c.carriage_clearance_px, value, line),
        (Section::Marker, "row_feed_um") => set(&mut c.row_feed_um, value, line),
        (Section::Marker, "feed_power") => set(&mut c.feed_power, value, line),

        (Section::Homing, "power") => set(&mut c.homing_power, value, line),
        (Section::Homing, "interval_ms") => set(&mut c.homing_interval_ms, value, line),
        (Section::Homing, "min_change_deg") => set(&mut c.homing_min_change_deg, value, line),
        (Section::Homing, "descent_deg") => set(&mut c.homing_descent_deg, value, line),
        (Section::Homing, "settle_ms") => set(&mut c.settle_ms, value, line),

        (Section::Paper, "threshold") => set(&mut c.paper_threshold, value, line),
        (Section::Paper, "load_power") => set(&mut c.paper_load_power, value, line),
        (Section::Paper, "backoff_deg") => set(&mut c.paper_backoff_deg, value, line),
        (Section::Paper, "settle_ms") => set(&mut c.paper_settle_ms, value, line),
        (Section::Paper, "eject_power") => set(&mut c.eject_power, value, line),
        (Section::Paper, "eject_run_on_ms") => set(&mut c.eject_run_on_ms, value, line),

        (Section::Control, "pause_poll_ms") => set(&mut c.pause_poll_ms, value, line),
        (Section::Control, "abort_hold_ms") => set(&mut c.abort_hold_ms, value, line),

        (Section::Timeouts, "move_ms") => set(&mut c.move_timeout_ms, value, line),
        (Section::Timeouts, "switch_ms") => set(&mut c.switch_timeout_ms, value, line),
        (Section::Timeouts, "homing_ms") => set(&mut c.homing_timeout_ms, value, line),
        (Section::Timeouts, "paper_ms") => set(&mut c.paper_timeout_ms, value, line),

        _ => Err(ConfigError::UnknownKey { line }),
    }
}
