//! Sensor trait

/// The plotter's two sensors
pub trait Sensors {
    /// Check whether the carriage limit switch is pressed
    fn limit_switch_pressed(&mut self) -> bool;

    /// Read the paper reflectance sensor (0-100 %)
    fn reflectance(&mut self) -> u8;
}
