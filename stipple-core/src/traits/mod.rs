//! Hardware abstraction traits
//!
//! These traits define the interface between the print logic and the
//! hardware-specific implementations (motor drivers, sensors, buttons).
//! The core never touches a pin directly.

pub mod actuator;
pub mod clock;
pub mod display;
pub mod input;
pub mod sensor;

pub use actuator::{clamp_power, ActuatorId, Actuators, MAX_POWER};
pub use clock::Clock;
pub use display::{format_elapsed, Status, StatusDisplay};
pub use input::{Button, OperatorInput};
pub use sensor::Sensors;

/// Everything the plotter mechanics need: motors, sensors and time
pub trait Machine: Actuators + Sensors + Clock {}

impl<T: Actuators + Sensors + Clock> Machine for T {}

/// Everything the operator-facing controls need
pub trait Console: OperatorInput + StatusDisplay + Clock {}

impl<T: OperatorInput + StatusDisplay + Clock> Console for T {}

/// A complete plotter: mechanics plus operator console
pub trait PlotterHardware: Machine + OperatorInput + StatusDisplay {}

impl<T: Machine + OperatorInput + StatusDisplay> PlotterHardware for T {}
