//! Sensor implementations
//!
//! - [`TouchSwitch`]: carriage limit switch
//! - [`ReflectanceSensor`]: paper detection

pub mod reflectance;
pub mod touch;

pub use reflectance::{AdcReader, ReflectanceCalibration, ReflectanceSensor};
pub use touch::TouchSwitch;

use embedded_hal::digital::InputPin;
use stipple_core::traits::Sensors;

/// The plotter's limit switch and reflectance sensor together
pub struct PlotterSensors<P, ADC> {
    pub limit: TouchSwitch<P>,
    pub reflectance: ReflectanceSensor<ADC>,
}

impl<P: InputPin, ADC: AdcReader> PlotterSensors<P, ADC> {
    pub fn new(limit: TouchSwitch<P>, reflectance: ReflectanceSensor<ADC>) -> Self {
        Self { limit, reflectance }
    }
}

impl<P: InputPin, ADC: AdcReader> Sensors for PlotterSensors<P, ADC> {
    fn limit_switch_pressed(&mut self) -> bool {
        self.limit.is_pressed()
    }

    fn reflectance(&mut self) -> u8 {
        self.reflectance.percent()
    }
}
