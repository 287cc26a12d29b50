//! Reflected-light sensor
//!
//! A photodiode under the paper path read through an ADC. Readings are
//! mapped linearly from two calibration points onto 0-100 %, the scale
//! the core's paper thresholds use.

/// ADC reading trait for platform abstraction
pub trait AdcReader {
    /// Read ADC value (12-bit, 0-4095)
    #[allow(clippy::result_unit_err)]
    fn read(&mut self) -> Result<u16, ()>;
}

/// Calibration points for the reflectance scale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReflectanceCalibration {
    /// Raw reading that maps to 0 %
    pub dark_raw: u16,
    /// Raw reading that maps to 100 %
    pub bright_raw: u16,
}

impl Default for ReflectanceCalibration {
    fn default() -> Self {
        Self {
            dark_raw: 200,
            bright_raw: 3800,
        }
    }
}

/// Reflectance sensor on an ADC channel
pub struct ReflectanceSensor<ADC> {
    adc: ADC,
    calibration: ReflectanceCalibration,
    /// Last good reading, reported when the ADC fails
    last_percent: u8,
}

impl<ADC: AdcReader> ReflectanceSensor<ADC> {
    pub fn new(adc: ADC, calibration: ReflectanceCalibration) -> Self {
        Self {
            adc,
            calibration,
            last_percent: 0,
        }
    }

    /// Read reflectance in percent
    pub fn percent(&mut self) -> u8 {
        if let Ok(raw) = self.adc.read() {
            self.last_percent = Self::raw_to_percent(&self.calibration, raw);
        }
        self.last_percent
    }

    /// Convert a raw reading to percent
    ///
    /// Works for either orientation of the calibration points; readings
    /// beyond them clamp to 0 or 100.
    pub fn raw_to_percent(calibration: &ReflectanceCalibration, raw: u16) -> u8 {
        let dark = calibration.dark_raw as i32;
        let bright = calibration.bright_raw as i32;
        let span = bright - dark;
        if span == 0 {
            return 0;
        }
        let percent = (raw as i32 - dark) * 100 / span;
        percent.clamp(0, 100) as u8
    }
}
