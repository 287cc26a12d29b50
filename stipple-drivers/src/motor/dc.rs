//! DC motor driver with encoder feedback
//!
//! Drives an H-bridge with a PWM output for magnitude and a direction pin
//! for sign. Displacement comes from an encoder counter kept elsewhere
//! (an interrupt, a PIO block, another core); the driver only remembers
//! where it was last zeroed.
//!
//! ```ignore
//! let mut motor = DcMotor::new(pwm, dir_pin, encoder, DcMotorConfig::default());
//! motor.set_power(-35);
//! while motor.displacement().abs() < 43 {}
//! motor.set_power(0);
//! ```

use embedded_hal::digital::{OutputPin, PinState};
use embedded_hal::pwm::SetDutyCycle;

use stipple_core::traits::{clamp_power, MAX_POWER};

/// Source of an accumulated encoder count
pub trait EncoderCount {
    /// Read the raw count (degrees, signed, free-running)
    fn count(&mut self) -> i32;
}

/// DC motor driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DcMotorConfig {
    /// Minimum duty cycle percentage (below this the motor won't start)
    pub min_duty: u8,
    /// Swap the direction pin so positive power matches the mechanics
    pub reversed: bool,
    /// Negate encoder counts to match `reversed`
    pub encoder_reversed: bool,
}

impl Default for DcMotorConfig {
    fn default() -> Self {
        Self {
            min_duty: 15,
            reversed: false,
            encoder_reversed: false,
        }
    }
}

/// A DC motor on an H-bridge with an encoder
pub struct DcMotor<P, D, E> {
    pwm: P,
    dir: D,
    encoder: E,
    config: DcMotorConfig,
    power: i16,
    zero: i32,
    fault: bool,
}

impl<P, D, E> DcMotor<P, D, E>
where
    P: SetDutyCycle,
    D: OutputPin,
    E: EncoderCount,
{
    /// Create a motor driver, stopped, with its counter zeroed
    pub fn new(pwm: P, dir: D, encoder: E, config: DcMotorConfig) -> Self {
        let mut motor = Self {
            pwm,
            dir,
            encoder,
            config,
            power: 0,
            zero: 0,
            fault: false,
        };
        motor.set_power(0);
        motor.reset_displacement();
        motor
    }

    pub fn config(&self) -> &DcMotorConfig {
        &self.config
    }

    /// Drive at a signed power (-100..=100)
    ///
    /// A pin or PWM error latches the fault flag and the motor keeps its
    /// previous output; the commanded power is still recorded. Callers find
    /// out through [`has_fault`](Self::has_fault).
    pub fn set_power(&mut self, power: i16) {
        let power = clamp_power(power as i32);
        self.power = power;

        let forward = (power >= 0) != self.config.reversed;
        if self.dir.set_state(PinState::from(forward)).is_err() {
            self.fault = true;
        }

        let duty = self.scale_duty(power.unsigned_abs() as u8);
        if self.pwm.set_duty_cycle_percent(duty).is_err() {
            self.fault = true;
        }
    }

    /// Last commanded power
    pub fn power(&self) -> i16 {
        self.power
    }

    /// Degrees moved since the last reset
    pub fn displacement(&mut self) -> i32 {
        self.raw_count().wrapping_sub(self.zero)
    }

    /// Make the current position the new zero
    pub fn reset_displacement(&mut self) {
        self.zero = self.raw_count();
    }

    /// Check if a pin or PWM write has failed
    pub fn has_fault(&self) -> bool {
        self.fault
    }

    /// Clear the fault flag
    pub fn clear_fault(&mut self) {
        self.fault = false;
    }

    fn raw_count(&mut self) -> i32 {
        let count = self.encoder.count();
        if self.config.encoder_reversed {
            count.wrapping_neg()
        } else {
            count
        }
    }

    /// Scale a power magnitude to a duty cycle
    ///
    /// Maps 1-100 onto min_duty-100 so the smallest non-zero power still
    /// overcomes static friction; 0 stays off.
    fn scale_duty(&self, magnitude: u8) -> u8 {
        if magnitude == 0 {
            0
        } else {
            let min = self.config.min_duty as u32;
            let range = 100 - min;
            let scaled = min + (magnitude as u32 * range / MAX_POWER as u32);
            scaled.min(100) as u8
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use core::cell::Cell;
    use core::convert::Infallible;

    pub struct FakePwm {
        pub percent: u8,
        pub fail: bool,
    }

    #[derive(Debug)]
    pub struct PwmFault;

    impl embedded_hal::pwm::Error for PwmFault {
        fn kind(&self) -> embedded_hal::pwm::ErrorKind {
            embedded_hal::pwm::ErrorKind::Other
        }
    }

    impl embedded_hal::pwm::ErrorType for FakePwm {
        type Error = PwmFault;
    }

    impl SetDutyCycle for FakePwm {
        fn max_duty_cycle(&self) -> u16 {
            100
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), PwmFault> {
            if self.fail {
                return Err(PwmFault);
            }
            self.percent = duty as u8;
            Ok(())
        }
    }

    pub struct FakeDir {
        pub high: bool,
    }

    impl embedded_hal::digital::ErrorType for FakeDir {
        type Error = Infallible;
    }

    impl OutputPin for FakeDir {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high = true;
            Ok(())
        }
    }

    pub struct FakeEncoder<'a>(pub &'a Cell<i32>);

    impl EncoderCount for FakeEncoder<'_> {
        fn count(&mut self) -> i32 {
            self.0.get()
        }
    }

    pub type FakeMotor<'a> = DcMotor<FakePwm, FakeDir, FakeEncoder<'a>>;

    pub fn motor(counter: &Cell<i32>, config: DcMotorConfig) -> FakeMotor<'_> {
        build(counter, config, false)
    }

    pub fn failing_motor(counter: &Cell<i32>) -> FakeMotor<'_> {
        build(counter, DcMotorConfig::default(), true)
    }

    /// Duty cycle the fake PWM is currently driving
    pub fn duty(motor: &FakeMotor<'_>) -> u8 {
        motor.pwm.percent
    }

    /// Make every later PWM write fail
    pub fn break_pwm(motor: &mut FakeMotor<'_>) {
        motor.pwm.fail = true;
    }

    fn build(counter: &Cell<i32>, config: DcMotorConfig, fail: bool) -> FakeMotor<'_> {
        DcMotor::new(
            FakePwm { percent: 77, fail },
            FakeDir { high: false },
            FakeEncoder(counter),
            config,
        )
    }

    #[test]
    fn test_starts_stopped() {
        let counter = Cell::new(500);
        let mut m = motor(&counter, DcMotorConfig::default());
        assert_eq!(m.power(), 0);
        assert_eq!(m.pwm.percent, 0);
        assert_eq!(m.displacement(), 0);
    }

    #[test]
    fn test_direction_follows_sign() {
        let counter = Cell::new(0);
        let mut m = motor(&counter, DcMotorConfig::default());

        m.set_power(35);
        assert!(m.dir.high);
        m.set_power(-35);
        assert!(!m.dir.high);

        let mut r = motor(
            &counter,
            DcMotorConfig {
                reversed: true,
                ..Default::default()
            },
        );
        r.set_power(35);
        assert!(!r.dir.high);
    }

    #[test]
    fn test_duty_scaling() {
        let counter = Cell::new(0);
        let mut m = motor(
            &counter,
            DcMotorConfig {
                min_duty: 20,
                ..Default::default()
            },
        );

        m.set_power(100);
        assert_eq!(m.pwm.percent, 100);
        // 20 + (50% of 80)
        m.set_power(-50);
        assert_eq!(m.pwm.percent, 60);
        m.set_power(0);
        assert_eq!(m.pwm.percent, 0);
    }

    #[test]
    fn test_power_is_clamped() {
        let counter = Cell::new(0);
        let mut m = motor(&counter, DcMotorConfig::default());
        m.set_power(-150);
        assert_eq!(m.power(), -100);
        assert_eq!(m.pwm.percent, 100);
    }

    #[test]
    fn test_displacement_relative_to_zero() {
        let counter = Cell::new(1000);
        let mut m = motor(&counter, DcMotorConfig::default());

        counter.set(1043);
        assert_eq!(m.displacement(), 43);

        m.reset_displacement();
        counter.set(990);
        assert_eq!(m.displacement(), -53);
    }

    #[test]
    fn test_reversed_encoder() {
        let counter = Cell::new(0);
        let mut m = motor(
            &counter,
            DcMotorConfig {
                encoder_reversed: true,
                ..Default::default()
            },
        );
        counter.set(-20);
        assert_eq!(m.displacement(), 20);
    }

    #[test]
    fn test_pwm_failure_latches_fault() {
        let counter = Cell::new(0);
        let mut m = motor(&counter, DcMotorConfig::default());
        m.pwm.fail = true;

        m.set_power(30);
        assert!(m.has_fault());
        assert_eq!(m.power(), 30);

        m.clear_fault();
        assert!(!m.has_fault());
    }
}
