//! Board composition
//!
//! Bundles the motor bank, sensors, operator input, clock and status
//! output into one value that implements every hardware trait the core's
//! [`Plotter`](stipple_core::engine::Plotter) needs.

use stipple_core::traits::{
    ActuatorId, Actuators, Button, Clock, OperatorInput, Sensors, Status, StatusDisplay,
};

/// A complete plotter board
pub struct Board<M, S, B, C, D> {
    pub motors: M,
    pub sensors: S,
    pub buttons: B,
    pub clock: C,
    pub display: D,
}

impl<M, S, B, C, D> Board<M, S, B, C, D> {
    pub fn new(motors: M, sensors: S, buttons: B, clock: C, display: D) -> Self {
        Self {
            motors,
            sensors,
            buttons,
            clock,
            display,
        }
    }
}

impl<M: Actuators, S, B, C, D> Actuators for Board<M, S, B, C, D> {
    fn set_power(&mut self, id: ActuatorId, power: i16) {
        self.motors.set_power(id, power);
    }

    fn power(&self, id: ActuatorId) -> i16 {
        self.motors.power(id)
    }

    fn displacement(&mut self, id: ActuatorId) -> i32 {
        self.motors.displacement(id)
    }

    fn reset_displacement(&mut self, id: ActuatorId) {
        self.motors.reset_displacement(id);
    }

    fn fault(&self) -> Option<ActuatorId> {
        self.motors.fault()
    }

    fn stop_all(&mut self) {
        self.motors.stop_all();
    }
}

impl<M, S: Sensors, B, C, D> Sensors for Board<M, S, B, C, D> {
    fn limit_switch_pressed(&mut self) -> bool {
        self.sensors.limit_switch_pressed()
    }

    fn reflectance(&mut self) -> u8 {
        self.sensors.reflectance()
    }
}

impl<M, S, B: OperatorInput, C, D> OperatorInput for Board<M, S, B, C, D> {
    fn take_press(&mut self, button: Button) -> bool {
        self.buttons.take_press(button)
    }

    fn clear_presses(&mut self) {
        self.buttons.clear_presses();
    }
}

impl<M, S, B, C: Clock, D> Clock for Board<M, S, B, C, D> {
    fn now_ms(&mut self) -> u64 {
        self.clock.now_ms()
    }

    fn delay_ms(&mut self, ms: u32) {
        self.clock.delay_ms(ms);
    }
}

impl<M, S, B, C, D: StatusDisplay> StatusDisplay for Board<M, S, B, C, D> {
    fn show(&mut self, status: Status) {
        self.display.show(status);
    }
}
