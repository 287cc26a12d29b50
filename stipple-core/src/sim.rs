//! Host-side plotter simulation for unit tests
//!
//! `SimPlotter` models the four motors as integrators on a 1 ms tick:
//! a motor at power `p` moves `p / 10` degrees per millisecond. Every
//! clock read advances one tick, so a polling loop always makes progress.
//!
//! `RecordingHead` skips the physics entirely and records the motion
//! primitives the print engine asks for.

use std::vec::Vec;

use crate::engine::PrintHead;
use crate::error::PlotError;
use crate::traits::{
    ActuatorId, Actuators, Button, Clock, OperatorInput, Sensors, Status, StatusDisplay,
};

/// Absolute lift position of the mechanical top stop
pub const LIFT_TOP: i32 = 185;

/// How far the carriage can travel past the switch before hitting the frame
pub const CARRIAGE_OVERTRAVEL: i32 = 20;

/// Reflectance reported with no paper above the sensor
pub const BARE_REFLECTANCE: u8 = 40;

/// Per-button scripted presses, keyed by poll count
#[derive(Debug, Default)]
pub struct ButtonScript {
    presses: [Vec<u32>; 5],
    polls: [u32; 5],
}

impl ButtonScript {
    /// Report a press on the `poll`-th query of `button` (1-based)
    pub fn press_on_poll(&mut self, button: Button, poll: u32) {
        self.presses[button.index()].push(poll);
    }

    /// Number of times `button` has been queried
    pub fn polls(&self, button: Button) -> u32 {
        self.polls[button.index()]
    }

    fn take(&mut self, button: Button) -> bool {
        let i = button.index();
        self.polls[i] += 1;
        self.presses[i].contains(&self.polls[i])
    }
}

#[derive(Debug, Clone, Copy)]
struct SimMotor {
    power: i16,
    position: i32,
    counter: i32,
    remainder: i32,
    speed_percent: i32,
    jammed: bool,
    stop_fails: bool,
    faulted: bool,
    deepest: i32,
    highest: i32,
    power_changes: u32,
}

impl SimMotor {
    const fn new() -> Self {
        Self {
            power: 0,
            position: 0,
            counter: 0,
            remainder: 0,
            speed_percent: 100,
            jammed: false,
            stop_fails: false,
            faulted: false,
            deepest: 0,
            highest: 0,
            power_changes: 0,
        }
    }

    fn place(&mut self, position: i32) {
        self.position = position;
        self.deepest = position;
        self.highest = position;
    }
}

/// Simulated plotter mechanics and console
#[derive(Debug)]
pub struct SimPlotter {
    motors: [SimMotor; 4],
    time_ms: u64,
    lift_stops: bool,
    switch_connected: bool,
    paper: Option<(i32, i32)>,
    /// Scripted operator presses
    pub buttons: ButtonScript,
    statuses: Vec<Status>,
}

impl SimPlotter {
    /// Lifts at printing height, carriage at its home clearance, no paper
    pub fn new() -> Self {
        let mut motors = [SimMotor::new(); 4];
        motors[ActuatorId::Carriage.index()].place(68);
        Self {
            motors,
            time_ms: 0,
            lift_stops: true,
            switch_connected: true,
            paper: None,
            buttons: ButtonScript::default(),
            statuses: Vec::new(),
        }
    }

    /// Current simulated time
    pub fn now(&self) -> u64 {
        self.time_ms
    }

    /// Absolute position of an actuator (degrees)
    pub fn position(&self, id: ActuatorId) -> i32 {
        self.motors[id.index()].position
    }

    /// Lowest absolute position an actuator has reached
    pub fn deepest(&self, id: ActuatorId) -> i32 {
        self.motors[id.index()].deepest
    }

    /// Highest absolute position an actuator has reached
    pub fn highest(&self, id: ActuatorId) -> i32 {
        self.motors[id.index()].highest
    }

    /// Number of commands that changed an actuator's power
    pub fn power_changes(&self, id: ActuatorId) -> u32 {
        self.motors[id.index()].power_changes
    }

    pub fn place_carriage(&mut self, position: i32) {
        self.motors[ActuatorId::Carriage.index()].place(position);
    }

    pub fn place_lifts(&mut self, left: i32, right: i32) {
        self.motors[ActuatorId::LeftLift.index()].place(left);
        self.motors[ActuatorId::RightLift.index()].place(right);
    }

    /// Paper covers the sensor while the feed position is in `from..to`
    pub fn place_paper(&mut self, from: i32, to: i32) {
        self.paper = Some((from, to));
    }

    /// Make an actuator ignore its power
    pub fn jam(&mut self, id: ActuatorId) {
        self.motors[id.index()].jammed = true;
    }

    /// Make the next zero-power command to an actuator fail, latching a
    /// driver fault that ignores every later command
    pub fn fail_stop(&mut self, id: ActuatorId) {
        self.motors[id.index()].stop_fails = true;
    }

    /// Scale an actuator's speed
    pub fn set_speed_percent(&mut self, id: ActuatorId, percent: i32) {
        self.motors[id.index()].speed_percent = percent;
    }

    pub fn remove_lift_stops(&mut self) {
        self.lift_stops = false;
    }

    pub fn disconnect_switch(&mut self) {
        self.switch_connected = false;
    }

    /// Whether the limit switch reads pressed with the carriage at `position`
    pub fn switch_pressed_at(&self, position: i32) -> bool {
        self.switch_connected && position <= 0
    }

    /// Every status shown so far
    pub fn statuses(&self) -> &[Status] {
        &self.statuses
    }

    fn tick(&mut self) {
        self.time_ms += 1;
        for id in ActuatorId::ALL {
            let lift_stops = self.lift_stops;
            let motor = &mut self.motors[id.index()];
            if motor.jammed || motor.power == 0 {
                continue;
            }
            motor.remainder += motor.power as i32 * motor.speed_percent;
            let steps = motor.remainder / 1000;
            motor.remainder -= steps * 1000;

            let mut next = motor.position + steps;
            match id {
                ActuatorId::LeftLift | ActuatorId::RightLift if lift_stops => {
                    next = next.min(LIFT_TOP);
                }
                ActuatorId::Carriage => next = next.max(-CARRIAGE_OVERTRAVEL),
                _ => {}
            }
            motor.counter += next - motor.position;
            motor.position = next;
            motor.deepest = motor.deepest.min(next);
            motor.highest = motor.highest.max(next);
        }
    }
}

impl Default for SimPlotter {
    fn default() -> Self {
        Self::new()
    }
}

impl Actuators for SimPlotter {
    fn set_power(&mut self, id: ActuatorId, power: i16) {
        let motor = &mut self.motors[id.index()];
        if motor.faulted || (power == 0 && motor.stop_fails) {
            motor.faulted = true;
            return;
        }
        if motor.power != power {
            motor.power_changes += 1;
            motor.remainder = 0;
        }
        motor.power = power;
    }

    fn power(&self, id: ActuatorId) -> i16 {
        self.motors[id.index()].power
    }

    fn displacement(&mut self, id: ActuatorId) -> i32 {
        self.motors[id.index()].counter
    }

    fn reset_displacement(&mut self, id: ActuatorId) {
        self.motors[id.index()].counter = 0;
    }

    fn fault(&self) -> Option<ActuatorId> {
        ActuatorId::ALL
            .into_iter()
            .find(|&id| self.motors[id.index()].faulted)
    }
}

impl Sensors for SimPlotter {
    fn limit_switch_pressed(&mut self) -> bool {
        self.switch_pressed_at(self.position(ActuatorId::Carriage))
    }

    fn reflectance(&mut self) -> u8 {
        let feed = self.position(ActuatorId::Feed);
        match self.paper {
            Some((from, to)) if (from..to).contains(&feed) => 0,
            _ => BARE_REFLECTANCE,
        }
    }
}

impl Clock for SimPlotter {
    fn now_ms(&mut self) -> u64 {
        self.tick();
        self.time_ms
    }

    fn delay_ms(&mut self, ms: u32) {
        for _ in 0..ms {
            self.tick();
        }
    }
}

impl OperatorInput for SimPlotter {
    fn take_press(&mut self, button: Button) -> bool {
        self.buttons.take(button)
    }
}

impl StatusDisplay for SimPlotter {
    fn show(&mut self, status: Status) {
        self.statuses.push(status);
    }
}

/// A motion request seen by `RecordingHead`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Travel { pixels: u16, power: i16 },
    Stroke { depth: i32, power: i16 },
    Feed { distance_um: u32, power: i16 },
    Home { power: i16 },
    StopAll,
}

/// Print head that records motion requests instead of moving
#[derive(Debug, Default)]
pub struct RecordingHead {
    pub actions: Vec<Action>,
    pub buttons: ButtonScript,
    statuses: Vec<Status>,
    time_ms: u64,
    fail_stroke: Option<(usize, ActuatorId)>,
    stop_fault: Option<ActuatorId>,
}

impl RecordingHead {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the `n`-th stroke (1-based) time out on `actuator`
    pub fn fail_stroke(&mut self, n: usize, actuator: ActuatorId) {
        self.fail_stroke = Some((n, actuator));
    }

    /// Make every `stop_all` report a fault on `actuator`
    pub fn fail_stop(&mut self, actuator: ActuatorId) {
        self.stop_fault = Some(actuator);
    }

    pub fn statuses(&self) -> &[Status] {
        &self.statuses
    }

    pub fn strokes(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| matches!(a, Action::Stroke { .. }))
            .count()
    }

    /// Whether the last recorded motion left every actuator stopped
    pub fn stopped(&self) -> bool {
        matches!(self.actions.last(), Some(Action::StopAll) | None)
    }
}

impl PrintHead for RecordingHead {
    fn translate_carriage(&mut self, pixels: u16, power: i16) -> Result<(), PlotError> {
        self.actions.push(Action::Travel { pixels, power });
        Ok(())
    }

    fn stroke_marker(&mut self, depth: i32, power: i16) -> Result<(), PlotError> {
        self.actions.push(Action::Stroke { depth, power });
        match self.fail_stroke {
            Some((n, actuator)) if n == self.strokes() => {
                Err(PlotError::ActuatorTimeout(actuator))
            }
            _ => Ok(()),
        }
    }

    fn feed_paper(&mut self, distance_um: u32, power: i16) -> Result<(), PlotError> {
        self.actions.push(Action::Feed { distance_um, power });
        Ok(())
    }

    fn home_carriage(&mut self, power: i16) -> Result<(), PlotError> {
        self.actions.push(Action::Home { power });
        Ok(())
    }

    fn stop_all(&mut self) -> Result<(), PlotError> {
        self.actions.push(Action::StopAll);
        match self.stop_fault {
            Some(actuator) => Err(PlotError::ActuatorFault(actuator)),
            None => Ok(()),
        }
    }
}

impl Clock for RecordingHead {
    fn now_ms(&mut self) -> u64 {
        self.time_ms += 1;
        self.time_ms
    }

    fn delay_ms(&mut self, ms: u32) {
        self.time_ms += ms as u64;
    }
}

impl OperatorInput for RecordingHead {
    fn take_press(&mut self, button: Button) -> bool {
        self.buttons.take(button)
    }
}

impl StatusDisplay for RecordingHead {
    fn show(&mut self, status: Status) {
        self.statuses.push(status);
    }
}
