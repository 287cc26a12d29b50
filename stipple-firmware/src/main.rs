//! Stipple - Dot Plotter Firmware
//!
//! Main firmware binary for RP2040-based marker plotters: two lift motors,
//! a carriage, a paper feed roller, a carriage limit switch and a paper
//! reflectance sensor.
//!
//! Core 1 runs an embassy executor that counts encoder edges and scans
//! the buttons. Core 0 runs the print controller as one blocking loop.
//!
//! Pin map:
//!
//! | Function            | PWM    | DIR    | ENC A/B   |
//! |---------------------|--------|--------|-----------|
//! | Left lift           | GPIO0  | GPIO1  | GPIO2/3   |
//! | Carriage            | GPIO4  | GPIO5  | GPIO6/7   |
//! | Paper feed          | GPIO8  | GPIO9  | GPIO10/11 |
//! | Right lift          | GPIO12 | GPIO13 | GPIO14/15 |
//!
//! Limit switch GPIO16, buttons GPIO17-21 (up, down, left, right, enter),
//! reflectance sensor ADC0 (GPIO26). Switch and buttons are active low.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::{Executor, Spawner};
use embassy_rp::adc::{self, Adc, Channel};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::multicore::{spawn_core1, Stack};
use embassy_rp::pwm::{Config as PwmConfig, Pwm, PwmOutput};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use stipple_core::engine::Plotter;
use stipple_drivers::motor::{DcMotor, DcMotorConfig, MotorBank};
use stipple_drivers::sensor::{PlotterSensors, ReflectanceCalibration, ReflectanceSensor, TouchSwitch};
use stipple_drivers::input::ButtonPad;
use stipple_drivers::Board;

use crate::channels::{BUTTONS, ENCODER_COUNTS};
use crate::clock::EmbassyClock;
use crate::controller::Controller;
use crate::display::RttDisplay;
use crate::hw::{AdcChannel, AtomicEncoder, SharedButtons};

mod channels;
mod clock;
mod config;
mod controller;
mod display;
mod hw;
mod images;
mod tasks;

/// PWM counter top; the duty cycle resolution
const PWM_TOP: u16 = 1000;

// Core 1 stack and executor (must live forever)
static CORE1_STACK: StaticCell<Stack<4096>> = StaticCell::new();
static EXECUTOR1: StaticCell<Executor> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Stipple firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let (config, config_error) = config::load_config();

    // Encoders and buttons move to core 1
    let encoders = [
        (Input::new(p.PIN_2, Pull::Up), Input::new(p.PIN_3, Pull::Up)),
        (Input::new(p.PIN_6, Pull::Up), Input::new(p.PIN_7, Pull::Up)),
        (Input::new(p.PIN_10, Pull::Up), Input::new(p.PIN_11, Pull::Up)),
        (Input::new(p.PIN_14, Pull::Up), Input::new(p.PIN_15, Pull::Up)),
    ];
    let buttons = ButtonPad::new([
        Input::new(p.PIN_17, Pull::Up),
        Input::new(p.PIN_18, Pull::Up),
        Input::new(p.PIN_19, Pull::Up),
        Input::new(p.PIN_20, Pull::Up),
        Input::new(p.PIN_21, Pull::Up),
    ]);
    BUTTONS.lock(|cell| *cell.borrow_mut() = Some(buttons));

    spawn_core1(p.CORE1, CORE1_STACK.init(Stack::new()), move || {
        let executor1 = EXECUTOR1.init(Executor::new());
        executor1.run(|spawner| {
            for ((a, b), counter) in encoders.into_iter().zip(ENCODER_COUNTS.iter()) {
                spawner.spawn(tasks::encoder_task(a, b, counter)).unwrap();
            }
            spawner.spawn(tasks::button_scan_task()).unwrap();
        })
    });
    info!("Core 1 started");

    // Motors, in ActuatorId order
    let mut pwm_config = PwmConfig::default();
    pwm_config.top = PWM_TOP;
    let motor_config = DcMotorConfig::default();
    let motors = MotorBank::new([
        DcMotor::new(
            pwm_a(Pwm::new_output_a(p.PWM_SLICE0, p.PIN_0, pwm_config.clone())),
            Output::new(p.PIN_1, Level::Low),
            AtomicEncoder(&ENCODER_COUNTS[0]),
            motor_config,
        ),
        DcMotor::new(
            pwm_a(Pwm::new_output_a(p.PWM_SLICE2, p.PIN_4, pwm_config.clone())),
            Output::new(p.PIN_5, Level::Low),
            AtomicEncoder(&ENCODER_COUNTS[1]),
            motor_config,
        ),
        DcMotor::new(
            pwm_a(Pwm::new_output_a(p.PWM_SLICE4, p.PIN_8, pwm_config.clone())),
            Output::new(p.PIN_9, Level::Low),
            AtomicEncoder(&ENCODER_COUNTS[2]),
            motor_config,
        ),
        DcMotor::new(
            pwm_a(Pwm::new_output_a(p.PWM_SLICE6, p.PIN_12, pwm_config)),
            Output::new(p.PIN_13, Level::Low),
            AtomicEncoder(&ENCODER_COUNTS[3]),
            motor_config,
        ),
    ]);
    info!("Motors initialized");

    let sensors = PlotterSensors::new(
        TouchSwitch::new_active_low(Input::new(p.PIN_16, Pull::Up)),
        ReflectanceSensor::new(
            AdcChannel {
                adc: Adc::new_blocking(p.ADC, adc::Config::default()),
                channel: Channel::new_pin(p.PIN_26, Pull::None),
            },
            ReflectanceCalibration::default(),
        ),
    );

    let board = Board::new(motors, sensors, SharedButtons, EmbassyClock, RttDisplay);
    let plotter = Plotter::new(board, config);

    let mut controller = Controller::new(plotter, images::CATALOG);
    controller.boot(config_error);
    info!("Boot complete");

    controller.run()
}

/// Take channel A of a PWM slice configured with one output
fn pwm_a(pwm: Pwm<'static>) -> PwmOutput<'static> {
    match pwm.split() {
        (Some(output), _) => output,
        _ => defmt::panic!("PWM channel A not configured"),
    }
}
