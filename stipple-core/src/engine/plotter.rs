//! Plotter wrapper
//!
//! Binds a hardware implementation to its configuration and exposes the
//! operations the controller needs.

use crate::config::PlotterConfig;
use crate::error::PlotError;
use crate::motion::{self, check_fault};
use crate::raster::{Catalog, ImageSource};
use crate::traits::{
    Actuators, Button, Clock, Machine, OperatorInput, Status, StatusDisplay,
};

use super::paper;
use super::session::{start_print, SessionReport};
use super::PrintHead;

/// A plotter: hardware plus configuration
pub struct Plotter<H> {
    hw: H,
    config: PlotterConfig,
}

impl<H> Plotter<H> {
    pub fn new(hw: H, config: PlotterConfig) -> Self {
        Self { hw, config }
    }

    pub fn config(&self) -> &PlotterConfig {
        &self.config
    }

    pub fn hw(&self) -> &H {
        &self.hw
    }

    pub fn hw_mut(&mut self) -> &mut H {
        &mut self.hw
    }
}

impl<H: Machine> Plotter<H> {
    /// Home the lifts and carriage ready for a session
    pub fn prepare(&mut self) -> Result<(), PlotError> {
        self.guard(motion::prepare)
    }

    /// Advance freshly inserted paper to the print start
    pub fn load_paper(&mut self) -> Result<(), PlotError> {
        self.guard(paper::load_paper)
    }

    /// Drive the paper out
    pub fn eject_paper(&mut self) -> Result<(), PlotError> {
        self.guard(paper::eject_paper)
    }

    /// Park the head and eject the paper after a session
    pub fn finish(&mut self) -> Result<(), PlotError> {
        self.guard(paper::finish)
    }

    fn guard<F>(&mut self, op: F) -> Result<(), PlotError>
    where
        F: FnOnce(&mut H, &PlotterConfig) -> Result<(), PlotError>,
    {
        let result = op(&mut self.hw, &self.config);
        if result.is_err() {
            self.hw.stop_all();
        }
        result
    }
}

impl<H> Plotter<H>
where
    H: Machine + OperatorInput + StatusDisplay,
{
    /// Print an image from any source
    pub fn print<S: ImageSource>(&mut self, source: &mut S) -> Result<SessionReport, PlotError> {
        let config = self.config;
        start_print(self, source, &config)
    }

    /// Print image `id` from a catalog
    pub fn print_from(&mut self, catalog: &Catalog<'_>, id: u8) -> Result<SessionReport, PlotError> {
        let mut source = catalog.open(id, self.config.max_columns)?;
        self.print(&mut source)
    }
}

impl<H> PrintHead for Plotter<H>
where
    H: Machine + OperatorInput + StatusDisplay,
{
    fn translate_carriage(&mut self, pixels: u16, power: i16) -> Result<(), PlotError> {
        motion::translate_carriage(&mut self.hw, &self.config, pixels, power)
    }

    fn stroke_marker(&mut self, depth: i32, power: i16) -> Result<(), PlotError> {
        motion::stroke_marker(&mut self.hw, &self.config, depth, power)
    }

    fn feed_paper(&mut self, distance_um: u32, power: i16) -> Result<(), PlotError> {
        motion::feed_paper(&mut self.hw, &self.config, distance_um, power)
    }

    fn home_carriage(&mut self, power: i16) -> Result<(), PlotError> {
        motion::home_carriage(&mut self.hw, &self.config, power)
    }

    fn stop_all(&mut self) -> Result<(), PlotError> {
        Actuators::stop_all(&mut self.hw);
        check_fault(&mut self.hw)
    }
}

impl<H: Clock> Clock for Plotter<H> {
    fn now_ms(&mut self) -> u64 {
        self.hw.now_ms()
    }

    fn delay_ms(&mut self, ms: u32) {
        self.hw.delay_ms(ms)
    }
}

impl<H: OperatorInput> OperatorInput for Plotter<H> {
    fn take_press(&mut self, button: Button) -> bool {
        self.hw.take_press(button)
    }
}

impl<H: StatusDisplay> StatusDisplay for Plotter<H> {
    fn show(&mut self, status: Status) {
        self.hw.show(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SessionOutcome;
    use crate::raster::{ImageEntry, TextImage};
    use crate::sim::{SimPlotter, LIFT_TOP};
    use crate::traits::ActuatorId;

    fn plotter() -> Plotter<SimPlotter> {
        let mut sim = SimPlotter::new();
        sim.place_lifts(LIFT_TOP - 260, LIFT_TOP - 270);
        sim.place_carriage(400);
        Plotter::new(sim, PlotterConfig::default())
    }

    #[test]
    fn test_full_session_on_simulated_hardware() {
        let mut plotter = plotter();
        plotter.prepare().unwrap();

        let mut source = TextImage::parse("4 2\n0 1 0 1\n1 0 0 0\n", 126).unwrap();
        let report = plotter.print(&mut source).unwrap();

        assert_eq!(report.outcome, SessionOutcome::Completed);
        assert_eq!(report.rows_printed, 2);
        let sim = plotter.hw();
        assert!(sim.all_stopped());
        // Two row feeds of at least 3 degrees each
        assert!(sim.position(ActuatorId::Feed) >= 6);
        // Every stroke reached paper and came back up
        for lift in ActuatorId::LIFTS {
            assert!(sim.deepest(lift) <= LIFT_TOP - 185 - 43);
            assert!(sim.position(lift) >= LIFT_TOP - 185);
        }
        assert!(!sim.switch_pressed_at(sim.position(ActuatorId::Carriage)));
    }

    #[test]
    fn test_abort_mid_row_leaves_motors_off() {
        let mut plotter = plotter();
        plotter.prepare().unwrap();
        plotter.hw_mut().buttons.press_on_poll(Button::Left, 3);

        let mut source = TextImage::parse("5 2\n1 1 1 1 1\n1 1 1 1 1\n", 126).unwrap();
        let report = plotter.print(&mut source).unwrap();

        assert_eq!(report.outcome, SessionOutcome::Aborted { row: 0 });
        assert_eq!(report.rows_printed, 0);
        assert!(plotter.hw().all_stopped());
        assert_eq!(plotter.hw().statuses().last().copied(), Some(Status::Finished {
            outcome: SessionOutcome::Aborted { row: 0 },
            elapsed_ms: report.elapsed_ms,
        }));
    }

    #[test]
    fn test_abort_with_failed_stop_is_an_error() {
        let mut plotter = plotter();
        plotter.prepare().unwrap();
        plotter.hw_mut().fail_stop(ActuatorId::Feed);
        plotter.hw_mut().buttons.press_on_poll(Button::Left, 1);

        let mut source = TextImage::parse("3 1
1 1 1
", 126).unwrap();
        assert_eq!(
            plotter.print(&mut source),
            Err(PlotError::ActuatorFault(ActuatorId::Feed))
        );
        let sim = plotter.hw();
        assert!(!sim.all_stopped());
        assert_eq!(sim.power(ActuatorId::Carriage), 0);
        assert!(!sim.statuses().contains(&Status::Aborted));
    }

    #[test]
    fn test_jammed_carriage_fails_session() {
        let mut plotter = plotter();
        plotter.prepare().unwrap();
        plotter.hw_mut().jam(ActuatorId::Carriage);

        let mut source = TextImage::parse("3 1\n0 0 1\n", 126).unwrap();
        assert_eq!(
            plotter.print(&mut source),
            Err(PlotError::ActuatorTimeout(ActuatorId::Carriage))
        );
        assert!(plotter.hw().all_stopped());
    }

    #[test]
    fn test_print_from_catalog() {
        const IMAGES: &[ImageEntry] = &[ImageEntry {
            name: "dot",
            data: "1 1\n1\n",
        }];
        let catalog = Catalog::new(IMAGES);
        let mut plotter = plotter();
        plotter.prepare().unwrap();

        let report = plotter.print_from(&catalog, 0).unwrap();
        assert_eq!(report.rows_printed, 1);
        assert_eq!(
            plotter.print_from(&catalog, 3),
            Err(PlotError::UnknownImage(3))
        );
    }

    #[test]
    fn test_failed_prepare_stops_motors() {
        let mut sim = SimPlotter::new();
        sim.disconnect_switch();
        let config = PlotterConfig {
            switch_timeout_ms: 200,
            ..Default::default()
        };
        let mut plotter = Plotter::new(sim, config);

        assert_eq!(
            plotter.prepare(),
            Err(PlotError::ActuatorTimeout(ActuatorId::Carriage))
        );
        assert!(plotter.hw().all_stopped());
    }
}
