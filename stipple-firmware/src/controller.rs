//! Operator flow controller
//!
//! Walks the plotter through load, select, prepare, print and finish,
//! driven by the core state machine. Everything here blocks: core 0 has
//! nothing else to do while the plotter moves.

use defmt::*;

use stipple_core::config::ConfigError;
use stipple_core::engine::{Plotter, SessionOutcome};
use stipple_core::raster::Catalog;
use stipple_core::state::{ErrorKind, Event, State};
use stipple_core::traits::{Actuators, Button, Clock, OperatorInput, PlotterHardware};
use stipple_core::PlotError;

/// Central controller owning the plotter and the operator state
pub struct Controller<H> {
    plotter: Plotter<H>,
    catalog: Catalog<'static>,
    state: State,
    selected: u8,
}

impl<H: PlotterHardware> Controller<H> {
    pub fn new(plotter: Plotter<H>, catalog: Catalog<'static>) -> Self {
        Self {
            plotter,
            catalog,
            state: State::Boot,
            selected: 0,
        }
    }

    /// Finish booting, reporting a rejected configuration first
    pub fn boot(&mut self, config_error: Option<ConfigError>) {
        match config_error {
            Some(e) => {
                warn!("running on default configuration ({})", e);
                self.dispatch(Event::ErrorDetected(ErrorKind::ConfigError));
            }
            None => self.dispatch(Event::BootComplete),
        }
    }

    /// Run the operator flow forever
    pub fn run(&mut self) -> ! {
        loop {
            let event = self.step();
            self.dispatch(event);
        }
    }

    /// Perform the work of the current state and return what happened
    fn step(&mut self) -> Event {
        match self.state {
            State::Boot => Event::BootComplete,
            State::Idle => {
                info!("Press Enter to start");
                self.wait_for(&[Button::Enter]);
                Event::Start
            }
            State::LoadingPaper => self.load_paper(),
            State::SelectingImage => self.select_image(),
            State::Preparing => {
                let result = self.plotter.prepare();
                self.check(result, Event::Prepared)
            }
            State::Printing => self.print(),
            State::Finishing => {
                let result = self.plotter.finish();
                self.check(result, Event::Finished)
            }
            State::Complete => {
                info!("Insert a new sheet and press Enter to print again");
                self.wait_for(&[Button::Enter]);
                Event::Start
            }
            State::Error(kind) => {
                error!("{} - press Enter to acknowledge", kind);
                self.wait_for(&[Button::Enter]);
                Event::AcknowledgeError
            }
        }
    }

    fn load_paper(&mut self) -> Event {
        info!("Is the paper loaded? Up: yes, Down: no");
        match self.wait_for(&[Button::Up, Button::Down]) {
            Button::Down => {
                info!("Push the paper in, then press Right");
                self.wait_for(&[Button::Right]);
                match self.plotter.load_paper() {
                    // Ask again so the operator can check the result
                    Ok(()) => Event::Start,
                    Err(e) => self.failure(e),
                }
            }
            _ => Event::PaperLoaded,
        }
    }

    fn select_image(&mut self) -> Event {
        info!(
            "Right: {}, Down: {}, Left: {}",
            self.image_name(0),
            self.image_name(1),
            self.image_name(2)
        );
        self.selected = match self.wait_for(&[Button::Right, Button::Down, Button::Left]) {
            Button::Right => 0,
            Button::Down => 1,
            _ => 2,
        };
        info!("Selected {}", self.image_name(self.selected));
        Event::ImageSelected
    }

    fn print(&mut self) -> Event {
        match self.plotter.print_from(&self.catalog, self.selected) {
            Ok(report) => match report.outcome {
                SessionOutcome::Completed => Event::PrintFinished,
                SessionOutcome::Aborted { .. } => Event::PrintAborted,
            },
            Err(e) => self.failure(e),
        }
    }

    fn check(&mut self, result: Result<(), PlotError>, success: Event) -> Event {
        match result {
            Ok(()) => success,
            Err(e) => self.failure(e),
        }
    }

    fn failure(&mut self, error: PlotError) -> Event {
        error!("{}", error);
        Event::ErrorDetected(ErrorKind::from(&error))
    }

    fn dispatch(&mut self, event: Event) {
        let next = self.state.transition(event);
        if event.is_error_event() || !next.motors_allowed() {
            self.plotter.hw_mut().stop_all();
        }
        if next != self.state {
            debug!("{} --{}--> {}", self.state, event, next);
        }
        self.state = next;
    }

    fn image_name(&self, id: u8) -> &'static str {
        self.catalog.get(id).map_or("-", |entry| entry.name)
    }

    /// Block until one of `buttons` is pressed
    fn wait_for(&mut self, buttons: &[Button]) -> Button {
        let poll_ms = self.plotter.config().pause_poll_ms;
        self.plotter.clear_presses();
        loop {
            if let Some(&button) = buttons.iter().find(|&&b| self.plotter.take_press(b)) {
                return button;
            }
            self.plotter.hw_mut().delay_ms(poll_ms);
        }
    }
}
