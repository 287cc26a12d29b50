//! Operator controls checked between column steps

use crate::config::PlotterConfig;
use crate::error::PlotError;
use crate::traits::{Button, Console, Status};

use super::PrintHead;

/// Let the operator pause and tune the marker depth
///
/// Non-blocking unless Enter was pressed. On an Enter press this enters a
/// modal loop: Up and Down adjust a pending delta by one degree, Enter
/// resumes. Returns the delta to add to `depth`, 0 if no pause happened.
pub fn pause_adjust<C: Console>(console: &mut C, config: &PlotterConfig, depth: i32) -> i32 {
    if !console.take_press(Button::Enter) {
        return 0;
    }

    info!("paused at depth {}", depth);
    let mut delta = 0;
    console.show(Status::Paused { depth });
    loop {
        let before = delta;
        if console.take_press(Button::Up) {
            delta += 1;
        }
        if console.take_press(Button::Down) {
            delta -= 1;
        }
        if console.take_press(Button::Enter) {
            break;
        }
        if delta != before {
            console.show(Status::Paused {
                depth: depth + delta,
            });
        }
        console.delay_ms(config.pause_poll_ms);
    }

    let resumed = depth + delta;
    info!("resumed at depth {}", resumed);
    console.show(Status::Resumed { depth: resumed });
    delta
}

/// Check for an operator abort
///
/// On a Left press every actuator is stopped, the abort is shown, and the
/// call holds for `abort_hold_ms` so the operator can read it. Returns
/// whether the run should end, or the driver fault that kept a motor from
/// stopping.
pub fn check_abort<P: PrintHead>(head: &mut P, config: &PlotterConfig) -> Result<bool, PlotError> {
    if !head.take_press(Button::Left) {
        return Ok(false);
    }

    head.stop_all()?;
    warn!("print aborted by operator");
    head.show(Status::Aborted);
    head.delay_ms(config.abort_hold_ms);
    Ok(true)
}
