//! Row printing

use crate::config::PlotterConfig;
use crate::error::PlotError;
use crate::raster::{find_next, PixelRow, Scan};

use super::control::{check_abort, pause_adjust};
use super::PrintHead;

/// State carried from row to row within one session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SessionState {
    /// Marker stroke depth below printing height (degrees)
    pub deg_down: i32,
}

impl SessionState {
    pub fn new(config: &PlotterConfig) -> Self {
        Self {
            deg_down: config.marker_depth_deg,
        }
    }
}

/// How a row ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RowOutcome {
    /// Every mark printed, carriage re-homed, paper fed
    Completed,
    /// The operator aborted; all actuators are stopped
    Aborted,
}

/// Print one row of pixels
///
/// Walks a column cursor along the row. Runs of blanks are crossed in one
/// carriage move at travel power; each mark is stroked and then the
/// carriage steps one pixel at print power. After every step the operator
/// may pause to adjust `state.deg_down` or abort. A completed row ends
/// with the carriage back at home and the paper fed by one row.
pub fn print_row<P: PrintHead>(
    head: &mut P,
    row: &PixelRow,
    state: &mut SessionState,
    config: &PlotterConfig,
) -> Result<RowOutcome, PlotError> {
    trace!("row of {} pixels, {} marks", row.len(), row.mark_count());
    let mut cursor = 0;
    while cursor < row.len() {
        let scan = find_next(row, cursor)?;
        match scan {
            Scan::Mark => {
                head.stroke_marker(state.deg_down, config.print_power)?;
                head.translate_carriage(1, config.print_power)?;
                cursor += 1;
            }
            Scan::BlankRun(n) => {
                head.translate_carriage(n, config.travel_power)?;
                cursor += n as usize;
            }
            Scan::NoMoreMarks => {}
        }

        state.deg_down += pause_adjust(head, config, state.deg_down);
        if check_abort(head, config)? {
            return Ok(RowOutcome::Aborted);
        }

        if scan == Scan::NoMoreMarks {
            break;
        }
    }

    head.home_carriage(config.row_return_power)?;
    head.feed_paper(config.row_feed_um, config.feed_power)?;
    Ok(RowOutcome::Completed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Action, RecordingHead};
    use crate::traits::{Button, Status};
    use proptest::prelude::*;

    fn run(bits: &[u8], head: &mut RecordingHead) -> (RowOutcome, SessionState) {
        let config = PlotterConfig::default();
        let mut state = SessionState::new(&config);
        let row = PixelRow::from_bits(bits).unwrap();
        let outcome = print_row(head, &row, &mut state, &config).unwrap();
        (outcome, state)
    }

    #[test]
    fn test_two_marks_with_gaps() {
        let mut head = RecordingHead::new();
        let (outcome, _) = run(&[0, 0, 1, 0, 1], &mut head);

        assert_eq!(outcome, RowOutcome::Completed);
        assert_eq!(
            head.actions,
            [
                Action::Travel { pixels: 2, power: 30 },
                Action::Stroke { depth: 43, power: 35 },
                Action::Travel { pixels: 1, power: 35 },
                Action::Travel { pixels: 1, power: 30 },
                Action::Stroke { depth: 43, power: 35 },
                Action::Travel { pixels: 1, power: 35 },
                Action::Home { power: -35 },
                Action::Feed { distance_um: 571, power: 20 },
            ]
        );
    }

    #[test]
    fn test_trailing_blanks_end_the_row() {
        let mut head = RecordingHead::new();
        run(&[1, 0, 0, 0], &mut head);

        assert_eq!(head.strokes(), 1);
        // Mark, its step, then the scan that finds nothing left
        assert_eq!(head.buttons.polls(Button::Left), 2);
        assert_eq!(head.actions.len(), 4);
    }

    #[test]
    fn test_blank_row_only_rehomes_and_feeds() {
        let mut head = RecordingHead::new();
        let (outcome, _) = run(&[0, 0, 0, 0], &mut head);

        assert_eq!(outcome, RowOutcome::Completed);
        assert_eq!(
            head.actions,
            [
                Action::Home { power: -35 },
                Action::Feed { distance_um: 571, power: 20 },
            ]
        );
    }

    #[test]
    fn test_abort_on_third_mark() {
        let mut head = RecordingHead::new();
        head.buttons.press_on_poll(Button::Left, 3);
        let (outcome, _) = run(&[1, 1, 1, 1, 1], &mut head);

        assert_eq!(outcome, RowOutcome::Aborted);
        assert_eq!(head.strokes(), 3);
        assert!(head.stopped());
        assert!(!head.actions.contains(&Action::Home { power: -35 }));
        assert_eq!(head.statuses(), &[Status::Aborted]);
    }

    #[test]
    fn test_pause_adjusts_following_strokes() {
        let mut head = RecordingHead::new();
        // Pause after the first mark, raise depth by two, resume
        head.buttons.press_on_poll(Button::Enter, 1);
        head.buttons.press_on_poll(Button::Up, 1);
        head.buttons.press_on_poll(Button::Up, 2);
        head.buttons.press_on_poll(Button::Enter, 4);
        let (_, state) = run(&[1, 1], &mut head);

        assert_eq!(state.deg_down, 45);
        assert_eq!(head.actions[0], Action::Stroke { depth: 43, power: 35 });
        assert_eq!(head.actions[2], Action::Stroke { depth: 45, power: 35 });
    }

    #[test]
    fn test_timeout_propagates() {
        let mut head = RecordingHead::new();
        head.fail_stroke(2, crate::traits::ActuatorId::RightLift);
        let config = PlotterConfig::default();
        let mut state = SessionState::new(&config);
        let row = PixelRow::from_bits(&[1, 0, 1]).unwrap();

        assert_eq!(
            print_row(&mut head, &row, &mut state, &config),
            Err(PlotError::ActuatorTimeout(crate::traits::ActuatorId::RightLift))
        );
    }

    proptest! {
        #[test]
        fn prop_cursor_walks_to_last_mark(bits in prop::collection::vec(0u8..=1, 0..=126)) {
            let config = PlotterConfig::default();
            let mut state = SessionState::new(&config);
            let row = PixelRow::from_bits(&bits).unwrap();
            let mut head = RecordingHead::new();

            prop_assert_eq!(
                print_row(&mut head, &row, &mut state, &config),
                Ok(RowOutcome::Completed)
            );

            prop_assert_eq!(head.strokes(), row.mark_count());
            let travelled: usize = head
                .actions
                .iter()
                .map(|a| match a {
                    Action::Travel { pixels, .. } => *pixels as usize,
                    _ => 0,
                })
                .sum();
            let last_mark = bits.iter().rposition(|&b| b == 1);
            prop_assert_eq!(travelled, last_mark.map_or(0, |i| i + 1));
            prop_assert!(matches!(
                head.actions[head.actions.len() - 2..],
                [Action::Home { .. }, Action::Feed { .. }]
            ), "row must end with Home then Feed");
        }
    }
}
