//! Operator input trait

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Front-panel buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    Enter,
}

impl Button {
    /// All buttons, in index order
    pub const ALL: [Button; 5] = [
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
        Button::Enter,
    ];

    /// Stable index (0-4) for array-backed implementations
    pub const fn index(self) -> usize {
        match self {
            Button::Up => 0,
            Button::Down => 1,
            Button::Left => 2,
            Button::Right => 3,
            Button::Enter => 4,
        }
    }
}

/// Edge-triggered button input
///
/// Implementations latch each press edge until it is taken, so a press
/// between two polls is never lost and a held button counts once.
pub trait OperatorInput {
    /// Consume a pending press edge for `button`
    ///
    /// Returns `true` at most once per physical press.
    fn take_press(&mut self, button: Button) -> bool;

    /// Drop every pending press edge
    fn clear_presses(&mut self) {
        for button in Button::ALL {
            let _ = self.take_press(button);
        }
    }
}
