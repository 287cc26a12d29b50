//! Monotonic time source

/// Millisecond clock and blocking delay
///
/// The print engine is a single blocking thread of control; every wait
/// loop reads this clock so it can enforce a timeout.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed epoch
    fn now_ms(&mut self) -> u64;

    /// Block for the given number of milliseconds
    fn delay_ms(&mut self, ms: u32);

    /// Milliseconds elapsed since `start`
    fn elapsed_ms(&mut self, start: u64) -> u64 {
        self.now_ms().saturating_sub(start)
    }
}
