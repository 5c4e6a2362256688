//! Canonical clock state shared between interrupt and foreground contexts.

use portable_atomic::{AtomicBool, AtomicU32, Ordering};

/// The process-wide software clock counters.
///
/// Mutated exclusively by the tick interrupt; the foreground only reads the
/// counters and clears the tick flag. Both counters wrap in their native
/// 32-bit width (`millis` after ~49.7 days, `micros_base` after ~1.2 hours);
/// readers must use wrapping subtraction for differences, never absolute
/// comparison.
///
/// Atomics here guard against torn single-word accesses on targets where
/// `u32` loads are not naturally atomic; the scoped interrupt mask in the
/// readers is what guarantees a consistent multi-field snapshot.
#[derive(Debug)]
pub struct ClockState {
    /// Milliseconds since [`reset`](Self::reset). One increment per tick.
    millis: AtomicU32,
    /// Microsecond base, advancing in fixed 1000-unit steps each tick.
    micros_base: AtomicU32,
    /// Set by the interrupt each tick, cleared by the foreground.
    tick_pending: AtomicBool,
}

impl ClockState {
    /// Create a zeroed clock state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            millis: AtomicU32::new(0),
            micros_base: AtomicU32::new(0),
            tick_pending: AtomicBool::new(false),
        }
    }

    /// Reset all counters and the tick flag to zero.
    pub fn reset(&self) {
        self.millis.store(0, Ordering::Release);
        self.micros_base.store(0, Ordering::Release);
        self.tick_pending.store(false, Ordering::Release);
    }

    /// Advance the clock by one tick. Interrupt context only.
    ///
    /// # Real-Time Safety
    ///
    /// Three stores, no loops, no allocation.
    pub fn advance_tick(&self) {
        let micros = self.micros_base.load(Ordering::Relaxed);
        self.micros_base
            .store(micros.wrapping_add(1000), Ordering::Release);
        let millis = self.millis.load(Ordering::Relaxed);
        self.millis.store(millis.wrapping_add(1), Ordering::Release);
        self.tick_pending.store(true, Ordering::Release);
    }

    /// Raw millisecond counter. Callers mask the tick interrupt around this.
    #[must_use]
    pub fn millis(&self) -> u32 {
        self.millis.load(Ordering::Acquire)
    }

    /// Raw microsecond base. Callers mask the tick interrupt around this.
    #[must_use]
    pub fn micros_base(&self) -> u32 {
        self.micros_base.load(Ordering::Acquire)
    }

    /// Whether a tick has elapsed since the flag was last cleared.
    #[must_use]
    pub fn tick_pending(&self) -> bool {
        self.tick_pending.load(Ordering::Acquire)
    }

    /// Clear the tick flag. Foreground context only.
    pub fn clear_tick(&self) {
        self.tick_pending.store(false, Ordering::Release);
    }
}

impl Default for ClockState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_zero() {
        let state = ClockState::new();
        assert_eq!(state.millis(), 0);
        assert_eq!(state.micros_base(), 0);
        assert!(!state.tick_pending());
    }

    #[test]
    fn test_advance_tick_steps() {
        let state = ClockState::new();
        state.advance_tick();
        state.advance_tick();

        assert_eq!(state.millis(), 2);
        assert_eq!(state.micros_base(), 2000);
        assert!(state.tick_pending());
    }

    #[test]
    fn test_clear_tick() {
        let state = ClockState::new();
        state.advance_tick();
        state.clear_tick();
        assert!(!state.tick_pending());
        // Clearing the flag does not disturb the counters.
        assert_eq!(state.millis(), 1);
    }

    #[test]
    fn test_counters_wrap_in_native_width() {
        let state = ClockState::new();
        state.millis.store(u32::MAX, Ordering::Release);
        state.micros_base.store(u32::MAX - 999, Ordering::Release);

        state.advance_tick();

        assert_eq!(state.millis(), 0);
        assert_eq!(state.micros_base(), 1);
    }

    #[test]
    fn test_reset() {
        let state = ClockState::new();
        state.advance_tick();
        state.reset();
        assert_eq!(state.millis(), 0);
        assert_eq!(state.micros_base(), 0);
        assert!(!state.tick_pending());
    }
}
