//! The software clock: tick handler, race-free readers, blocking delays.

use crate::state::ClockState;
use crate::timer::{TickMaskGuard, TickTimer};

/// Microseconds added to the base counter per tick.
pub const MICROS_PER_TICK: u32 = 1000;

/// Millisecond durations at or above this take the coarse `delay_ms` path.
///
/// One hour. Below it, `delay_ms` spins on `micros()`, whose 32-bit counter
/// wraps after ~1.2 h - the threshold keeps the fine counter from wrapping
/// mid-wait.
pub const LONG_DELAY_THRESHOLD_MS: u32 = 3_600_000;

/// Interrupt-synchronized software clock over a [`TickTimer`] peripheral.
///
/// Owns the canonical [`ClockState`]. The interrupt context calls
/// [`on_tick`](Self::on_tick); everything else is foreground API. All
/// methods take `&self`, so one instance can be shared between both
/// contexts (e.g. behind a `static`).
#[derive(Debug)]
pub struct SoftwareClock<T: TickTimer> {
    timer: T,
    state: ClockState,
}

impl<T: TickTimer> SoftwareClock<T> {
    /// Create a clock over the given timer peripheral. The clock does not
    /// run until [`start`](Self::start) is called.
    pub fn new(timer: T) -> Self {
        Self {
            timer,
            state: ClockState::new(),
        }
    }

    /// Reset all clock state to zero, then configure and start the periodic
    /// tick. Call exactly once, before any other clock operation.
    pub fn start(&self) {
        self.state.reset();
        self.timer.start();
    }

    /// Access the underlying timer peripheral.
    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Tick interrupt handler body. Invoked only from the timer interrupt.
    ///
    /// Clears the peripheral pending flag, advances `micros` by 1000 and
    /// `millis` by 1, and sets the tick flag.
    ///
    /// # Real-Time Safety
    ///
    /// Bounded and minimal: one flag clear and three stores. No blocking
    /// calls, no loops.
    pub fn on_tick(&self) {
        self.timer.clear_overflow_pending();
        self.state.advance_tick();
    }

    /// Milliseconds since [`start`](Self::start). Wraps after ~49.7 days.
    ///
    /// The tick interrupt source is masked around the read and its prior
    /// state restored, so a torn multi-byte value can never be observed.
    /// Only the one source that could corrupt this read is masked.
    #[must_use]
    pub fn millis(&self) -> u32 {
        let _mask = TickMaskGuard::new(&self.timer);
        self.state.millis()
    }

    /// Microseconds since [`start`](Self::start). Wraps after ~1.2 hours.
    ///
    /// Combines the synchronized microsecond base with the free-running
    /// sub-tick counter. Resolution is one counter count (4 us with the
    /// canonical 250-counts-per-tick timer), not single microseconds.
    ///
    /// If the counter has wrapped but its interrupt has not been serviced
    /// yet, the base is one tick behind the counter; compensate by one full
    /// tick unless the raw counter sits exactly at the reload value, where
    /// wrap attribution is ambiguous and skipping the compensation keeps
    /// the result from running ahead.
    ///
    /// The base is read before and after the counter snapshot, the counter
    /// before and after the flag, and the whole read retried on any
    /// instability, so a tick landing mid-read can never be counted twice
    /// or dropped.
    #[must_use]
    pub fn micros(&self) -> u32 {
        let counts_per_tick = self.timer.counts_per_tick();
        let micros_per_count = MICROS_PER_TICK / counts_per_tick;

        loop {
            let base_before = {
                let _mask = TickMaskGuard::new(&self.timer);
                self.state.micros_base()
            };

            // Halt the counter briefly so counter and overflow flag form
            // one coherent snapshot.
            self.timer.pause();
            let counter = self.timer.counter();
            let overflow_pending = self.timer.overflow_pending();
            let counter_check = self.timer.counter();
            self.timer.resume();

            let base_after = {
                let _mask = TickMaskGuard::new(&self.timer);
                self.state.micros_base()
            };

            // The counter wrapped or a tick was serviced mid-read; the
            // snapshot may pair a stale counter with a fresh flag (or the
            // other way round). Re-read.
            if base_before != base_after || counter != counter_check {
                continue;
            }

            let mut micros = base_after.wrapping_add(counter.wrapping_mul(micros_per_count));
            if overflow_pending && counter != counts_per_tick {
                micros = micros.wrapping_add(MICROS_PER_TICK);
            }
            return micros;
        }
    }

    /// Block the foreground for at least `us` microseconds by spinning on
    /// [`micros`](Self::micros). Foreground only; the interrupt keeps
    /// advancing the clock while this spins.
    pub fn delay_us(&self, us: u32) {
        let start = self.micros();
        while self.micros().wrapping_sub(start) < us {
            core::hint::spin_loop();
        }
    }

    /// Block the foreground for at least `ms` milliseconds.
    ///
    /// Short waits (below [`LONG_DELAY_THRESHOLD_MS`]) spin on the
    /// fine-grained counter for best resolution; longer waits go through
    /// [`coarse_delay_ms`](Self::coarse_delay_ms), which stays clear of the
    /// fine counter's short wraparound period.
    pub fn delay_ms(&self, ms: u32) {
        if ms < LONG_DELAY_THRESHOLD_MS {
            self.delay_us(ms.wrapping_mul(1000));
        } else {
            self.coarse_delay_ms(ms);
        }
    }

    /// Two-phase coarse wait: spin on `millis()` for the whole-millisecond
    /// part, then on the raw sub-tick counter until it returns to its phase
    /// at entry.
    ///
    /// [`delay_ms`](Self::delay_ms) routes here for durations at or above
    /// [`LONG_DELAY_THRESHOLD_MS`], where spinning on `micros()` would run
    /// into its wraparound. Callable directly for any duration when
    /// sub-millisecond resolution is not needed.
    pub fn coarse_delay_ms(&self, ms: u32) {
        let start_counter = self.timer.counter();

        let start = self.millis();
        while self.millis().wrapping_sub(start) < ms {
            core::hint::spin_loop();
        }

        // Sub-tick remainder: wait for the counter to come back around
        // to its phase at entry.
        while self.timer.counter() != start_counter {
            core::hint::spin_loop();
        }
    }

    /// Whether a tick has elapsed since [`clear_tick`](Self::clear_tick).
    ///
    /// Lets the main loop run its periodic work exactly once per tick
    /// instead of re-polling counter differences in every iteration.
    #[must_use]
    pub fn tick_elapsed(&self) -> bool {
        self.state.tick_pending()
    }

    /// Clear the tick flag after the periodic work has run.
    pub fn clear_tick(&self) {
        self.state.clear_tick();
    }
}
