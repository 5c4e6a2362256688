//! Simulated tick timer for tests and hardware-free environments.

use portable_atomic::{AtomicBool, AtomicU32, Ordering};

use crate::timer::TickTimer;

/// Software-simulated [`TickTimer`].
///
/// The free-running counter is advanced explicitly with
/// [`advance_counts`](Self::advance_counts) by a test harness or a driver
/// thread standing in for the hardware clock tree. Wrapping past the reload
/// value raises the overflow flag exactly like the peripheral's update
/// event; servicing it (calling
/// [`SoftwareClock::on_tick`](crate::SoftwareClock::on_tick)) is the
/// harness's job, mirroring the interrupt dispatch the hardware would do
/// while the tick interrupt source is enabled.
#[derive(Debug)]
pub struct SimTimer {
    counts_per_tick: u32,
    /// Bit 31: overflow pending. Low bits: free-running counter. One word
    /// so a wrap publishes the counter reset and the flag together, the way
    /// the hardware's update event does.
    state: AtomicU32,
    irq_enabled: AtomicBool,
    running: AtomicBool,
    paused: AtomicBool,
}

const PENDING_BIT: u32 = 1 << 31;
const COUNTER_MASK: u32 = PENDING_BIT - 1;

impl SimTimer {
    /// Counts per tick of the canonical 1 ms / 4 us-per-count timer.
    pub const DEFAULT_COUNTS_PER_TICK: u32 = 250;

    /// Create a simulated timer with the canonical 1 ms tick (250 counts of
    /// 4 us).
    #[must_use]
    pub fn with_1ms_tick() -> Self {
        Self::with_counts_per_tick(Self::DEFAULT_COUNTS_PER_TICK)
    }

    /// Create a simulated timer with a custom counts-per-tick reload value.
    ///
    /// `counts_per_tick` should divide 1000 evenly so the microsecond step
    /// per count is exact.
    #[must_use]
    pub fn with_counts_per_tick(counts_per_tick: u32) -> Self {
        Self {
            counts_per_tick: counts_per_tick.max(1),
            state: AtomicU32::new(0),
            irq_enabled: AtomicBool::new(false),
            running: AtomicBool::new(false),
            paused: AtomicBool::new(false),
        }
    }

    /// Advance the free-running counter by `counts`, wrapping at the reload
    /// value and raising the overflow flag on each wrap.
    ///
    /// No effect while the timer is stopped, and the pause flag is honored
    /// between counts, matching a halted hardware counter.
    pub fn advance_counts(&self, counts: u32) {
        if !self.running.load(Ordering::Acquire) {
            return;
        }
        for _ in 0..counts {
            if self.paused.load(Ordering::Acquire) {
                return;
            }
            let state = self.state.load(Ordering::Acquire);
            let next = (state & COUNTER_MASK).wrapping_add(1);
            let new = if next >= self.counts_per_tick {
                PENDING_BIT
            } else {
                (state & PENDING_BIT) | next
            };
            self.state.store(new, Ordering::Release);
        }
    }

    /// Force the raw counter value. Test-harness use only.
    pub fn set_counter_raw(&self, counter: u32) {
        let state = self.state.load(Ordering::Acquire);
        self.state
            .store((state & PENDING_BIT) | (counter & COUNTER_MASK), Ordering::Release);
    }

    /// Force the overflow flag. Test-harness use only.
    pub fn set_overflow_pending_raw(&self, pending: bool) {
        if pending {
            self.state.fetch_or(PENDING_BIT, Ordering::AcqRel);
        } else {
            self.state.fetch_and(COUNTER_MASK, Ordering::AcqRel);
        }
    }

    /// Whether the timer has been started and not stopped.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

impl TickTimer for SimTimer {
    fn counts_per_tick(&self) -> u32 {
        self.counts_per_tick
    }

    fn start(&self) {
        self.state.store(0, Ordering::Release);
        self.paused.store(false, Ordering::Release);
        self.running.store(true, Ordering::Release);
        self.irq_enabled.store(true, Ordering::Release);
    }

    fn stop(&self) {
        self.running.store(false, Ordering::Release);
        self.irq_enabled.store(false, Ordering::Release);
    }

    fn pause(&self) {
        self.paused.store(true, Ordering::Release);
    }

    fn resume(&self) {
        self.paused.store(false, Ordering::Release);
    }

    fn counter(&self) -> u32 {
        self.state.load(Ordering::Acquire) & COUNTER_MASK
    }

    fn overflow_pending(&self) -> bool {
        self.state.load(Ordering::Acquire) & PENDING_BIT != 0
    }

    fn clear_overflow_pending(&self) {
        self.state.fetch_and(COUNTER_MASK, Ordering::AcqRel);
    }

    fn tick_irq_enabled(&self) -> bool {
        self.irq_enabled.load(Ordering::Acquire)
    }

    fn set_tick_irq_enabled(&self, enabled: bool) {
        self.irq_enabled.store(enabled, Ordering::Release);
    }
}
