//! The tick timer capability trait and the scoped interrupt-mask guard.

/// Capability interface over the periodic hardware timer peripheral.
///
/// Implementations stand in for the timer that drives the 1 ms tick
/// interrupt and exposes a free-running sub-tick counter. All methods take
/// `&self`: hardware registers have interior mutability by nature, and both
/// the foreground and the interrupt context hold shared references.
///
/// # Real-Time Safety
///
/// Every method must be non-blocking with bounded WCET; several are called
/// from the interrupt handler.
pub trait TickTimer {
    /// Counts of the free-running counter per tick period.
    ///
    /// The counter runs `0..counts_per_tick()` and raises the overflow flag
    /// when it wraps. With a 1 ms tick and 250 counts, one count is 4 us -
    /// the lower bound on [`micros`](crate::SoftwareClock::micros)
    /// resolution.
    fn counts_per_tick(&self) -> u32;

    /// Configure the periodic tick and enable its interrupt source.
    fn start(&self);

    /// Stop the timer and disable its interrupt source.
    fn stop(&self);

    /// Briefly halt the counter so counter and overflow flag can be read
    /// as one coherent snapshot.
    fn pause(&self);

    /// Restart the counter after [`pause`](Self::pause).
    fn resume(&self);

    /// Current value of the free-running sub-tick counter.
    fn counter(&self) -> u32;

    /// Whether the counter has wrapped since the interrupt last cleared it.
    fn overflow_pending(&self) -> bool;

    /// Clear the overflow/pending flag. Called from the interrupt handler.
    fn clear_overflow_pending(&self);

    /// Whether the tick interrupt source is currently enabled.
    fn tick_irq_enabled(&self) -> bool;

    /// Enable or disable the tick interrupt source.
    ///
    /// This masks only the timer's own update interrupt, never a global
    /// interrupt disable.
    fn set_tick_irq_enabled(&self, enabled: bool);
}

/// RAII guard masking the tick interrupt source for a scoped read.
///
/// Records the prior enabled state on creation and restores it on drop, so
/// restoration is unconditional and symmetric on every exit path. Torn reads
/// of the multi-byte counters are impossible while the guard is alive
/// because the only writer - the tick interrupt - cannot fire.
#[derive(Debug)]
pub struct TickMaskGuard<'a, T: TickTimer> {
    timer: &'a T,
    was_enabled: bool,
}

impl<'a, T: TickTimer> TickMaskGuard<'a, T> {
    /// Mask the tick interrupt source, remembering its prior state.
    pub fn new(timer: &'a T) -> Self {
        let was_enabled = timer.tick_irq_enabled();
        timer.set_tick_irq_enabled(false);
        Self { timer, was_enabled }
    }
}

impl<T: TickTimer> Drop for TickMaskGuard<'_, T> {
    fn drop(&mut self) {
        self.timer.set_tick_irq_enabled(self.was_enabled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimTimer;

    #[test]
    fn test_guard_restores_enabled_state() {
        let timer = SimTimer::with_1ms_tick();
        timer.start();
        assert!(timer.tick_irq_enabled());

        {
            let _guard = TickMaskGuard::new(&timer);
            assert!(!timer.tick_irq_enabled());
        }
        assert!(timer.tick_irq_enabled());
    }

    #[test]
    fn test_guard_restores_disabled_state() {
        let timer = SimTimer::with_1ms_tick();
        timer.set_tick_irq_enabled(false);

        {
            let _guard = TickMaskGuard::new(&timer);
            assert!(!timer.tick_irq_enabled());
        }
        assert!(!timer.tick_irq_enabled());
    }

    #[test]
    fn test_nested_guards_restore_in_order() {
        let timer = SimTimer::with_1ms_tick();
        timer.start();

        {
            let _outer = TickMaskGuard::new(&timer);
            {
                let _inner = TickMaskGuard::new(&timer);
                assert!(!timer.tick_irq_enabled());
            }
            // Inner guard restores the masked state the outer guard saw.
            assert!(!timer.tick_irq_enabled());
        }
        assert!(timer.tick_irq_enabled());
    }
}
