//! The hardware watchdog capability trait.

/// Capability interface over a hardware watchdog peripheral.
///
/// The supervision controller decides *when* to reload the peripheral; how
/// the peripheral itself is configured (prescaler, timeout, window bounds)
/// stays with the board-support layer that constructs the implementation.
pub trait WatchdogPeripheral {
    /// Reload the watchdog counter, deferring the hardware reset.
    ///
    /// Called only from the foreground loop, never from interrupt context.
    ///
    /// # Real-Time Safety
    ///
    /// Must be non-blocking with bounded WCET (a register write on real
    /// hardware).
    fn service(&mut self);

    /// Retune the timing window ahead of the next work unit.
    ///
    /// Window watchdogs can narrow the open window to each unit's expected
    /// runtime. Timeout-only watchdogs ignore this; the default is a no-op,
    /// and the supervision gating rule is the same either way.
    fn retune_window(&mut self, _timeout_counts: u8, _open_window_counts: u8) {}
}
