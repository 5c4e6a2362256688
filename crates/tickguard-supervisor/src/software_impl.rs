//! Simulated timeout watchdog for tests and hardware-free environments.

use crate::peripheral::WatchdogPeripheral;

/// Software-simulated independent (timeout-only) watchdog.
///
/// Time is fed in explicitly through [`advance_ms`](Self::advance_ms) by the
/// harness that owns the clock; the peripheral itself has no time source,
/// mirroring a hardware counter clocked by an independent oscillator.
///
/// Expiry latches: once the timeout elapses without a service, the watchdog
/// "bites" and stays bitten until [`reset`](Self::reset), the way a real
/// reset line would behave. Back-to-back services are harmless - this models
/// a timeout-only watchdog, not a window watchdog.
#[derive(Debug, Clone)]
pub struct SoftwareWatchdog {
    timeout_ms: u32,
    remaining_ms: u32,
    expired: bool,
    service_count: u32,
}

impl SoftwareWatchdog {
    /// Create a watchdog with the given timeout, fully wound.
    #[must_use]
    pub fn with_timeout_ms(timeout_ms: u32) -> Self {
        let timeout_ms = timeout_ms.max(1);
        Self {
            timeout_ms,
            remaining_ms: timeout_ms,
            expired: false,
            service_count: 0,
        }
    }

    /// Configured timeout in milliseconds.
    #[must_use]
    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    /// Advance the watchdog's notion of time by `ms`.
    ///
    /// Expires the watchdog if the remaining time runs out before a service.
    pub fn advance_ms(&mut self, ms: u32) {
        if self.expired {
            return;
        }
        self.remaining_ms = self.remaining_ms.saturating_sub(ms);
        if self.remaining_ms == 0 {
            self.expired = true;
        }
    }

    /// Whether the watchdog has bitten.
    #[must_use]
    pub fn has_expired(&self) -> bool {
        self.expired
    }

    /// Milliseconds left before the watchdog bites.
    #[must_use]
    pub fn remaining_ms(&self) -> u32 {
        self.remaining_ms
    }

    /// Total number of services since construction or [`reset`](Self::reset).
    #[must_use]
    pub fn service_count(&self) -> u32 {
        self.service_count
    }

    /// Rewind to the fully wound, unexpired state. Models the post-reset
    /// peripheral.
    pub fn reset(&mut self) {
        self.remaining_ms = self.timeout_ms;
        self.expired = false;
        self.service_count = 0;
    }
}

impl WatchdogPeripheral for SoftwareWatchdog {
    fn service(&mut self) {
        if self.expired {
            // A bitten watchdog is already resetting the system; late
            // services are lost.
            return;
        }
        self.remaining_ms = self.timeout_ms;
        self.service_count = self.service_count.saturating_add(1);
    }
}
