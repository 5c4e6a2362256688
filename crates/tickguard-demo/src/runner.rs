//! Control-loop simulation.
//!
//! Runs the full stack against simulated hardware: a [`SoftwareClock`] over
//! a [`SimTimer`], a Fletcher-16 [`MemoryScanner`] walking a fake flash
//! image one byte per tick, and a [`SupervisionController`] gating a
//! [`SoftwareWatchdog`] on a CRC-encoded execution-flow assertion.

use serde::Serialize;
use tickguard_checksum::Fletcher16;
use tickguard_clock::prelude::*;
use tickguard_memscan::prelude::*;
use tickguard_supervisor::prelude::*;
use tracing::{debug, error, info, warn};

use crate::error::DemoError;
use crate::scenario::{DemoConfig, Scenario};

/// Work-unit tag targeted by the skip-unit fault.
const SKIPPED_TAG: u8 = 0x02;

/// Outcome of one demo run, printable as human text or JSON.
#[derive(Debug, Clone, Serialize)]
pub struct DemoReport {
    /// Scenario label.
    pub scenario: String,
    /// Iterations the control loop completed before stopping.
    pub iterations_completed: u32,
    /// Watchdog service decisions, aggregated.
    pub services_granted: u32,
    /// Iterations withheld because the flow assertion failed.
    pub withheld_flow: u32,
    /// Iterations withheld because servicing was disabled.
    pub withheld_disabled: u32,
    /// Longest run of consecutive withheld iterations.
    pub max_consecutive_withheld: u32,
    /// Times the watchdog peripheral was actually serviced.
    pub watchdog_service_count: u32,
    /// Whether the watchdog timed out.
    pub watchdog_expired: bool,
    /// Clock reading when expiry was detected.
    pub expiry_millis: Option<u32>,
    /// Clock reading at the end of the run.
    pub final_millis: u32,
    /// Full background scan passes completed.
    pub scan_passes: u32,
    /// Pass checksums that disagreed with the boot-time reference.
    pub scan_mismatches: u32,
    /// Boot-time reference checksum of the flash image.
    pub reference_checksum: u16,
    /// Checksum of the most recently completed scan pass, if any.
    pub last_scan_checksum: Option<u16>,
}

/// Tracks background-scan pass results against a fixed reference.
struct ScanTracker {
    reference: u16,
    mismatches: u32,
    last: Option<u16>,
}

impl ScanTracker {
    fn observe(&mut self, checksum: u16) {
        if checksum != self.reference {
            self.mismatches = self.mismatches.saturating_add(1);
            warn!(
                checksum = format_args!("{checksum:#06X}"),
                reference = format_args!("{:#06X}", self.reference),
                "background scan mismatch"
            );
        }
        self.last = Some(checksum);
    }
}

/// Deterministic pseudo-flash content. An xorshift fill, not all-erased,
/// so a scan over it produces a non-trivial checksum.
fn build_flash_image(len: usize) -> Vec<u8> {
    let mut state: u32 = 0x2545_F491;
    let mut image = Vec::with_capacity(len);
    for _ in 0..len {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        image.push((state & 0xFF) as u8);
    }
    image
}

/// Advance simulated time by `ms` milliseconds.
///
/// Each millisecond fires the tick interrupt, ages the watchdog, and steps
/// the background scanner by one byte, in that order.
fn advance_ms(
    clock: &SoftwareClock<SimTimer>,
    watchdog: &mut SoftwareWatchdog,
    scanner: &mut MemoryScanner<Fletcher16>,
    bus: &SliceMemory<'_>,
    tracker: &mut ScanTracker,
    ms: u32,
) {
    for _ in 0..ms {
        clock.timer().advance_counts(clock.timer().counts_per_tick());
        clock.on_tick();
        watchdog.advance_ms(1);
        if let Some(checksum) = scanner.step(bus) {
            tracker.observe(checksum);
        }
    }
}

/// Run one scenario to completion and produce a report.
pub fn run(scenario: Scenario, config: &DemoConfig) -> Result<DemoReport, DemoError> {
    config.validate()?;

    let clock = SoftwareClock::new(SimTimer::with_1ms_tick());
    clock.start();

    let mut watchdog = SoftwareWatchdog::with_timeout_ms(config.watchdog_timeout_ms);

    let flash = build_flash_image(config.flash_len);
    let bus = SliceMemory::new(config.flash_base, &flash);
    let span = u32::try_from(config.flash_len - 1)
        .map_err(|_| DemoError::InvalidConfig("flash_len exceeds the 32-bit address space".into()))?;
    let end = config
        .flash_base
        .checked_add(span)
        .ok_or_else(|| DemoError::InvalidConfig("flash image wraps the 32-bit address space".into()))?;
    let range = ScanRange::new(config.flash_base, end)
        .map_err(|source| DemoError::InvalidConfig(source.to_string()))?;

    let reference = checksum_range::<Fletcher16, _>(&bus, range);
    let mut scanner = MemoryScanner::<Fletcher16>::new(range);
    let mut tracker = ScanTracker {
        reference,
        mismatches: 0,
        last: None,
    };

    let tags = config.unit_tags();
    let flow = ChecksumFlow::new(&tags)
        .map_err(|source| DemoError::InvalidConfig(source.to_string()))?;
    info!(
        scenario = scenario.label(),
        units = tags.len(),
        accepting = format_args!("{:#06X}", flow.accepting_value()),
        reference = format_args!("{reference:#06X}"),
        timeout_ms = config.watchdog_timeout_ms,
        "starting demo run"
    );
    let mut controller = SupervisionController::new(flow);

    let mut iterations_completed = 0;
    let mut expiry_millis = None;

    for iteration in 1..=config.iterations {
        let fault_active = iteration >= config.fault_iteration;

        if scenario == Scenario::StopServicing && fault_active {
            controller.set_servicing_enabled(false);
        }

        controller.begin_iteration();
        for (index, &runtime_ms) in config.unit_runtimes_ms.iter().enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            let tag = (index + 1) as u8;
            if scenario == Scenario::SkipUnit && fault_active && tag == SKIPPED_TAG {
                warn!(iteration, tag, "skipping work unit");
                continue;
            }
            controller.record_unit(tag);
            advance_ms(&clock, &mut watchdog, &mut scanner, &bus, &mut tracker, runtime_ms);
        }

        let decision = controller.end_iteration(&mut watchdog);
        if scenario == Scenario::DoubleService && fault_active && decision.was_serviced() {
            // A second service inside the same window must be harmless.
            watchdog.service();
        }

        debug!(
            iteration,
            ?decision,
            millis = clock.millis(),
            remaining_ms = watchdog.remaining_ms(),
            "iteration complete"
        );

        iterations_completed = iteration;
        if watchdog.has_expired() {
            error!(iteration, millis = clock.millis(), "watchdog expired");
            expiry_millis = Some(clock.millis());
            break;
        }
    }

    // A loop that stopped servicing keeps running until the dog bites.
    // Model that tail so the report shows the expiry instead of cutting
    // the simulation off mid-countdown.
    if !watchdog.has_expired() && controller.metrics().consecutive_withheld > 0 {
        info!(
            remaining_ms = watchdog.remaining_ms(),
            "servicing stopped, running until expiry"
        );
        let remaining = watchdog.remaining_ms();
        advance_ms(&clock, &mut watchdog, &mut scanner, &bus, &mut tracker, remaining);
        if watchdog.has_expired() {
            error!(millis = clock.millis(), "watchdog expired");
            expiry_millis = Some(clock.millis());
        }
    }

    let metrics = controller.metrics();
    Ok(DemoReport {
        scenario: scenario.label().to_owned(),
        iterations_completed,
        services_granted: metrics.services_granted,
        withheld_flow: metrics.withheld_flow,
        withheld_disabled: metrics.withheld_disabled,
        max_consecutive_withheld: metrics.max_consecutive_withheld,
        watchdog_service_count: watchdog.service_count(),
        watchdog_expired: watchdog.has_expired(),
        expiry_millis,
        final_millis: clock.millis(),
        scan_passes: scanner.completed_passes(),
        scan_mismatches: tracker.mismatches,
        reference_checksum: reference,
        last_scan_checksum: tracker.last,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> DemoConfig {
        DemoConfig {
            iterations: 10,
            unit_runtimes_ms: vec![2, 3, 5, 2],
            watchdog_timeout_ms: 100,
            fault_iteration: 3,
            flash_len: 64,
            flash_base: 0x8000,
        }
    }

    #[test]
    fn test_nominal_services_every_iteration() {
        let report = run(Scenario::Nominal, &test_config()).expect("run");
        assert_eq!(report.iterations_completed, 10);
        assert_eq!(report.services_granted, 10);
        assert_eq!(report.withheld_flow, 0);
        assert_eq!(report.withheld_disabled, 0);
        assert!(!report.watchdog_expired);
        // 120 ticks over a 64-byte image completes at least one pass.
        assert!(report.scan_passes >= 1);
        assert_eq!(report.scan_mismatches, 0);
        assert_eq!(report.last_scan_checksum, Some(report.reference_checksum));
    }

    #[test]
    fn test_double_service_is_harmless() {
        let report = run(Scenario::DoubleService, &test_config()).expect("run");
        assert_eq!(report.services_granted, 10);
        assert!(!report.watchdog_expired);
        // Iterations 3..=10 each service a second time.
        assert_eq!(report.watchdog_service_count, 18);
    }

    #[test]
    fn test_stop_servicing_expires_the_watchdog() {
        let report = run(Scenario::StopServicing, &test_config()).expect("run");
        assert!(report.watchdog_expired);
        assert_eq!(report.services_granted, 2);
        assert!(report.withheld_disabled > 0);
        assert_eq!(report.withheld_flow, 0);
    }

    #[test]
    fn test_skip_unit_withholds_and_expires() {
        let report = run(Scenario::SkipUnit, &test_config()).expect("run");
        assert!(report.watchdog_expired);
        assert_eq!(report.services_granted, 2);
        assert!(report.withheld_flow > 0);
        assert_eq!(report.withheld_disabled, 0);
    }

    #[test]
    fn test_clock_tracks_simulated_time() {
        let config = test_config();
        let report = run(Scenario::Nominal, &config).expect("run");
        // 10 iterations of 12 ms each.
        assert_eq!(report.final_millis, 120);
    }

    #[test]
    fn test_scan_keeps_matching_during_expiry_tail() {
        let report = run(Scenario::StopServicing, &test_config()).expect("run");
        assert!(report.scan_passes >= 1);
        assert_eq!(report.scan_mismatches, 0);
    }

    #[test]
    fn test_flash_image_is_deterministic() {
        assert_eq!(build_flash_image(16), build_flash_image(16));
        assert_ne!(build_flash_image(16), vec![0xFF; 16]);
    }
}
