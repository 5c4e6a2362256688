//! Full-stack supervision scenarios wiring all four crates together:
//! software clock, background scanner, flow-gated controller, and the
//! software watchdog stand-in.

use tickguard_checksum::Fletcher16;
use tickguard_clock::prelude::*;
use tickguard_integration_tests::patterned_image;
use tickguard_memscan::prelude::*;
use tickguard_supervisor::prelude::*;

const UNIT_TAGS: [u8; 4] = [0x01, 0x02, 0x03, 0x04];
const UNIT_RUNTIME_MS: u32 = 2;

/// Everything one control loop touches, wired to simulated hardware.
struct Stack<'a> {
    clock: SoftwareClock<SimTimer>,
    watchdog: SoftwareWatchdog,
    scanner: MemoryScanner<Fletcher16>,
    bus: SliceMemory<'a>,
    reference: u16,
}

impl<'a> Stack<'a> {
    fn new(image: &'a [u8], timeout_ms: u32) -> Self {
        let clock = SoftwareClock::new(SimTimer::with_1ms_tick());
        clock.start();

        let bus = SliceMemory::new(0x8000, image);
        let end = 0x8000 + (image.len() as u32 - 1);
        let range = ScanRange::new(0x8000, end).expect("valid range");
        let reference = checksum_range::<Fletcher16, _>(&bus, range);

        Self {
            clock,
            watchdog: SoftwareWatchdog::with_timeout_ms(timeout_ms),
            scanner: MemoryScanner::<Fletcher16>::new(range),
            bus,
            reference,
        }
    }

    /// One simulated millisecond: tick interrupt, watchdog aging, one
    /// scanned byte.
    fn tick(&mut self) {
        self.clock
            .timer()
            .advance_counts(self.clock.timer().counts_per_tick());
        self.clock.on_tick();
        self.watchdog.advance_ms(1);
        if let Some(checksum) = self.scanner.step(&self.bus) {
            assert_eq!(checksum, self.reference, "scan diverged from reference");
        }
    }

    fn run_unit<F: FlowAssertion>(
        &mut self,
        controller: &mut SupervisionController<F>,
        tag: u8,
    ) {
        controller.record_unit(tag);
        for _ in 0..UNIT_RUNTIME_MS {
            self.tick();
        }
    }
}

#[test]
fn test_accepting_value_for_canonical_four_unit_loop() {
    let flow = ChecksumFlow::new(&UNIT_TAGS).expect("non-empty tags");
    assert_eq!(flow.accepting_value(), 0x89C3);
}

#[test]
fn test_nominal_loop_services_every_iteration() {
    let image = patterned_image(64);
    let mut stack = Stack::new(&image, 100);
    let flow = ChecksumFlow::new(&UNIT_TAGS).expect("non-empty tags");
    let mut controller = SupervisionController::new(flow);

    for _ in 0..10 {
        controller.begin_iteration();
        for tag in UNIT_TAGS {
            stack.run_unit(&mut controller, tag);
        }
        let decision = controller.end_iteration(&mut stack.watchdog);
        assert_eq!(decision, ServiceDecision::Serviced);
        assert!(!stack.watchdog.has_expired());
    }

    assert_eq!(controller.metrics().services_granted, 10);
    assert_eq!(stack.clock.millis(), 80);
    // 80 scanned bytes over a 64-byte image: one complete pass.
    assert_eq!(stack.scanner.completed_passes(), 1);
}

#[test]
fn test_skipped_unit_withholds_until_expiry() {
    let image = patterned_image(64);
    let mut stack = Stack::new(&image, 30);
    let flow = ChecksumFlow::new(&UNIT_TAGS).expect("non-empty tags");
    let mut controller = SupervisionController::new(flow);

    // Two healthy iterations to arm a freshly serviced watchdog.
    for _ in 0..2 {
        controller.begin_iteration();
        for tag in UNIT_TAGS {
            stack.run_unit(&mut controller, tag);
        }
        assert!(controller.end_iteration(&mut stack.watchdog).was_serviced());
    }

    // Unit 0x02 stops running. Each faulty iteration burns 6 ms without a
    // service, so the 30 ms dog bites within five iterations.
    let mut expired_after = None;
    for iteration in 1..=10 {
        controller.begin_iteration();
        for tag in UNIT_TAGS {
            if tag == 0x02 {
                continue;
            }
            stack.run_unit(&mut controller, tag);
        }
        let decision = controller.end_iteration(&mut stack.watchdog);
        assert_eq!(decision, ServiceDecision::WithheldFlow);
        if stack.watchdog.has_expired() {
            expired_after = Some(iteration);
            break;
        }
    }

    assert_eq!(expired_after, Some(5));
    assert_eq!(controller.metrics().withheld_flow, 5);
    assert_eq!(controller.metrics().max_consecutive_withheld, 5);
}

#[test]
fn test_out_of_order_units_withhold_service() {
    let image = patterned_image(64);
    let mut stack = Stack::new(&image, 100);
    let flow = ChecksumFlow::new(&UNIT_TAGS).expect("non-empty tags");
    let mut controller = SupervisionController::new(flow);

    controller.begin_iteration();
    for tag in [0x01, 0x03, 0x02, 0x04] {
        stack.run_unit(&mut controller, tag);
    }
    assert_eq!(
        controller.end_iteration(&mut stack.watchdog),
        ServiceDecision::WithheldFlow
    );
    assert_eq!(stack.watchdog.service_count(), 0);
}

#[test]
fn test_reenabled_servicing_recovers_before_expiry() {
    let image = patterned_image(64);
    let mut stack = Stack::new(&image, 100);
    let flow = ChecksumFlow::new(&UNIT_TAGS).expect("non-empty tags");
    let mut controller = SupervisionController::new(flow);

    // Healthy iteration, then one with servicing administratively off.
    controller.begin_iteration();
    for tag in UNIT_TAGS {
        stack.run_unit(&mut controller, tag);
    }
    assert!(controller.end_iteration(&mut stack.watchdog).was_serviced());

    controller.set_servicing_enabled(false);
    controller.begin_iteration();
    for tag in UNIT_TAGS {
        stack.run_unit(&mut controller, tag);
    }
    assert_eq!(
        controller.end_iteration(&mut stack.watchdog),
        ServiceDecision::WithheldDisabled
    );

    controller.set_servicing_enabled(true);
    controller.begin_iteration();
    for tag in UNIT_TAGS {
        stack.run_unit(&mut controller, tag);
    }
    assert!(controller.end_iteration(&mut stack.watchdog).was_serviced());

    assert!(!stack.watchdog.has_expired());
    assert_eq!(controller.metrics().consecutive_withheld, 0);
    assert_eq!(controller.metrics().max_consecutive_withheld, 1);
}

#[test]
fn test_ordinal_flow_gates_the_same_loop() {
    let image = patterned_image(64);
    let mut stack = Stack::new(&image, 100);
    let flow = OrdinalFlow::new(&UNIT_TAGS).expect("non-empty tags");
    let mut controller = SupervisionController::new(flow);

    controller.begin_iteration();
    for tag in UNIT_TAGS {
        stack.run_unit(&mut controller, tag);
    }
    assert!(controller.end_iteration(&mut stack.watchdog).was_serviced());

    // Omitting the final unit leaves the position short of terminal.
    controller.begin_iteration();
    for tag in [0x01, 0x02, 0x03] {
        stack.run_unit(&mut controller, tag);
    }
    assert_eq!(
        controller.end_iteration(&mut stack.watchdog),
        ServiceDecision::WithheldFlow
    );
}

#[test]
fn test_expired_watchdog_ignores_late_service() {
    let image = patterned_image(64);
    let mut stack = Stack::new(&image, 5);
    let flow = ChecksumFlow::new(&UNIT_TAGS).expect("non-empty tags");
    let mut controller = SupervisionController::new(flow);

    // Burn past the timeout without any service.
    controller.begin_iteration();
    for _ in 0..8 {
        stack.tick();
    }
    assert!(stack.watchdog.has_expired());

    // A late but otherwise valid iteration cannot un-expire the dog.
    for tag in UNIT_TAGS {
        controller.record_unit(tag);
    }
    let decision = controller.end_iteration(&mut stack.watchdog);
    assert_eq!(decision, ServiceDecision::Serviced);
    assert!(stack.watchdog.has_expired());
}
