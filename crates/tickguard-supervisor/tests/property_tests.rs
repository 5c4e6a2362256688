//! Property-based tests for flow-assertion acceptance and rejection.

#![cfg(test)]

use proptest::prelude::*;
use tickguard_supervisor::prelude::*;

/// A non-empty sequence of unique tags.
fn unique_tags() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::hash_set(any::<u8>(), 1..24).prop_map(|set| set.into_iter().collect())
}

fn replay<F: FlowAssertion>(flow: &mut F, tags: &[u8]) {
    flow.begin_iteration();
    for &tag in tags {
        flow.record(tag);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // The exact expected sequence reaches the accepting state, under both
    // encodings, for any tag alphabet and length.
    #[test]
    fn prop_exact_sequence_accepts(tags in unique_tags()) {
        let mut checksum = ChecksumFlow::new(&tags).expect("non-empty");
        let mut ordinal = OrdinalFlow::new(&tags).expect("non-empty");

        replay(&mut checksum, &tags);
        replay(&mut ordinal, &tags);

        prop_assert!(checksum.is_satisfied());
        prop_assert!(ordinal.is_satisfied());
    }

    // Omitting any single unit is rejected by both encodings.
    #[test]
    fn prop_omission_rejects(tags in unique_tags(), skip in any::<prop::sample::Index>()) {
        let skip = skip.index(tags.len());
        let mutilated: Vec<u8> = tags
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != skip)
            .map(|(_, &t)| t)
            .collect();

        let mut checksum = ChecksumFlow::new(&tags).expect("non-empty");
        let mut ordinal = OrdinalFlow::new(&tags).expect("non-empty");

        replay(&mut checksum, &mutilated);
        replay(&mut ordinal, &mutilated);

        prop_assert!(!checksum.is_satisfied());
        prop_assert!(!ordinal.is_satisfied());
    }

    // Swapping two adjacent distinct units is rejected by both encodings.
    #[test]
    fn prop_adjacent_swap_rejects(tags in unique_tags(), at in any::<prop::sample::Index>()) {
        prop_assume!(tags.len() >= 2);
        let at = at.index(tags.len() - 1);

        let mut swapped = tags.clone();
        swapped.swap(at, at + 1);

        let mut checksum = ChecksumFlow::new(&tags).expect("non-empty");
        let mut ordinal = OrdinalFlow::new(&tags).expect("non-empty");

        replay(&mut checksum, &swapped);
        replay(&mut ordinal, &swapped);

        prop_assert!(!checksum.is_satisfied());
        prop_assert!(!ordinal.is_satisfied());
    }

    // Running a unit twice poisons the checksum encoding for the iteration.
    #[test]
    fn prop_duplication_rejects_checksum(tags in unique_tags(), dup in any::<prop::sample::Index>()) {
        let dup = dup.index(tags.len());
        let mut doubled = tags.clone();
        doubled.insert(dup, tags[dup]);

        let mut checksum = ChecksumFlow::new(&tags).expect("non-empty");
        replay(&mut checksum, &doubled);
        prop_assert!(!checksum.is_satisfied());
    }

    // An unsatisfied flow always withholds servicing, satisfied + enabled
    // always services - for arbitrary recorded sequences.
    #[test]
    fn prop_gating_rule_matches_flow_state(
        tags in unique_tags(),
        recorded in proptest::collection::vec(any::<u8>(), 0..32),
        enabled in any::<bool>(),
    ) {
        let flow = ChecksumFlow::new(&tags).expect("non-empty");
        let mut controller = SupervisionController::new(flow);
        controller.set_servicing_enabled(enabled);
        let mut watchdog = SoftwareWatchdog::with_timeout_ms(100);

        controller.begin_iteration();
        for &tag in &recorded {
            controller.record_unit(tag);
        }
        let decision = controller.end_iteration(&mut watchdog);

        let satisfied = controller.flow().is_satisfied();
        match decision {
            ServiceDecision::Serviced => {
                prop_assert!(satisfied && enabled);
                prop_assert_eq!(watchdog.service_count(), 1);
            }
            ServiceDecision::WithheldFlow => {
                prop_assert!(!satisfied);
                prop_assert_eq!(watchdog.service_count(), 0);
            }
            ServiceDecision::WithheldDisabled => {
                prop_assert!(satisfied && !enabled);
                prop_assert_eq!(watchdog.service_count(), 0);
            }
        }
    }
}
