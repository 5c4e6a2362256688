//! The supervision controller gating watchdog servicing on flow integrity.

use crate::flow::FlowAssertion;
use crate::peripheral::WatchdogPeripheral;

/// Outcome of an end-of-iteration servicing check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceDecision {
    /// Flow satisfied and servicing enabled: the watchdog was reloaded.
    Serviced,
    /// The flow assertion did not reach its accepting state; servicing was
    /// withheld. Not an error - starvation-to-reset is the fail-safe.
    WithheldFlow,
    /// Flow was satisfied but servicing is disabled (external command).
    WithheldDisabled,
}

impl ServiceDecision {
    /// Whether the watchdog was reloaded.
    #[must_use]
    pub fn was_serviced(self) -> bool {
        matches!(self, Self::Serviced)
    }
}

/// Counters for supervision decisions.
///
/// Plain copyable data, updated from the foreground loop only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SupervisionMetrics {
    /// Iterations where the watchdog was serviced.
    pub services_granted: u32,
    /// Iterations withheld because the flow assertion failed.
    pub withheld_flow: u32,
    /// Iterations withheld because servicing was disabled.
    pub withheld_disabled: u32,
    /// Current run of consecutive withheld iterations.
    pub consecutive_withheld: u32,
    /// Longest observed run of consecutive withheld iterations.
    pub max_consecutive_withheld: u32,
}

impl SupervisionMetrics {
    fn record(&mut self, decision: ServiceDecision) {
        match decision {
            ServiceDecision::Serviced => {
                self.services_granted = self.services_granted.saturating_add(1);
                self.consecutive_withheld = 0;
            }
            ServiceDecision::WithheldFlow => {
                self.withheld_flow = self.withheld_flow.saturating_add(1);
                self.bump_consecutive();
            }
            ServiceDecision::WithheldDisabled => {
                self.withheld_disabled = self.withheld_disabled.saturating_add(1);
                self.bump_consecutive();
            }
        }
    }

    fn bump_consecutive(&mut self) {
        self.consecutive_withheld = self.consecutive_withheld.saturating_add(1);
        if self.consecutive_withheld > self.max_consecutive_withheld {
            self.max_consecutive_withheld = self.consecutive_withheld;
        }
    }
}

/// Watchdog supervision controller.
///
/// Wraps a [`FlowAssertion`] and applies the gating rule: at the end of an
/// iteration the watchdog peripheral is serviced if and only if the flow
/// reached its accepting state AND servicing is enabled. The controller
/// never touches the peripheral outside [`end_iteration`](Self::end_iteration).
#[derive(Debug, Clone)]
pub struct SupervisionController<F: FlowAssertion> {
    flow: F,
    servicing_enabled: bool,
    metrics: SupervisionMetrics,
}

impl<F: FlowAssertion> SupervisionController<F> {
    /// Create a controller with servicing enabled.
    pub fn new(flow: F) -> Self {
        Self {
            flow,
            servicing_enabled: true,
            metrics: SupervisionMetrics::default(),
        }
    }

    /// Start a new control-loop iteration; resets the flow state.
    pub fn begin_iteration(&mut self) {
        self.flow.begin_iteration();
    }

    /// Record completion of the work unit carrying `tag`.
    pub fn record_unit(&mut self, tag: u8) {
        self.flow.record(tag);
    }

    /// Enable or disable watchdog servicing.
    ///
    /// The toggle is advisory input from an external command source (e.g. a
    /// serial console); disabling it starves the watchdog into a reset.
    pub fn set_servicing_enabled(&mut self, enabled: bool) {
        self.servicing_enabled = enabled;
    }

    /// Whether servicing is currently enabled.
    #[must_use]
    pub fn servicing_enabled(&self) -> bool {
        self.servicing_enabled
    }

    /// Access the wrapped flow assertion.
    #[must_use]
    pub fn flow(&self) -> &F {
        &self.flow
    }

    /// End the iteration: service the watchdog iff the flow assertion is
    /// satisfied and servicing is enabled.
    ///
    /// A failed assertion takes precedence in the reported decision; either
    /// way the peripheral is left unserviced and will eventually bite.
    pub fn end_iteration<W: WatchdogPeripheral>(&mut self, watchdog: &mut W) -> ServiceDecision {
        let decision = if !self.flow.is_satisfied() {
            ServiceDecision::WithheldFlow
        } else if self.servicing_enabled {
            watchdog.service();
            ServiceDecision::Serviced
        } else {
            ServiceDecision::WithheldDisabled
        };

        self.metrics.record(decision);
        decision
    }

    /// Snapshot of the decision counters.
    #[must_use]
    pub fn metrics(&self) -> SupervisionMetrics {
        self.metrics
    }
}
