//! Demo scenarios and tunable configuration.
//!
//! A scenario selects a fault to inject into an otherwise nominal control
//! loop; the configuration tunes timings and iteration counts. Defaults
//! mirror a small four-task firmware main loop with a 1 s watchdog.

use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::DemoError;

/// Fault injected into the control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    /// No fault. Every iteration runs all work units and services the dog.
    Nominal,
    /// Stop servicing the watchdog from the fault iteration onward.
    StopServicing,
    /// Service the watchdog a second time after a granted service.
    DoubleService,
    /// Skip the second work unit from the fault iteration onward.
    SkipUnit,
}

impl Scenario {
    /// Human-readable label used in log lines and the report.
    pub fn label(self) -> &'static str {
        match self {
            Self::Nominal => "nominal",
            Self::StopServicing => "stop-servicing",
            Self::DoubleService => "double-service",
            Self::SkipUnit => "skip-unit",
        }
    }
}

/// Tunable parameters for a demo run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    /// Number of control-loop iterations to run.
    pub iterations: u32,
    /// Emulated runtime, in milliseconds, of each work unit. The unit at
    /// index `i` records tag `i + 1`.
    pub unit_runtimes_ms: Vec<u32>,
    /// Watchdog timeout in milliseconds.
    pub watchdog_timeout_ms: u32,
    /// 1-based iteration at which the selected fault starts.
    pub fault_iteration: u32,
    /// Size of the simulated flash image scanned in the background.
    pub flash_len: usize,
    /// Base address of the simulated flash image.
    pub flash_base: u32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            iterations: 10,
            unit_runtimes_ms: vec![2, 3, 5, 2],
            watchdog_timeout_ms: 1000,
            fault_iteration: 3,
            flash_len: 4096,
            flash_base: 0x8000,
        }
    }
}

impl DemoConfig {
    /// Load a configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, DemoError> {
        let text = std::fs::read_to_string(path).map_err(|source| DemoError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self =
            serde_json::from_str(&text).map_err(|source| DemoError::ConfigParse {
                path: path.display().to_string(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the runner cannot execute.
    pub fn validate(&self) -> Result<(), DemoError> {
        if self.iterations == 0 {
            return Err(DemoError::InvalidConfig("iterations must be at least 1".into()));
        }
        if self.unit_runtimes_ms.is_empty() {
            return Err(DemoError::InvalidConfig(
                "unit_runtimes_ms must name at least one work unit".into(),
            ));
        }
        if self.unit_runtimes_ms.len() > usize::from(u8::MAX) {
            return Err(DemoError::InvalidConfig(
                "unit_runtimes_ms supports at most 255 work units".into(),
            ));
        }
        if self.watchdog_timeout_ms == 0 {
            return Err(DemoError::InvalidConfig(
                "watchdog_timeout_ms must be at least 1".into(),
            ));
        }
        if self.fault_iteration == 0 {
            return Err(DemoError::InvalidConfig(
                "fault_iteration is 1-based and must be at least 1".into(),
            ));
        }
        if self.flash_len == 0 {
            return Err(DemoError::InvalidConfig("flash_len must be at least 1".into()));
        }
        Ok(())
    }

    /// Work-unit tags in execution order: `1..=len`.
    pub fn unit_tags(&self) -> Vec<u8> {
        #[allow(clippy::cast_possible_truncation)]
        (1..=self.unit_runtimes_ms.len() as u8).collect()
    }
}
