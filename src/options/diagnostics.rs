use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Diagnostics", inline)]
#[serde(default)]
/// Periodic frame-rate reporting.
pub struct DiagnosticsOptions {
    /// Whether to spawn the background reporter.
    #[schemars(title = "Report FPS")]
    pub report_fps: bool,
    /// Seconds between reports.
    #[schemars(title = "Report Period (s)", range(min = 1, max = 60))]
    pub period_secs: u64,
}

impl DiagnosticsOptions {
    /// Report period as a [`Duration`].
    #[must_use]
    pub fn period(&self) -> Duration {
        Duration::from_secs(self.period_secs.max(1))
    }
}

impl Default for DiagnosticsOptions {
    fn default() -> Self {
        Self {
            report_fps: true,
            period_secs: 2,
        }
    }
}
