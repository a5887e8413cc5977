// ── Runtime poller configuration ──
//
// Describes *how often* the door log is refreshed and how long shutdown
// may take. Never touches disk: `akuvox-config` or the host builds a
// `PollerConfig` and hands it to the poller.

use std::time::Duration;

/// Default refresh cadence for the personal door log (5 minutes).
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(300);

/// Default time `stop()` waits for a cancelled task before aborting it.
pub const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Configuration for a single [`DoorLogPoller`](crate::DoorLogPoller).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollerConfig {
    /// Cadence the retrieval operation is expected to honor.
    pub interval: Duration,
    /// How long `stop()` waits for cooperative cancellation before
    /// aborting the task.
    pub shutdown_grace: Duration,
}

impl PollerConfig {
    /// Default config with a custom interval.
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            ..Self::default()
        }
    }
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            shutdown_grace: DEFAULT_SHUTDOWN_GRACE,
        }
    }
}
