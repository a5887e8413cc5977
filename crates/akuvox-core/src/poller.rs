// ── Door log poller ──
//
// Supervises the single background task that keeps the personal door
// log fresh. The poller does not schedule anything itself: the injected
// retrieval operation owns its loop and cadence, the poller only starts
// it once and tears it down on request.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::config::{DEFAULT_POLL_INTERVAL, PollerConfig};
use crate::error::CoreError;

/// What a retrieval operation gets when it is launched.
#[derive(Debug, Clone)]
pub struct PollContext {
    /// Cancelled when the poller is stopped. Operations must watch it.
    pub cancel: CancellationToken,
    /// Cadence the operation should refresh at.
    pub interval: Duration,
}

/// An injected retrieval operation: produces one long-running,
/// cancellable future per launch.
pub type RetrieveFn = Arc<dyn Fn(PollContext) -> BoxFuture<'static, ()> + Send + Sync>;

/// Wrap an async function into a [`RetrieveFn`].
pub fn retrieve_fn<F, Fut>(f: F) -> RetrieveFn
where
    F: Fn(PollContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    Arc::new(move |ctx| f(ctx).boxed())
}

/// Build a retrieval operation that runs `fetch` immediately and then
/// once per interval until cancelled.
///
/// Fetch failures are logged and the loop keeps going. An in-flight
/// fetch is dropped as soon as cancellation is requested.
pub fn periodic<F, Fut>(fetch: F) -> RetrieveFn
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), CoreError>> + Send + 'static,
{
    let fetch = Arc::new(fetch);
    retrieve_fn(move |ctx: PollContext| {
        let fetch = Arc::clone(&fetch);
        async move {
            let period = if ctx.interval.is_zero() {
                DEFAULT_POLL_INTERVAL
            } else {
                ctx.interval
            };
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    () = ctx.cancel.cancelled() => break,
                    _ = interval.tick() => {
                        tokio::select! {
                            biased;
                            () = ctx.cancel.cancelled() => break,
                            result = fetch() => {
                                if let Err(e) = result {
                                    warn!(error = %e, "door log retrieval failed");
                                }
                            }
                        }
                    }
                }
            }
        }
    })
}

// ── DoorLogPoller ────────────────────────────────────────────────

struct PollTask {
    handle: JoinHandle<()>,
    cancel: CancellationToken,
}

/// Owns at most one running retrieval task.
///
/// `Idle → Polling` on [`start`](Self::start), `Polling → Idle` on
/// [`stop`](Self::stop). Both are idempotent and never fail. One poller
/// exists per integration session and is held by whoever orchestrates it.
pub struct DoorLogPoller {
    retrieve: Option<RetrieveFn>,
    config: PollerConfig,
    is_polling: bool,
    task: Option<PollTask>,
}

impl DoorLogPoller {
    /// Create an idle poller. Without a retrieval operation, `start()`
    /// does nothing.
    pub fn new(retrieve: Option<RetrieveFn>, config: PollerConfig) -> Self {
        Self {
            retrieve,
            config,
            is_polling: false,
            task: None,
        }
    }

    pub fn is_polling(&self) -> bool {
        self.is_polling
    }

    pub fn interval(&self) -> Duration {
        self.config.interval
    }

    pub fn config(&self) -> &PollerConfig {
        &self.config
    }

    /// Launch the retrieval operation as a detached task.
    ///
    /// No-op when already polling or when no operation is configured.
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        let Some(retrieve) = &self.retrieve else {
            return;
        };
        if self.is_polling {
            return;
        }

        info!(
            interval_secs = self.config.interval.as_secs(),
            "polling personal door log"
        );
        self.is_polling = true;

        let cancel = CancellationToken::new();
        let ctx = PollContext {
            cancel: cancel.clone(),
            interval: self.config.interval,
        };
        let handle = tokio::spawn(retrieve(ctx));
        self.task = Some(PollTask { handle, cancel });
    }

    /// Cancel the running task and wait for it to exit.
    ///
    /// No-op when idle. Cancellation is cooperative; a task still running
    /// after `shutdown_grace` is aborted. Once this returns the task has
    /// fully exited. Join failures are logged, never returned.
    pub async fn stop(&mut self) {
        if !self.is_polling {
            return;
        }
        let Some(PollTask { mut handle, cancel }) = self.task.take() else {
            return;
        };

        debug!("stopping personal door log polling");
        self.is_polling = false;
        cancel.cancel();

        let joined = if let Ok(result) =
            tokio::time::timeout(self.config.shutdown_grace, &mut handle).await
        {
            result
        } else {
            warn!(
                grace_secs = self.config.shutdown_grace.as_secs(),
                "polling task ignored cancellation, aborting"
            );
            handle.abort();
            handle.await
        };

        match joined {
            Ok(()) => debug!("polling task stopped"),
            Err(e) if e.is_cancelled() => debug!("polling task cancelled"),
            Err(e) => error!(error = %e, "error when cancelling polling task"),
        }
    }
}

impl Drop for DoorLogPoller {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.cancel.cancel();
            task.handle.abort();
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────
