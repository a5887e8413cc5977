//! `akuvox watch` -- supervise a door log refresh loop until Ctrl-C.

use std::time::Duration;

use tracing::info;

use akuvox_config::Config;
use akuvox_core::store::load_door_keys_async;
use akuvox_core::{CoreError, CredentialView, DoorLogPoller, periodic};

use crate::cli::{GlobalOpts, WatchArgs};
use crate::error::CliError;
use crate::output;

pub async fn handle(args: &WatchArgs, global: &GlobalOpts, cfg: &Config) -> Result<(), CliError> {
    let path = super::store_path(global, cfg)?;

    let mut poller_config = cfg.to_poller_config();
    if let Some(secs) = args.interval {
        if secs == 0 {
            return Err(CliError::Validation {
                field: "interval".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        poller_config.interval = Duration::from_secs(secs);
    }

    // Fail fast on an unreadable store; later failures are only logged.
    load_door_keys_async(path.clone())
        .await
        .map_err(|e| CliError::store(&path, e))?;

    let quiet = global.quiet;
    let retrieve = periodic(move || {
        let path = path.clone();
        async move {
            let records = load_door_keys_async(path).await?;
            let mut view = CredentialView::new();
            view.rebuild_now(&records);
            info!(
                credentials = view.len(),
                active = view.active().count(),
                "door keys refreshed"
            );
            output::print_output(&super::keys::summary(&view), quiet);
            Ok::<(), CoreError>(())
        }
    });

    let mut poller = DoorLogPoller::new(Some(retrieve), poller_config);
    poller.start();

    let signal = tokio::signal::ctrl_c().await;
    poller.stop().await;
    signal?;
    Ok(())
}
