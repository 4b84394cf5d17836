//! Background removal of idle session carts.

use std::{sync::Arc, time::Duration};

use tokio::time::{self, MissedTickBehavior};
use tracing::warn;

use marketplace_app::domain::carts::CartsService;

/// Purge sessions idle for longer than `idle_for`, every `every`, until the
/// runtime shuts down. The first pass runs immediately.
pub(crate) async fn run(carts: Arc<dyn CartsService>, idle_for: Duration, every: Duration) {
    let mut ticks = time::interval(every);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticks.tick().await;
        purge_once(carts.as_ref(), idle_for).await;
    }
}

async fn purge_once(carts: &dyn CartsService, idle_for: Duration) -> u64 {
    match carts.purge_idle_sessions(idle_for).await {
        Ok(purged) => purged,
        Err(source) => {
            warn!("failed to purge idle sessions: {source}");
            0
        }
    }
}
