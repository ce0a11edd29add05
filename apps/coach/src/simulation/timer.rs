use std::time::Duration;

use tokio::task::AbortHandle;
use tokio::time::{interval, MissedTickBehavior};

/// Runs `on_tick` once per `period` until it returns false or the task is aborted.
/// The first tick fires one full period after spawning.
pub(crate) fn spawn_ticker<F>(period: Duration, mut on_tick: F) -> AbortHandle
where
    F: FnMut() -> bool + Send + 'static,
{
    let task = tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if !on_tick() {
                break;
            }
        }
    });
    task.abort_handle()
}
