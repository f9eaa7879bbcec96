//! Background purge of visits left over from previous days.

use std::time::Duration;

use sqlx::SqlitePool;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use crate::visits::repository::delete_visits_before_today;

/// Deletes visits registered before today and logs how many went.
pub async fn clear_old_visits(pool: &SqlitePool) -> Result<u64, sqlx::Error> {
    let removed = delete_visits_before_today(pool).await?;
    if removed > 0 {
        info!(removed, "Cleared visits from previous days");
    } else {
        debug!("No stale visits to clear");
    }
    Ok(removed)
}

/// Runs `clear_old_visits` immediately and then every `every`. Failures are
/// logged and retried on the next tick.
pub fn spawn_visit_cleanup(pool: SqlitePool, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if let Err(e) = clear_old_visits(&pool).await {
                error!("Visit cleanup failed: {e}");
            }
        }
    })
}
