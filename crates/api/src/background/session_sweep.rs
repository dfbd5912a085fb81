//! Periodic purge of sessions whose refresh token has expired.
//!
//! Expired sessions are already rejected on use; the sweep only keeps the
//! table from growing without bound.

use std::sync::Arc;
use std::time::Duration;

use filegate_core::store::SessionStore;
use tokio_util::sync::CancellationToken;

/// Shortest sweep period; `tokio::time::interval` rejects zero.
pub const MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Run the sweep loop every `interval` until `cancel` is triggered.
///
/// The first pass runs immediately. A zero `interval` is raised to
/// [`MIN_INTERVAL`].
pub async fn run(sessions: Arc<dyn SessionStore>, interval: Duration, cancel: CancellationToken) {
    let interval = interval.max(MIN_INTERVAL);
    tracing::info!(interval_secs = interval.as_secs(), "Session sweep started");

    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Session sweep stopping");
                break;
            }
            _ = ticker.tick() => {
                match sessions.delete_expired().await {
                    Ok(deleted) => {
                        if deleted > 0 {
                            tracing::info!(deleted, "Session sweep: purged expired sessions");
                        } else {
                            tracing::debug!("Session sweep: nothing to purge");
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Session sweep: cleanup failed");
                    }
                }
            }
        }
    }
}
