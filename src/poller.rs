use crate::app::state::{PlayerState, StatePatch, Store};
use crate::backend::MediaBackend;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5000);

/// Issue one status poll and merge the outcome.
///
/// A successful, parseable response merges whatever the backend reported
/// (its patch carries `is_connected=true`). Any failure merges
/// `is_connected=false` and nothing else, so last-known track metadata
/// survives an outage. Connectivity is thus purely the outcome of the most
/// recently completed poll; there is no separate heartbeat and no backoff.
pub async fn poll_once(store: &Store, backend: &dyn MediaBackend) -> PlayerState {
    match backend.status().await {
        Ok(response) if response.success => {
            let patch = response
                .state
                .unwrap_or_else(|| StatePatch::connected(true));
            debug!(?patch, "status poll merged");
            store.merge(patch)
        }
        Ok(response) => {
            warn!(reason = ?response.message, "status poll rejected");
            store.merge(StatePatch::connected(false))
        }
        Err(e) => {
            warn!(error = %e, "status poll failed");
            store.merge(StatePatch::connected(false))
        }
    }
}

/// Recurring background poller. Polls once immediately on spawn, then on a
/// fixed cadence for the lifetime of the session. One instance per session.
pub struct Poller {
    handle: JoinHandle<()>,
}

impl Poller {
    pub fn spawn(store: Arc<Store>, backend: Arc<dyn MediaBackend>, interval: Duration) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                // First tick completes immediately
                ticker.tick().await;
                poll_once(&store, backend.as_ref()).await;
            }
        });
        Self { handle }
    }

    /// Cancel the recurring trigger. In-flight reconciliation tasks spawned
    /// by the dispatcher are unaffected; they always run to completion.
    pub fn shutdown(self) {
        self.handle.abort();
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
