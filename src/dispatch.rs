use crate::app::state::{StatePatch, Store};
use crate::backend::{BackendResponse, Command, MediaBackend};
use crate::poller::poll_once;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// How long to wait after a command acknowledgment before asking the
/// backend for authoritative state. Volume and mute settle asynchronously
/// to the acknowledgment, so an immediate poll can read stale values.
pub const RECONCILE_DELAY: Duration = Duration::from_millis(500);

/// Turns a user command into an optimistic local mutation, a wire call and
/// a scheduled follow-up reconciliation poll.
pub struct Dispatcher {
    store: Arc<Store>,
    backend: Arc<dyn MediaBackend>,
}

impl Dispatcher {
    pub fn new(store: Arc<Store>, backend: Arc<dyn MediaBackend>) -> Self {
        Self { store, backend }
    }

    /// Send a command to the control plane.
    ///
    /// Play/Pause flip `is_playing` locally before any network activity so
    /// the UI reflects intent with zero perceived latency; no other command
    /// gets a local guess (the backend owns volume and mute truth).
    ///
    /// Returns once the wire call resolves. The reconciliation poll runs
    /// [`RECONCILE_DELAY`] later in a background task, whether the call
    /// succeeded or not; a failed call is never reverted here, the poll is
    /// the sole corrective path.
    pub async fn dispatch(&self, command: Command) -> BackendResponse {
        // Recognized locally, no network round-trip
        if !command.is_supported() {
            warn!(command = command.label(), "unsupported command");
            return BackendResponse::failure(format!(
                "{} is not supported by the current backend",
                command.label()
            ));
        }

        match command {
            Command::Play => {
                self.store.merge(StatePatch::playing(true));
            }
            Command::Pause => {
                self.store.merge(StatePatch::playing(false));
            }
            _ => {}
        }

        debug!(command = command.label(), "dispatching");
        let outcome = match self.backend.send_command(&command).await {
            Ok(response) => response,
            Err(e) => {
                warn!(command = command.label(), error = %e, "command failed");
                BackendResponse::failure(e.to_string())
            }
        };

        let store = self.store.clone();
        let backend = self.backend.clone();
        tokio::spawn(async move {
            tokio::time::sleep(RECONCILE_DELAY).await;
            poll_once(&store, backend.as_ref()).await;
        });

        outcome
    }
}
