use super::{BackendError, BackendResponse, Command, MediaBackend};
use crate::app::state::StatePatch;
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::sleep;
use tracing::info;

/// Simulated round-trip latency.
const DEMO_LATENCY: Duration = Duration::from_millis(150);

/// Offline stand-in for the control plane, used for standalone
/// demonstration. Never touches a network: every command succeeds after a
/// short simulated delay and status fabricates a fixed connected state.
#[derive(Default)]
pub struct DemoBackend;

impl DemoBackend {
    pub fn new() -> Self {
        Self
    }

    fn fixed_state() -> StatePatch {
        StatePatch {
            is_connected: Some(true),
            track_name: Some("Unknown Track".to_string()),
            artist_name: Some("System Audio".to_string()),
            volume: Some(50),
            is_muted: Some(false),
            ..StatePatch::default()
        }
    }
}

#[async_trait]
impl MediaBackend for DemoBackend {
    async fn send_command(&self, command: &Command) -> Result<BackendResponse, BackendError> {
        info!(command = command.label(), "[demo] command");
        sleep(DEMO_LATENCY).await;
        Ok(BackendResponse::ok())
    }

    async fn status(&self) -> Result<BackendResponse, BackendError> {
        sleep(DEMO_LATENCY).await;
        Ok(BackendResponse {
            success: true,
            message: None,
            state: Some(Self::fixed_state()),
        })
    }
}
