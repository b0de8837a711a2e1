pub mod demo;
pub mod http;

use crate::app::config::AppConfig;
use crate::app::state::StatePatch;
use async_trait::async_trait;
use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

/// A user action, constructed once and consumed by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play,
    Pause,
    Next,
    Previous,
    VolumeUp,
    VolumeDown,
    /// Absolute volume, 0-100 (clamped on construction by callers)
    SetVolume(u8),
    ToggleMute,
    SystemSleep,
    DisplaySleep,
}

impl Command {
    /// Control-plane endpoint for this command, relative to the base URL.
    /// `None` for commands the current backend has no endpoint for.
    pub fn endpoint(&self) -> Option<String> {
        match self {
            // The backend exposes a single toggle; play vs pause intent
            // only matters for the optimistic local update.
            Command::Play | Command::Pause => Some("/api/toggle".to_string()),
            Command::Next => Some("/api/next".to_string()),
            Command::Previous => Some("/api/prev".to_string()),
            Command::VolumeUp => Some("/api/volume/up".to_string()),
            Command::VolumeDown => Some("/api/volume/down".to_string()),
            Command::SetVolume(v) => Some(format!("/api/volume/{}", (*v).min(100))),
            Command::ToggleMute => Some("/api/mute/toggle".to_string()),
            Command::SystemSleep | Command::DisplaySleep => None,
        }
    }

    pub fn is_supported(&self) -> bool {
        self.endpoint().is_some()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Command::Play => "play",
            Command::Pause => "pause",
            Command::Next => "next",
            Command::Previous => "previous",
            Command::VolumeUp => "vol_up",
            Command::VolumeDown => "vol_down",
            Command::SetVolume(_) => "set_volume",
            Command::ToggleMute => "mute",
            Command::SystemSleep => "sleep",
            Command::DisplaySleep => "display_sleep",
        }
    }
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let head = parts.next().ok_or_else(|| "empty command".to_string())?;

        let command = match head {
            "play" => Command::Play,
            "pause" => Command::Pause,
            "next" | "n" => Command::Next,
            "prev" | "previous" | "p" => Command::Previous,
            "vol+" => Command::VolumeUp,
            "vol-" => Command::VolumeDown,
            "vol" | "volume" => {
                let value = parts
                    .next()
                    .ok_or_else(|| "volume value missing".to_string())?;
                let value: u8 = value
                    .parse()
                    .map_err(|_| format!("volume must be 0-100, got '{value}'"))?;
                Command::SetVolume(value.min(100))
            }
            "mute" => Command::ToggleMute,
            "sleep" => Command::SystemSleep,
            "display-sleep" => Command::DisplaySleep,
            other => return Err(format!("unknown command: {other}")),
        };
        Ok(command)
    }
}

/// Result of a wire call: an acknowledgment flag, an opaque message and an
/// optional partial state carrying only the fields the backend reported.
#[derive(Debug, Clone, Default)]
pub struct BackendResponse {
    pub success: bool,
    pub message: Option<String>,
    pub state: Option<StatePatch>,
}

impl BackendResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Default::default()
        }
    }

    pub fn ok_with_message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            state: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            state: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum BackendError {
    /// Network unreachable, or the status body was not parseable JSON.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("{0} is not supported by the current backend")]
    Unsupported(&'static str),
}

/// JSON shape of `GET /api/status`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusPayload {
    pub volume: i64,
    pub is_muted: bool,
}

impl From<StatusPayload> for StatePatch {
    fn from(payload: StatusPayload) -> Self {
        StatePatch {
            volume: Some(payload.volume.clamp(0, 100) as u8),
            is_muted: Some(payload.is_muted),
            // A parseable status response is itself proof of connectivity
            is_connected: Some(true),
            ..StatePatch::default()
        }
    }
}

/// The wire seam to the control plane. Stateless request/response; the
/// dispatcher and poller above this trait are the error-absorption boundary.
#[async_trait]
pub trait MediaBackend: Send + Sync {
    async fn send_command(&self, command: &Command) -> Result<BackendResponse, BackendError>;
    async fn status(&self) -> Result<BackendResponse, BackendError>;
}

/// Factory to get the backend selected by configuration.
pub fn backend_for(config: &AppConfig) -> Arc<dyn MediaBackend> {
    if config.demo {
        Arc::new(demo::DemoBackend::new())
    } else {
        Arc::new(http::HttpBackend::new(&config.base_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_mapping() {
        assert_eq!(Command::Play.endpoint().as_deref(), Some("/api/toggle"));
        assert_eq!(Command::Pause.endpoint().as_deref(), Some("/api/toggle"));
        assert_eq!(Command::Next.endpoint().as_deref(), Some("/api/next"));
        assert_eq!(Command::Previous.endpoint().as_deref(), Some("/api/prev"));
        assert_eq!(Command::VolumeUp.endpoint().as_deref(), Some("/api/volume/up"));
        assert_eq!(Command::VolumeDown.endpoint().as_deref(), Some("/api/volume/down"));
        assert_eq!(Command::ToggleMute.endpoint().as_deref(), Some("/api/mute/toggle"));
        assert_eq!(Command::SystemSleep.endpoint(), None);
        assert_eq!(Command::DisplaySleep.endpoint(), None);
    }

    #[test]
    fn test_set_volume_endpoint_carries_value() {
        for v in [0u8, 1, 37, 99, 100] {
            assert_eq!(
                Command::SetVolume(v).endpoint().unwrap(),
                format!("/api/volume/{v}")
            );
        }
        // Out-of-range input degrades to the ceiling, not an error
        assert_eq!(
            Command::SetVolume(255).endpoint().as_deref(),
            Some("/api/volume/100")
        );
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!("play".parse::<Command>().unwrap(), Command::Play);
        assert_eq!("prev".parse::<Command>().unwrap(), Command::Previous);
        assert_eq!("vol+".parse::<Command>().unwrap(), Command::VolumeUp);
        assert_eq!("vol 40".parse::<Command>().unwrap(), Command::SetVolume(40));
        assert_eq!("vol 300".parse::<Command>(), Err("volume must be 0-100, got '300'".to_string()));
        assert_eq!("volume 100".parse::<Command>().unwrap(), Command::SetVolume(100));
        assert_eq!("mute".parse::<Command>().unwrap(), Command::ToggleMute);
        assert_eq!("display-sleep".parse::<Command>().unwrap(), Command::DisplaySleep);
        assert!("blast".parse::<Command>().is_err());
        assert!("vol".parse::<Command>().is_err());
    }

    #[test]
    fn test_status_payload_deserializes_wire_names() {
        let payload: StatusPayload =
            serde_json::from_str(r#"{"volume": 40, "isMuted": false}"#).unwrap();
        assert_eq!(payload.volume, 40);
        assert!(!payload.is_muted);
    }

    #[test]
    fn test_status_payload_patch_asserts_connectivity_and_clamps() {
        let patch: StatePatch = StatusPayload {
            volume: 400,
            is_muted: true,
        }
        .into();

        assert_eq!(patch.volume, Some(100));
        assert_eq!(patch.is_muted, Some(true));
        assert_eq!(patch.is_connected, Some(true));
        // Status knows nothing about track metadata
        assert_eq!(patch.track_name, None);
        assert_eq!(patch.artist_name, None);
    }
}
