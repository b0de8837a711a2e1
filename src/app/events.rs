use crate::app::state::PlayerState;
use crate::backend::{BackendResponse, Command};

/// Events flowing into the session loop.
pub enum AppEvent {
    Input(String),
    StateUpdate(PlayerState),
    Dispatched(Command, BackendResponse),
}
