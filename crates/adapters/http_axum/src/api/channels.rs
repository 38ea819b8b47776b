//! JSON REST handlers for channels.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use casita_app::ports::{CommandPublisher, EventPublisher};
use casita_domain::channel::{Channel, ChannelId, ChannelKind};
use casita_domain::command::Command;
use casita_domain::error::CasitaError;

use crate::error::ApiError;
use crate::state::AppState;

/// What the caller wants done with a channel.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandAction {
    On,
    Off,
    /// Invert the currently believed value.
    Toggle,
}

/// Request body for sending a command.
#[derive(Deserialize)]
pub struct CommandRequest {
    pub action: CommandAction,
}

/// One registry row, as returned by the API.
#[derive(Serialize)]
pub struct ChannelRow {
    pub channel: ChannelId,
    pub topic: &'static str,
    pub kind: ChannelKind,
    pub on: &'static str,
    pub off: &'static str,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<ChannelRow>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the command endpoint.
pub enum CommandResponse {
    Accepted(Json<Command>),
}

impl IntoResponse for CommandResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Accepted(json) => (StatusCode::ACCEPTED, json).into_response(),
        }
    }
}

/// `GET /api/channels`
pub async fn list() -> ListResponse {
    let rows = Channel::all()
        .iter()
        .map(|channel| ChannelRow {
            channel: channel.id,
            topic: channel.topic,
            kind: channel.kind,
            on: channel.on_token,
            off: channel.off_token,
        })
        .collect();
    ListResponse::Ok(Json(rows))
}

/// `POST /api/channels/:channel`
///
/// Resolves the action against the current snapshot (for `toggle`) and hands
/// the rendered command to the transport. `202 Accepted` means the transport
/// took the message; the mirror only changes once the device reports back.
pub async fn command<T, P>(
    State(state): State<AppState<T, P>>,
    Path(channel): Path<String>,
    Json(request): Json<CommandRequest>,
) -> Result<CommandResponse, ApiError>
where
    T: CommandPublisher + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let desired_on = match request.action {
        CommandAction::On => true,
        CommandAction::Off => false,
        CommandAction::Toggle => {
            let id = channel.parse::<ChannelId>().map_err(CasitaError::from)?;
            !state.state_service.snapshot().get(id)
        }
    };

    let command = state.command_service.send(&channel, desired_on).await?;
    Ok(CommandResponse::Accepted(Json(command)))
}
