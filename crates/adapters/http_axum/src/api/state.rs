//! JSON REST handler for the mirror snapshot.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use casita_app::ports::{CommandPublisher, EventPublisher};
use casita_domain::state::DeviceState;

use crate::state::AppState;

/// Snapshot of the mirror as returned by the API.
#[derive(Serialize)]
pub struct StateView {
    /// Whether the broker link is currently up.
    pub connected: bool,
    /// Believed on/off value per channel.
    pub channels: DeviceState,
}

/// Possible responses from the state endpoint.
pub enum GetResponse {
    Ok(Json<StateView>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/state`
pub async fn get<T, P>(State(state): State<AppState<T, P>>) -> GetResponse
where
    T: CommandPublisher + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let connected = *state.link.borrow();
    let channels = state.state_service.snapshot();
    GetResponse::Ok(Json(StateView { connected, channels }))
}
