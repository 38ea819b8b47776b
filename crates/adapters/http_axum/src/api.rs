//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod channels;
pub mod sse;
pub mod state;

use axum::Router;
use axum::routing::{get, post};

use casita_app::ports::{CommandPublisher, EventPublisher};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<T, P>() -> Router<AppState<T, P>>
where
    T: CommandPublisher + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    Router::new()
        // State
        .route("/state", get(state::get::<T, P>))
        // Channels
        .route("/channels", get(channels::list))
        .route("/channels/{channel}", post(channels::command::<T, P>))
        // Events
        .route("/events", get(sse::stream::<T, P>))
}
