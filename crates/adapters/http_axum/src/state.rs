//! Shared application state for axum handlers.

use std::sync::Arc;

use tokio::sync::watch;

use casita_app::event_bus::InProcessEventBus;
use casita_app::ports::{CommandPublisher, EventPublisher};
use casita_app::services::command_service::CommandService;
use casita_app::services::state_service::StateService;

/// Application state shared across all axum handlers.
///
/// Generic over the command transport and event publisher to avoid dynamic
/// dispatch. `Clone` is implemented manually so the underlying types
/// themselves do not need to be `Clone` — only the `Arc` wrappers and the
/// `watch` receiver are cloned.
pub struct AppState<T, P> {
    /// Owner of the device-state snapshot.
    pub state_service: Arc<StateService<P>>,
    /// Command rendering and publishing.
    pub command_service: Arc<CommandService<T, P>>,
    /// Event bus the SSE endpoint subscribes to.
    pub event_bus: Arc<InProcessEventBus>,
    /// Broker-link health, written by the transport loop.
    pub link: watch::Receiver<bool>,
}

impl<T, P> Clone for AppState<T, P> {
    fn clone(&self) -> Self {
        Self {
            state_service: Arc::clone(&self.state_service),
            command_service: Arc::clone(&self.command_service),
            event_bus: Arc::clone(&self.event_bus),
            link: self.link.clone(),
        }
    }
}

impl<T, P> AppState<T, P>
where
    T: CommandPublisher + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        state_service: StateService<P>,
        command_service: CommandService<T, P>,
        event_bus: Arc<InProcessEventBus>,
        link: watch::Receiver<bool>,
    ) -> Self {
        Self {
            state_service: Arc::new(state_service),
            command_service: Arc::new(command_service),
            event_bus,
            link,
        }
    }

    /// Create a new application state from pre-wrapped `Arc` services.
    ///
    /// Use this when services need to be shared with background tasks
    /// before constructing the HTTP state.
    pub fn from_arcs(
        state_service: Arc<StateService<P>>,
        command_service: Arc<CommandService<T, P>>,
        event_bus: Arc<InProcessEventBus>,
        link: watch::Receiver<bool>,
    ) -> Self {
        Self {
            state_service,
            command_service,
            event_bus,
            link,
        }
    }
}
