//! # casitad — casita daemon
//!
//! Composition root that wires the adapters together and starts the mirror.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Construct the MQTT link and drive its event loop in the background
//! - Construct application services, injecting the transport via port traits
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use casita_adapter_http_axum::state::AppState;
use casita_adapter_mqtt::MqttLink;
use casita_app::event_bus::InProcessEventBus;
use casita_app::services::command_service::CommandService;
use casita_app::services::state_service::StateService;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.logging.filter))
        .init();

    // Event bus
    let event_bus = Arc::new(InProcessEventBus::new(256));

    // MQTT link
    let (link, eventloop) = MqttLink::new(&config.mqtt);
    let link = Arc::new(link);

    // Services
    let state_service = Arc::new(StateService::new(Arc::clone(&event_bus)));
    let command_service = Arc::new(CommandService::new(
        Arc::clone(&link),
        Arc::clone(&event_bus),
    ));

    // HTTP
    let state = AppState::from_arcs(
        Arc::clone(&state_service),
        command_service,
        Arc::clone(&event_bus),
        link.link_state(),
    );
    let app = casita_adapter_http_axum::router::build(state);

    // Drive the MQTT event loop in the background.
    let mqtt_link = Arc::clone(&link);
    let mqtt_events = Arc::clone(&event_bus);
    let mqtt_task = tokio::spawn(async move {
        mqtt_link.run(eventloop, state_service, mqtt_events).await;
    });

    // Signal handling
    let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;
    let shutdown = async move {
        let signal = tokio::select! {
            _ = tokio::signal::ctrl_c() => "SIGINT",
            _ = sigterm.recv() => "SIGTERM",
        };
        tracing::warn!(signal, "shutting down");
    };

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "casitad listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    // Tell the broker we are leaving before the loop is dropped.
    link.shutdown().await;
    mqtt_task.abort();

    tracing::info!("shutdown complete");
    Ok(())
}
