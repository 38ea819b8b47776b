//! # casita-adapter-mqtt
//!
//! MQTT adapter — the transport leg of the state mirror.
//!
//! ## How it works
//!
//! One rumqttc client serves both directions. The event loop receives device
//! reports and folds them into the state service, while the client half
//! implements the [`CommandPublisher`] port for outbound commands.
//! Subscriptions cover exactly the registry's topics and are re-issued on
//! every `ConnAck`, so a broker restart never leaves the mirror deaf.
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `casita-app` and `casita-domain`.

mod config;
mod error;

pub use config::MqttConfig;
pub use error::MqttError;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use rumqttc::{AsyncClient, Event, EventLoop, MqttOptions, Packet, QoS};
use tokio::sync::watch;

use casita_app::ports::{CommandPublisher, EventPublisher};
use casita_app::services::state_service::StateService;
use casita_domain::channel::Channel;
use casita_domain::command::Command;
use casita_domain::error::CasitaError;
use casita_domain::event::{Event as DomainEvent, EventType};

/// Pause after an event-loop error so a dead broker does not spin the loop hot.
const RECONNECT_PAUSE: Duration = Duration::from_secs(2);

/// Request queue capacity shared by subscriptions and outbound commands.
const REQUEST_CAPACITY: usize = 20;

/// MQTT link: owns the client half and the broker connectivity flag.
///
/// [`new`](Self::new) builds the pair; the returned [`EventLoop`] must be
/// driven by [`run`](Self::run) for anything to move.
pub struct MqttLink {
    client: AsyncClient,
    connected: watch::Sender<bool>,
}

impl MqttLink {
    /// Build the client from configuration. No network IO happens until the
    /// event loop is polled.
    #[must_use]
    pub fn new(config: &MqttConfig) -> (Self, EventLoop) {
        let mut options = MqttOptions::new(
            config.client_id.clone(),
            config.broker_host.clone(),
            config.broker_port,
        );
        options.set_keep_alive(Duration::from_secs(u64::from(config.keep_alive_secs)));

        let (client, eventloop) = AsyncClient::new(options, REQUEST_CAPACITY);
        let (connected, _) = watch::channel(false);

        (Self { client, connected }, eventloop)
    }

    /// Broker connectivity flag for presentation layers.
    #[must_use]
    pub fn link_state(&self) -> watch::Receiver<bool> {
        self.connected.subscribe()
    }

    /// Best-effort broker disconnect for shutdown paths.
    pub async fn shutdown(&self) {
        let _ = self.client.disconnect().await;
    }

    /// Drive the event loop until the owning task is dropped.
    ///
    /// Incoming reports are folded into `state`; link transitions are
    /// published to `events` as `LinkUp`/`LinkDown`. Event-loop errors pause
    /// briefly and let rumqttc reconnect on the next poll.
    pub async fn run<P, E>(&self, mut eventloop: EventLoop, state: Arc<StateService<P>>, events: E)
    where
        P: EventPublisher + Send + Sync,
        E: EventPublisher + Send + Sync,
    {
        loop {
            match eventloop.poll().await {
                Ok(Event::Incoming(Packet::ConnAck(_))) => {
                    tracing::info!("mqtt connected");
                    self.subscribe_all().await;

                    let was_up = self.connected.send_replace(true);
                    if !was_up {
                        let event =
                            DomainEvent::new(EventType::LinkUp, None, serde_json::json!({}));
                        let _ = events.publish(event).await;
                    }
                }
                Ok(Event::Incoming(Packet::Publish(publish))) => {
                    match std::str::from_utf8(&publish.payload) {
                        Ok(payload) => {
                            tracing::debug!(topic = %publish.topic, payload = %payload, "report received");
                            state.apply(&publish.topic, payload).await;
                        }
                        Err(err) => {
                            tracing::warn!(topic = %publish.topic, %err, "ignoring non-UTF-8 payload");
                        }
                    }
                }
                Ok(Event::Incoming(Packet::Disconnect)) => {
                    tracing::warn!("mqtt disconnected");
                    self.mark_down(&events).await;
                }
                Ok(_) => {}
                Err(err) => {
                    tracing::error!(%err, "mqtt error");
                    self.mark_down(&events).await;
                    tokio::time::sleep(RECONNECT_PAUSE).await;
                }
            }
        }
    }

    async fn subscribe_all(&self) {
        // Re-subscribe on every (re)connect — the broker may have lost our
        // session.
        for channel in Channel::all() {
            if let Err(err) = self.client.subscribe(channel.topic, QoS::AtMostOnce).await {
                tracing::error!(topic = channel.topic, %err, "subscribe failed");
            }
        }
    }

    async fn mark_down<E: EventPublisher + Send + Sync>(&self, events: &E) {
        let was_up = self.connected.send_replace(false);
        if was_up {
            let event = DomainEvent::new(EventType::LinkDown, None, serde_json::json!({}));
            let _ = events.publish(event).await;
        }
    }
}

impl CommandPublisher for MqttLink {
    fn publish_command(
        &self,
        command: Command,
    ) -> impl Future<Output = Result<(), CasitaError>> + Send {
        async move {
            self.client
                .publish(command.topic, QoS::AtMostOnce, false, command.payload)
                .await
                .map_err(|err| MqttError::Client(err).into_domain())
        }
    }
}
