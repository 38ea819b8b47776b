//! Command service — use-case for driving a channel from user input.

use casita_domain::channel::ChannelId;
use casita_domain::command::Command;
use casita_domain::error::CasitaError;
use casita_domain::event::{Event, EventType};

use crate::ports::{CommandPublisher, EventPublisher};

/// Application service turning `(channel name, desired value)` intents into
/// published commands.
pub struct CommandService<T, P> {
    transport: T,
    publisher: P,
}

impl<T: CommandPublisher, P: EventPublisher> CommandService<T, P> {
    /// Create a new service backed by the given transport.
    pub fn new(transport: T, publisher: P) -> Self {
        Self {
            transport,
            publisher,
        }
    }

    /// Resolve `channel` against the registry, render the command, and hand
    /// it to the transport.
    ///
    /// The name is resolved *before* anything reaches the transport: an
    /// unknown name publishes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`CasitaError::UnknownChannel`] when the name is not in the
    /// registry, or [`CasitaError::Transport`] when the transport refuses
    /// the message.
    #[tracing::instrument(skip(self))]
    pub async fn send(&self, channel: &str, desired_on: bool) -> Result<Command, CasitaError> {
        let id: ChannelId = channel.parse()?;
        let command = Command::new(id, desired_on);

        self.transport.publish_command(command).await?;
        tracing::info!(topic = %command.topic, payload = %command.payload, "command published");

        // Publish CommandSent event (fire-and-forget)
        let event = Event::new(
            EventType::CommandSent,
            Some(id),
            serde_json::json!({"topic": command.topic, "payload": command.payload}),
        );
        let _ = self.publisher.publish(event).await;

        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;
    use std::sync::Mutex;

    // ── Capturing transport ────────────────────────────────────────

    #[derive(Default)]
    struct CapturingTransport {
        sent: Mutex<Vec<Command>>,
    }

    impl CommandPublisher for CapturingTransport {
        fn publish_command(
            &self,
            command: Command,
        ) -> impl Future<Output = Result<(), CasitaError>> + Send {
            self.sent.lock().unwrap().push(command);
            async { Ok(()) }
        }
    }

    /// Transport that refuses everything.
    struct DownTransport;

    impl CommandPublisher for DownTransport {
        fn publish_command(
            &self,
            _command: Command,
        ) -> impl Future<Output = Result<(), CasitaError>> + Send {
            async {
                Err(CasitaError::Transport(Box::new(std::io::Error::new(
                    std::io::ErrorKind::NotConnected,
                    "link down",
                ))))
            }
        }
    }

    // ── Spy publisher ──────────────────────────────────────────────

    #[derive(Default)]
    struct SpyPublisher {
        events: Mutex<Vec<Event>>,
    }

    impl EventPublisher for SpyPublisher {
        fn publish(&self, event: Event) -> impl Future<Output = Result<(), CasitaError>> + Send {
            self.events.lock().unwrap().push(event);
            async { Ok(()) }
        }
    }

    fn make_service() -> CommandService<CapturingTransport, SpyPublisher> {
        CommandService::new(CapturingTransport::default(), SpyPublisher::default())
    }

    // ── Tests ──────────────────────────────────────────────────────

    #[tokio::test]
    async fn should_publish_on_token_for_known_channel() {
        let svc = make_service();

        let command = svc.send("garageLight", true).await.unwrap();

        assert_eq!(command.topic, "iot/garage/light");
        assert_eq!(command.payload, "ON");
        let sent = svc.transport.sent.lock().unwrap();
        assert_eq!(sent.as_slice(), &[command]);
    }

    #[tokio::test]
    async fn should_publish_gate_vocabulary_for_gate_channels() {
        let svc = make_service();

        let command = svc.send("gateBasculante", false).await.unwrap();

        assert_eq!(command.topic, "iot/garage/gateBasculante");
        assert_eq!(command.payload, "CLOSE");
    }

    #[tokio::test]
    async fn should_reject_unknown_channel_before_publishing() {
        let svc = make_service();

        let result = svc.send("noSuchChannel", true).await;

        assert!(matches!(result, Err(CasitaError::UnknownChannel(_))));
        assert!(svc.transport.sent.lock().unwrap().is_empty());
        assert!(svc.publisher.events.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_publish_command_sent_event() {
        let svc = make_service();

        svc.send("curtain", true).await.unwrap();

        let events = svc.publisher.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, EventType::CommandSent);
        assert_eq!(events[0].channel, Some(ChannelId::Curtain));
        assert_eq!(events[0].data["payload"], "OPEN");
    }

    #[tokio::test]
    async fn should_propagate_transport_errors() {
        let svc = CommandService::new(DownTransport, SpyPublisher::default());

        let result = svc.send("ac", true).await;

        assert!(matches!(result, Err(CasitaError::Transport(_))));
        // No CommandSent event for a command that never left.
        assert!(svc.publisher.events.lock().unwrap().is_empty());
    }
}
