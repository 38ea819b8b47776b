//! State service — the single writer of the device-state snapshot.

use tokio::sync::watch;

use casita_domain::channel::ChannelId;
use casita_domain::event::{Event, EventType};
use casita_domain::reconcile::reconcile;
use casita_domain::state::DeviceState;

use crate::ports::EventPublisher;

/// Owns the authoritative [`DeviceState`] snapshot.
///
/// All writes go through [`apply`](Self::apply); readers take copies via
/// [`snapshot`](Self::snapshot) or follow updates via
/// [`subscribe`](Self::subscribe). Backed by a [`watch`] channel so there is
/// exactly one writer and any number of cheap readers.
pub struct StateService<P> {
    state: watch::Sender<DeviceState>,
    publisher: P,
}

impl<P: EventPublisher> StateService<P> {
    /// Create a service starting from the all-off snapshot.
    #[must_use]
    pub fn new(publisher: P) -> Self {
        let (state, _) = watch::channel(DeviceState::default());
        Self { state, publisher }
    }

    /// Current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> DeviceState {
        *self.state.borrow()
    }

    /// Follow snapshot updates. Receivers are only woken for real changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<DeviceState> {
        self.state.subscribe()
    }

    /// Fold one inbound `(topic, payload)` message into the snapshot.
    ///
    /// Returns the channel whose value flipped, if any. Messages that
    /// reconcile to no change — unknown topics, blank payloads, gate echoes —
    /// leave the snapshot untouched and wake no watchers.
    #[tracing::instrument(skip(self))]
    pub async fn apply(&self, topic: &str, payload: &str) -> Option<ChannelId> {
        let mut flip = None;
        self.state.send_if_modified(|state| {
            let outcome = reconcile(topic, payload, *state);
            *state = outcome.state;
            if let Some(channel) = outcome.flipped {
                flip = Some((channel, outcome.state.get(channel)));
            }
            outcome.changed()
        });

        let (channel, on) = flip?;
        tracing::info!(channel = %channel, on, "channel state changed");

        // Publish StateChanged event (fire-and-forget)
        let event = Event::new(
            EventType::StateChanged,
            Some(channel),
            serde_json::json!({"on": on}),
        );
        let _ = self.publisher.publish(event).await;

        Some(channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casita_domain::error::CasitaError;
    use std::future::Future;
    use std::sync::Mutex;

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

    fn make_service() -> StateService<SpyPublisher> {
        StateService::new(SpyPublisher::default())
    }

    // ── Tests ──────────────────────────────────────────────────────

    #[tokio::test]
    async fn should_flip_channel_when_toggle_report_arrives() {
        let svc = make_service();

        let flipped = svc.apply("iot/garage/light", "ON").await;

        assert_eq!(flipped, Some(ChannelId::GarageLight));
        assert!(svc.snapshot().get(ChannelId::GarageLight));
    }

    #[tokio::test]
    async fn should_report_no_flip_when_toggle_value_repeats() {
        let svc = make_service();
        svc.apply("iot/room/light", "ON").await;

        let flipped = svc.apply("iot/room/light", "ON").await;

        assert_eq!(flipped, None);
        assert!(svc.snapshot().get(ChannelId::RoomLight));
    }

    #[tokio::test]
    async fn should_ignore_messages_on_unknown_topics() {
        let svc = make_service();

        let flipped = svc.apply("iot/garage/unknown", "ON").await;

        assert_eq!(flipped, None);
        assert_eq!(svc.snapshot(), DeviceState::default());
    }

    #[tokio::test]
    async fn should_ignore_blank_payloads() {
        let svc = make_service();

        assert_eq!(svc.apply("iot/room/ac", "").await, None);
        assert_eq!(svc.apply("iot/room/ac", "   ").await, None);
        assert_eq!(svc.snapshot(), DeviceState::default());
    }

    #[tokio::test]
    async fn should_suppress_gate_echo_after_transition() {
        let svc = make_service();

        assert_eq!(
            svc.apply("iot/garage/gateSocial", "OPEN").await,
            Some(ChannelId::GateSocial)
        );
        // Device echoes the command back on the same topic.
        assert_eq!(svc.apply("iot/garage/gateSocial", "OPEN").await, None);
        assert_eq!(
            svc.apply("iot/garage/gateSocial", "CLOSE").await,
            Some(ChannelId::GateSocial)
        );
        assert!(!svc.snapshot().get(ChannelId::GateSocial));
    }

    #[tokio::test]
    async fn should_accept_curtain_on_synonym() {
        let svc = make_service();

        let flipped = svc.apply("iot/bedroom/curtain", "on").await;

        assert_eq!(flipped, Some(ChannelId::Curtain));
        assert!(svc.snapshot().get(ChannelId::Curtain));
    }

    #[tokio::test]
    async fn should_publish_state_changed_event_when_channel_flips() {
        let svc = make_service();

        svc.apply("iot/bedroom/outlet", "ON").await;

        let events = svc.publisher.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, EventType::StateChanged);
        assert_eq!(events[0].channel, Some(ChannelId::Outlet));
        assert_eq!(events[0].data["on"], serde_json::Value::Bool(true));
    }

    #[tokio::test]
    async fn should_not_publish_event_when_nothing_flips() {
        let svc = make_service();
        svc.apply("iot/bedroom/outlet", "ON").await;

        svc.apply("iot/bedroom/outlet", "ON").await;
        svc.apply("iot/garage/unknown", "ON").await;

        let events = svc.publisher.events.lock().unwrap();
        assert_eq!(events.len(), 1);
    }

    #[tokio::test]
    async fn should_wake_watchers_only_for_real_changes() {
        let svc = make_service();
        let mut rx = svc.subscribe();

        svc.apply("iot/room/humidifier", "ON").await;
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().get(ChannelId::Humidifier));

        svc.apply("iot/room/humidifier", "ON").await;
        assert!(!rx.has_changed().unwrap());
    }
}
