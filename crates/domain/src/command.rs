//! Outbound commands — rendering user intents into publishable payloads.

use serde::Serialize;

use crate::channel::ChannelId;

/// A rendered publish request: the exact token one channel expects.
///
/// Commands reuse the channel's report vocabulary, so a command published on
/// a toggle topic comes straight back as a report and reconciles to the same
/// value; on a gate topic the echo is suppressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Command {
    /// Channel this command addresses.
    pub channel: ChannelId,
    /// Destination topic.
    pub topic: &'static str,
    /// Payload token to publish.
    pub payload: &'static str,
}

impl Command {
    /// Render the command driving `channel` towards `desired_on`.
    ///
    /// Total for every registered channel: the registry supplies the topic
    /// and picks the on- or off-token. Name resolution for free-form input
    /// happens before this point, via [`ChannelId`]'s `FromStr`.
    #[must_use]
    pub fn new(channel: ChannelId, desired_on: bool) -> Self {
        let descriptor = channel.descriptor();
        Self {
            channel,
            topic: descriptor.topic,
            payload: if desired_on {
                descriptor.on_token
            } else {
                descriptor.off_token
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::reconcile;
    use crate::state::DeviceState;

    #[test]
    fn should_render_on_token_for_desired_on() {
        let command = Command::new(ChannelId::GarageLight, true);
        assert_eq!(command.topic, "iot/garage/light");
        assert_eq!(command.payload, "ON");
    }

    #[test]
    fn should_render_off_token_for_desired_off() {
        let command = Command::new(ChannelId::GarageLight, false);
        assert_eq!(command.payload, "OFF");
    }

    #[test]
    fn should_render_gate_vocabulary_for_gates() {
        assert_eq!(Command::new(ChannelId::GateSocial, true).payload, "OPEN");
        assert_eq!(Command::new(ChannelId::GateBasculante, false).payload, "CLOSE");
    }

    #[test]
    fn should_render_curtain_with_its_own_tokens() {
        let command = Command::new(ChannelId::Curtain, true);
        assert_eq!(command.topic, "iot/bedroom/curtain");
        assert_eq!(command.payload, "OPEN");
    }

    #[test]
    fn should_reconcile_back_to_the_desired_value_on_toggle_channels() {
        let command = Command::new(ChannelId::BedroomLight, true);
        let outcome = reconcile(command.topic, command.payload, DeviceState::new());
        assert!(outcome.state.get(ChannelId::BedroomLight));
    }

    #[test]
    fn should_serialize_with_channel_topic_and_payload() {
        let command = Command::new(ChannelId::Outlet, false);
        let json = serde_json::to_value(command).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "channel": "outlet",
                "topic": "iot/bedroom/outlet",
                "payload": "OFF",
            })
        );
    }
}
