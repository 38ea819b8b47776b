//! Event — an immutable record of something that happened.
//!
//! Events are produced when a channel's value flips, when a command goes out,
//! and when the transport link changes state. They exist for observers (the
//! SSE stream, logs); reconciliation itself never reads them back.

use serde::{Deserialize, Serialize};

use crate::channel::ChannelId;
use crate::time::Timestamp;

/// A unique identifier for an [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(uuid::Uuid);

impl Default for EventId {
    fn default() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl EventId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// Access the inner UUID.
    #[must_use]
    pub fn as_uuid(self) -> uuid::Uuid {
        self.0
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for EventId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::parse_str(s).map(Self)
    }
}

/// What kind of thing happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// A channel's believed value flipped.
    StateChanged,
    /// A command was handed to the transport.
    CommandSent,
    /// The broker link came up.
    LinkUp,
    /// The broker link went down.
    LinkDown,
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StateChanged => f.write_str("state_changed"),
            Self::CommandSent => f.write_str("command_sent"),
            Self::LinkUp => f.write_str("link_up"),
            Self::LinkDown => f.write_str("link_down"),
        }
    }
}

/// An immutable record of one occurrence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub event_type: EventType,
    /// Channel concerned, when the event is about one.
    pub channel: Option<ChannelId>,
    /// Type-specific payload, e.g. `{"on": true}` for a state change.
    pub data: serde_json::Value,
    pub timestamp: Timestamp,
}

impl Event {
    /// Record an occurrence happening now.
    #[must_use]
    pub fn new(event_type: EventType, channel: Option<ChannelId>, data: serde_json::Value) -> Self {
        Self {
            id: EventId::new(),
            event_type,
            channel,
            data,
            timestamp: crate::time::now(),
        }
    }
}
