//! Channel registry — the closed set of device channels casita mirrors.
//!
//! Each channel is one MQTT topic shared by device reports and user commands,
//! plus the payload vocabulary spoken on it. The set is fixed at compile time;
//! there is no runtime discovery or persistence.

use serde::{Deserialize, Serialize};

use crate::error::UnknownChannelError;

/// Identifier of one mirrored channel.
///
/// Serialized by its registry name (`"garageLight"`, `"curtain"`, …), which is
/// also what [`FromStr`](std::str::FromStr) accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChannelId {
    GarageLight,
    GateSocial,
    GateBasculante,
    RoomLight,
    Ac,
    Humidifier,
    BedroomLight,
    Curtain,
    Outlet,
}

impl ChannelId {
    /// Every channel, in registry order.
    pub const ALL: [Self; 9] = [
        Self::GarageLight,
        Self::GateSocial,
        Self::GateBasculante,
        Self::RoomLight,
        Self::Ac,
        Self::Humidifier,
        Self::BedroomLight,
        Self::Curtain,
        Self::Outlet,
    ];

    /// Number of channels in the registry.
    pub const COUNT: usize = Self::ALL.len();

    /// Stable registry name, as used in the API and serialized forms.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::GarageLight => "garageLight",
            Self::GateSocial => "gateSocial",
            Self::GateBasculante => "gateBasculante",
            Self::RoomLight => "roomLight",
            Self::Ac => "ac",
            Self::Humidifier => "humidifier",
            Self::BedroomLight => "bedroomLight",
            Self::Curtain => "curtain",
            Self::Outlet => "outlet",
        }
    }

    /// Registry row describing this channel.
    #[must_use]
    pub fn descriptor(self) -> &'static Channel {
        &CHANNELS[self.index()]
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ChannelId {
    type Err = UnknownChannelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.name() == s)
            .ok_or_else(|| UnknownChannelError { name: s.to_owned() })
    }
}

/// Reconciliation semantics of a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    /// Plain on/off: every matching report overwrites the stored value.
    Toggle,
    /// Open/close actuator that echoes commands back on its own topic: only
    /// payloads that disagree with the believed state are accepted.
    Gate,
}

/// Registry row: one channel's topic and payload vocabulary.
#[derive(Debug)]
pub struct Channel {
    pub id: ChannelId,
    /// MQTT topic carrying both device reports and user commands.
    pub topic: &'static str,
    pub kind: ChannelKind,
    /// Payload meaning on/open.
    pub on_token: &'static str,
    /// Payload meaning off/closed.
    pub off_token: &'static str,
    /// Extra payloads treated as "on" on the toggle path.
    pub on_aliases: &'static [&'static str],
}

impl Channel {
    /// All registry rows, in [`ChannelId::ALL`] order.
    #[must_use]
    pub fn all() -> &'static [Channel; ChannelId::COUNT] {
        &CHANNELS
    }

    /// Look up the channel owning `topic`. `None` means the message is not ours.
    #[must_use]
    pub fn by_topic(topic: &str) -> Option<&'static Channel> {
        CHANNELS.iter().find(|channel| channel.topic == topic)
    }

    /// Whether a normalized toggle payload selects the on state.
    #[must_use]
    pub fn matches_on(&self, normalized: &str) -> bool {
        normalized == self.on_token || self.on_aliases.contains(&normalized)
    }
}

// Row order must match `ChannelId::ALL`; `ChannelId::descriptor` indexes by
// discriminant.
static CHANNELS: [Channel; ChannelId::COUNT] = [
    Channel {
        id: ChannelId::GarageLight,
        topic: "iot/garage/light",
        kind: ChannelKind::Toggle,
        on_token: "ON",
        off_token: "OFF",
        on_aliases: &[],
    },
    Channel {
        id: ChannelId::GateSocial,
        topic: "iot/garage/gateSocial",
        kind: ChannelKind::Gate,
        on_token: "OPEN",
        off_token: "CLOSE",
        on_aliases: &[],
    },
    Channel {
        id: ChannelId::GateBasculante,
        topic: "iot/garage/gateBasculante",
        kind: ChannelKind::Gate,
        on_token: "OPEN",
        off_token: "CLOSE",
        on_aliases: &[],
    },
    Channel {
        id: ChannelId::RoomLight,
        topic: "iot/room/light",
        kind: ChannelKind::Toggle,
        on_token: "ON",
        off_token: "OFF",
        on_aliases: &[],
    },
    Channel {
        id: ChannelId::Ac,
        topic: "iot/room/ac",
        kind: ChannelKind::Toggle,
        on_token: "ON",
        off_token: "OFF",
        on_aliases: &[],
    },
    Channel {
        id: ChannelId::Humidifier,
        topic: "iot/room/humidifier",
        kind: ChannelKind::Toggle,
        on_token: "ON",
        off_token: "OFF",
        on_aliases: &[],
    },
    Channel {
        id: ChannelId::BedroomLight,
        topic: "iot/bedroom/light",
        kind: ChannelKind::Toggle,
        on_token: "ON",
        off_token: "OFF",
        on_aliases: &[],
    },
    Channel {
        id: ChannelId::Curtain,
        topic: "iot/bedroom/curtain",
        kind: ChannelKind::Toggle,
        on_token: "OPEN",
        off_token: "CLOSE",
        on_aliases: &["ON"],
    },
    Channel {
        id: ChannelId::Outlet,
        topic: "iot/bedroom/outlet",
        kind: ChannelKind::Toggle,
        on_token: "ON",
        off_token: "OFF",
        on_aliases: &[],
    },
];
