//! Device state — the boolean snapshot of every channel.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::channel::ChannelId;

/// Snapshot of every channel's believed value. `true` means on/open.
///
/// The snapshot is a small fixed-size value type: updates produce a new copy,
/// which keeps reconciliation pure and lets watchers compare before/after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeviceState {
    values: [bool; ChannelId::COUNT],
}

impl DeviceState {
    /// Snapshot with every channel off/closed.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: [false; ChannelId::COUNT],
        }
    }

    /// Believed value of one channel.
    #[must_use]
    pub fn get(self, channel: ChannelId) -> bool {
        self.values[channel.index()]
    }

    /// Copy of this snapshot with one channel set to `on`.
    #[must_use]
    pub fn with(mut self, channel: ChannelId, on: bool) -> Self {
        self.values[channel.index()] = on;
        self
    }

    /// Set one channel in place.
    pub fn set(&mut self, channel: ChannelId, on: bool) {
        self.values[channel.index()] = on;
    }

    /// Iterate `(channel, value)` pairs in registry order.
    pub fn iter(self) -> impl Iterator<Item = (ChannelId, bool)> {
        ChannelId::ALL
            .into_iter()
            .map(move |channel| (channel, self.get(channel)))
    }
}

impl Serialize for DeviceState {
    /// Serializes as a map keyed by channel name, e.g.
    /// `{"garageLight": false, "gateSocial": true, …}`.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(ChannelId::COUNT))?;
        for (channel, on) in self.iter() {
            map.serialize_entry(channel.name(), &on)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_all_channels_off() {
        let state = DeviceState::default();
        for id in ChannelId::ALL {
            assert!(!state.get(id));
        }
    }

    #[test]
    fn should_update_only_the_addressed_channel() {
        let state = DeviceState::new().with(ChannelId::RoomLight, true);
        assert!(state.get(ChannelId::RoomLight));
        let others = ChannelId::ALL
            .into_iter()
            .filter(|id| *id != ChannelId::RoomLight);
        for id in others {
            assert!(!state.get(id));
        }
    }

    #[test]
    fn should_set_channel_in_place() {
        let mut state = DeviceState::new();
        state.set(ChannelId::Outlet, true);
        assert!(state.get(ChannelId::Outlet));
        state.set(ChannelId::Outlet, false);
        assert!(!state.get(ChannelId::Outlet));
    }

    #[test]
    fn should_compare_snapshots_by_value() {
        let a = DeviceState::new().with(ChannelId::Ac, true);
        let b = DeviceState::new().with(ChannelId::Ac, true);
        assert_eq!(a, b);
        assert_ne!(a, DeviceState::new());
    }

    #[test]
    fn should_serialize_as_map_of_channel_names() {
        let state = DeviceState::new().with(ChannelId::GateSocial, true);
        let json = serde_json::to_value(state).unwrap();
        let map = json.as_object().unwrap();
        assert_eq!(map.len(), ChannelId::COUNT);
        assert_eq!(map["gateSocial"], serde_json::Value::Bool(true));
        assert_eq!(map["garageLight"], serde_json::Value::Bool(false));
    }
}
