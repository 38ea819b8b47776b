//! Reconciliation — folding inbound transport messages into the snapshot.
//!
//! This is the only place that interprets payloads. The function is pure:
//! callers own delivery, logging, and fan-out of the outcome.

use crate::channel::{Channel, ChannelId, ChannelKind};
use crate::state::DeviceState;

/// Outcome of applying one inbound message to a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciled {
    /// The snapshot after the message.
    pub state: DeviceState,
    /// The channel whose value flipped, if any.
    pub flipped: Option<ChannelId>,
}

impl Reconciled {
    /// Whether any channel's value actually changed.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.flipped.is_some()
    }

    fn unchanged(state: DeviceState) -> Self {
        Self {
            state,
            flipped: None,
        }
    }
}

/// Apply one inbound `(topic, payload)` pair to `current`.
///
/// Toggle channels overwrite their value on every recognized message: the
/// payload is trimmed and uppercased, and the value becomes `true` iff the
/// result matches the channel's on-token (or a declared alias). An empty
/// payload is a no-op.
///
/// Gate channels compare the raw payload against their tokens exactly — no
/// trimming, no case folding — and accept only genuine transitions: the
/// on-token when believed closed, the off-token when believed open. A payload
/// that merely repeats the believed state is the device echoing a command
/// back and leaves the snapshot untouched.
///
/// Messages on topics outside the registry never change anything.
#[must_use]
pub fn reconcile(topic: &str, payload: &str, current: DeviceState) -> Reconciled {
    let Some(channel) = Channel::by_topic(topic) else {
        return Reconciled::unchanged(current);
    };

    match channel.kind {
        ChannelKind::Toggle => {
            let normalized = payload.trim().to_uppercase();
            if normalized.is_empty() {
                return Reconciled::unchanged(current);
            }
            let on = channel.matches_on(&normalized);
            let flipped = (on != current.get(channel.id)).then_some(channel.id);
            Reconciled {
                state: current.with(channel.id, on),
                flipped,
            }
        }
        ChannelKind::Gate => {
            let on = if payload == channel.on_token {
                true
            } else if payload == channel.off_token {
                false
            } else {
                return Reconciled::unchanged(current);
            };
            if on == current.get(channel.id) {
                return Reconciled::unchanged(current);
            }
            Reconciled {
                state: current.with(channel.id, on),
                flipped: Some(channel.id),
            }
        }
    }
}
