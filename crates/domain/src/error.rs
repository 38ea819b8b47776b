//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`CasitaError`]
//! at the port boundary (no `String` variants).

/// A channel name that did not resolve against the registry.
#[derive(Debug, thiserror::Error)]
#[error("unknown channel: {name}")]
pub struct UnknownChannelError {
    /// The name that failed to resolve.
    pub name: String,
}

/// Base error for all casita operations.
#[derive(Debug, thiserror::Error)]
pub enum CasitaError {
    /// A free-form channel name was not in the registry.
    #[error("unknown channel")]
    UnknownChannel(#[from] UnknownChannelError),

    /// The transport failed to accept a message.
    #[error("transport error")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}
