//! Command publisher port — the outbound transport leg.

use std::future::Future;

use casita_domain::command::Command;
use casita_domain::error::CasitaError;

/// Hands rendered commands to the device transport.
pub trait CommandPublisher {
    /// Publish one command on its channel's topic.
    ///
    /// Resolving means the transport accepted the message, not that any
    /// device acted on it. Confirmation only ever arrives as a report on
    /// the same topic.
    fn publish_command(
        &self,
        command: Command,
    ) -> impl Future<Output = Result<(), CasitaError>> + Send;
}

impl<T: CommandPublisher + Send + Sync> CommandPublisher for std::sync::Arc<T> {
    fn publish_command(
        &self,
        command: Command,
    ) -> impl Future<Output = Result<(), CasitaError>> + Send {
        (**self).publish_command(command)
    }
}
