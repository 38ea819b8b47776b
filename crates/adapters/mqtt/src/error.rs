//! MQTT adapter error types.

use casita_domain::error::CasitaError;

/// Errors specific to the MQTT adapter.
#[derive(Debug, thiserror::Error)]
pub enum MqttError {
    /// The rumqttc client refused a request (request queue closed or full).
    #[error("MQTT client error")]
    Client(#[source] rumqttc::ClientError),
}

impl MqttError {
    /// Convert into a [`CasitaError::Transport`] for propagation across port
    /// boundaries.
    #[must_use]
    pub fn into_domain(self) -> CasitaError {
        CasitaError::Transport(Box::new(self))
    }
}

impl From<MqttError> for CasitaError {
    fn from(err: MqttError) -> Self {
        err.into_domain()
    }
}
