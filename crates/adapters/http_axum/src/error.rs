//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use casita_domain::error::CasitaError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`CasitaError`] to an HTTP response with appropriate status code.
pub struct ApiError(CasitaError);

impl From<CasitaError> for ApiError {
    fn from(err: CasitaError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            CasitaError::UnknownChannel(err) => (StatusCode::NOT_FOUND, err.to_string()),
            CasitaError::Transport(err) => {
                tracing::error!(error = %err, "transport error");
                (
                    StatusCode::BAD_GATEWAY,
                    "command transport unavailable".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
