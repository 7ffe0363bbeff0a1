use axum::http::StatusCode;
use thiserror::Error;

/// Failures talking to the remote mood webhooks.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("webhook answered with status {status}")]
    Status { status: u16 },

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("webhook returned no record")]
    EmptyResponse,
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
