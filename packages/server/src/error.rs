use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Failures of a [`Generator`](crate::Generator)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneratorError {
    #[error("Generator unavailable: {0}")]
    Unavailable(String),

    #[error("Generation interrupted: {0}")]
    Interrupted(String),
}

/// Why a generation request did not start streaming
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("Prompt is required")]
    MissingPrompt,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error(transparent)]
    Generator(#[from] GeneratorError),
}

impl RequestError {
    pub fn status(&self) -> StatusCode {
        match self {
            RequestError::MissingPrompt | RequestError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            RequestError::Generator(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        let body = match &self {
            RequestError::InvalidBody(detail) => json!({
                "error": "Invalid request body",
                "detail": detail,
            }),
            other => json!({ "error": other.to_string() }),
        };
        (self.status(), Json(body)).into_response()
    }
}
