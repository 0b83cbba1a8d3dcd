use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use serde_json::json;
use thiserror::Error;

use crate::api::envelope::InvocationResponse;

/// Everything that can go wrong while serving one invocation.
///
/// The variants only exist for logging; callers always see the same
/// 500 response carrying the error text.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Body(#[from] BytesRejection),

    #[error("request body is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("missing query parameter `{0}`")]
    MissingParameter(&'static str),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl HandlerError {
    pub fn into_response(self) -> InvocationResponse {
        match &self {
            HandlerError::Json(e) => tracing::warn!("invalid request body: {}", e),
            HandlerError::Body(e) => tracing::warn!("failed to read request body: {}", e),
            HandlerError::Utf8(e) => tracing::warn!("request body is not UTF-8: {}", e),
            HandlerError::MissingParameter(name) => {
                tracing::warn!("missing query parameter: {}", name)
            }
            HandlerError::Store(e) => tracing::error!("store error: {:#}", e),
        }

        InvocationResponse::json(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "error": self.to_string() }),
        )
    }
}
