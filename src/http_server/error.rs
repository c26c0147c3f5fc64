//! HTTP error mapping
//!
//! Every handler returns [`ApiResult`]. Client errors are echoed to the caller;
//! server errors are logged and reported with a generic message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::auth::AuthError;
use crate::store::StoreError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Missing authorization header")]
    MissingToken,
}

impl ApiError {
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Auth(e) => e.status_code(),
            ApiError::Store(e) => e.status_code(),
            ApiError::MissingToken => 401,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.status_code();
        let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = if status.is_server_error() {
            error!(error = %self, "request failed");
            "Internal server error".to_string()
        } else {
            warn!(error = %self, code, "request rejected");
            self.to_string()
        };

        (status, Json(ErrorResponse { error: message, code })).into_response()
    }
}
