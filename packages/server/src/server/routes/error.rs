use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::kernel::DataSourceError;

/// Upstream content failure surfaced to the caller as 502 Bad Gateway.
#[derive(Debug)]
pub struct ApiError(pub DataSourceError);

impl From<DataSourceError> for ApiError {
    fn from(err: DataSourceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "Data source request failed");
        (
            StatusCode::BAD_GATEWAY,
            Json(json!({ "error": self.0.to_string() })),
        )
            .into_response()
    }
}
