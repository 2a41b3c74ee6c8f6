use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::domains::auth::{slack_login, LoginError};
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
pub struct SlackLoginQuery {
    code: Option<String>,
}

/// Slack redirects here with `?code=` after the user approved the sign-in.
pub async fn slack_login_handler(
    Extension(state): Extension<AppState>,
    Query(query): Query<SlackLoginQuery>,
) -> Response {
    match slack_login(query.code.as_deref(), &state.deps).await {
        Ok(user) => Json(json!({ "result": "success", "slackInfo": user })).into_response(),
        Err(err) => {
            tracing::warn!(error = %err, source = ?std::error::Error::source(&err), "Slack login failed");
            let status =
                StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, err.to_string()).into_response()
        }
    }
}

/// Send the browser to Slack's "Sign in with Slack" page.
pub async fn slack_authorize_handler(Extension(state): Extension<AppState>) -> Response {
    match &state.deps.slack_auth {
        Some(slack) => Redirect::to(&slack.authorize_url()).into_response(),
        None => (
            StatusCode::BAD_REQUEST,
            LoginError::SlackNotConfigured.to_string(),
        )
            .into_response(),
    }
}
