use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;

use crate::config::VercelDeploymentType;
use crate::server::app::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    status: String,
    data_source: &'static str,
    use_local_data: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    deployment: Option<VercelDeploymentType>,
    slack_login: bool,
}

/// Health check endpoint
///
/// Reports which data source the process was wired with. Does not call
/// upstream services; a page build notices their failures on its own.
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let deps = &state.deps;

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            data_source: deps.data_source.name(),
            use_local_data: deps.env.use_local_data,
            deployment: deps.env.vercel_deployment_type,
            slack_login: deps.slack_auth.is_some() && deps.session_store.is_some(),
        }),
    )
}
