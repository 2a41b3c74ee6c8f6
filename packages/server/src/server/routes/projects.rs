use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::ApiError;
use crate::domains::projects::{project_detail, published_project_slugs, visible_projects};
use crate::server::app::AppState;

pub async fn projects_handler(
    Extension(state): Extension<AppState>,
) -> Result<Response, ApiError> {
    let deps = &state.deps;
    let projects = visible_projects(deps.data_source.as_ref(), &deps.env).await?;
    Ok(Json(projects).into_response())
}

pub async fn project_slugs_handler(
    Extension(state): Extension<AppState>,
) -> Result<Response, ApiError> {
    let slugs = published_project_slugs(state.deps.data_source.as_ref()).await?;
    Ok(Json(slugs).into_response())
}

pub async fn project_detail_handler(
    Extension(state): Extension<AppState>,
    Path(slug): Path<String>,
) -> Result<Response, ApiError> {
    let deps = &state.deps;
    match project_detail(deps.data_source.as_ref(), &deps.env, &slug).await? {
        Some(detail) => Ok(Json(detail).into_response()),
        None => {
            tracing::debug!(slug = %slug, "Project not found");
            Ok(StatusCode::NOT_FOUND.into_response())
        }
    }
}
