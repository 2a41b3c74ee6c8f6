use axum::{
    extract::Extension,
    response::{IntoResponse, Response},
    Json,
};

use super::ApiError;
use crate::domains::content;
use crate::server::app::AppState;

pub async fn opportunities_handler(
    Extension(state): Extension<AppState>,
) -> Result<Response, ApiError> {
    let deps = &state.deps;
    let items = content::visible_opportunities(deps.data_source.as_ref(), &deps.env).await?;
    Ok(Json(items).into_response())
}

pub async fn events_handler(Extension(state): Extension<AppState>) -> Result<Response, ApiError> {
    let deps = &state.deps;
    let items = content::visible_events(deps.data_source.as_ref(), &deps.env).await?;
    Ok(Json(items).into_response())
}

pub async fn users_handler(Extension(state): Extension<AppState>) -> Result<Response, ApiError> {
    let items = content::all_users(state.deps.data_source.as_ref()).await?;
    Ok(Json(items).into_response())
}

pub async fn partners_handler(Extension(state): Extension<AppState>) -> Result<Response, ApiError> {
    let items = content::all_partners(state.deps.data_source.as_ref()).await?;
    Ok(Json(items).into_response())
}

pub async fn videos_handler(Extension(state): Extension<AppState>) -> Result<Response, ApiError> {
    let items = content::all_videos(state.deps.data_source.as_ref()).await?;
    Ok(Json(items).into_response())
}
