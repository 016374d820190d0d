use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use nms_api_types::{NewsPayload, PageQuery, SearchQuery};

use super::error::ApiError;
use super::state::ApiState;

pub async fn list_news(
    State(state): State<ApiState>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let items = state.news.list(query.page, query.limit).await?;
    Ok(Json(items))
}

pub async fn search_news(
    State(state): State<ApiState>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let term = query.term.unwrap_or_default();
    let items = state.news.search(&term, query.page, query.limit).await?;
    Ok(Json(items))
}

pub async fn get_news(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let aggregate = state.news.read_by_id(&id, query.page, query.limit).await?;
    Ok(Json(aggregate))
}

pub async fn create_news(
    State(state): State<ApiState>,
    Json(payload): Json<NewsPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let aggregate = state.news.create(payload).await?;
    Ok((StatusCode::CREATED, Json(aggregate)))
}

/// The path id always wins over an id in the body.
pub async fn update_news(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(mut payload): Json<NewsPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload.id = Some(id);
    let updated = state.news.update(payload).await?;
    Ok(Json(updated))
}

pub async fn delete_news(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.news.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
