use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dtos::{
        common::ApiResponse,
        requestdtos::{CreateRequestDto, UpdateStatusDto},
    },
    error::HttpError,
    handler::provider::require_provider,
    middleware::JWTAuthMiddeware,
    AppState,
};

pub fn requests_handler() -> Router {
    Router::new()
        .route("/", post(create_request))
        .route("/mine", get(get_my_requests))
        .route("/feed", get(get_provider_feed))
        .route("/:request_id/tracking", get(get_tracking_history))
        .route("/:request_id/accept", put(accept_job))
        .route("/:request_id/status", put(update_status))
        .route("/:request_id/cancel", put(cancel_request))
}

pub async fn create_request(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateRequestDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let request = app_state
        .request_service
        .create_request(auth.user.id, body)
        .await
        .map_err(HttpError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Service request created", request)),
    ))
}

pub async fn get_my_requests(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let requests = app_state
        .request_service
        .list_own_requests(auth.user.id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::success(
        "Requests fetched successfully",
        requests,
    )))
}

pub async fn get_provider_feed(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let provider = require_provider(&app_state, &auth).await?;

    let requests = app_state
        .request_service
        .provider_feed(&provider)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::success(
        "Jobs fetched successfully",
        requests,
    )))
}

pub async fn get_tracking_history(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(request_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let entries = app_state
        .request_service
        .tracking_history(auth.user.id, request_id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::success(
        "Tracking history fetched successfully",
        entries,
    )))
}

pub async fn accept_job(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(request_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let provider = require_provider(&app_state, &auth).await?;

    let request = app_state
        .request_service
        .accept_job(&provider, request_id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::success("Job accepted", request)))
}

pub async fn update_status(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(request_id): Path<Uuid>,
    Json(body): Json<UpdateStatusDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let provider = require_provider(&app_state, &auth).await?;

    let request = app_state
        .request_service
        .advance_status(&provider, request_id, body.status, body.note)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::success("Status updated", request)))
}

pub async fn cancel_request(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(request_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let request = app_state
        .request_service
        .cancel_request(auth.user.id, request_id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::success("Request cancelled", request)))
}
