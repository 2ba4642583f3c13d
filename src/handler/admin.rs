use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    routing::{get, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{
        kycdb::KycExt, providerdb::ProviderExt, requestdb::RequestExt, userdb::UserExt,
    },
    dtos::{
        common::{ApiResponse, PageQueryDto},
        providerdtos::{ProviderFilterQueryDto, ReviewKycDocumentDto, SetBlockedDto},
        requestdtos::AdminStatsDto,
        userdtos::FilterUserDto,
    },
    error::HttpError,
    middleware::JWTAuthMiddeware,
    models::requestmodel::RequestStatus,
    AppState,
};

pub fn admin_handler() -> Router {
    Router::new()
        .route("/users", get(get_users))
        .route("/users/:user_id/blocked", put(set_user_blocked))
        .route("/providers", get(get_providers))
        .route("/providers/:provider_id/blocked", put(set_provider_blocked))
        .route("/kyc/pending", get(get_pending_kyc))
        .route("/kyc/:document_id/review", put(review_kyc_document))
        .route("/stats", get(get_stats))
}

pub async fn get_users(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<PageQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    query
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let (limit, offset) = query.limit_offset();
    let users = app_state
        .db_client
        .get_users(limit, offset)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "Users fetched successfully",
        FilterUserDto::filter_users(&users),
    )))
}

pub async fn set_user_blocked(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<SetBlockedDto>,
) -> Result<impl IntoResponse, HttpError> {
    let user = app_state
        .db_client
        .set_user_blocked(user_id, body.blocked)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "User block status updated",
        FilterUserDto::filter_user(&user),
    )))
}

pub async fn get_providers(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<ProviderFilterQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    let page = PageQueryDto {
        page: query.page,
        limit: query.limit,
    };
    page.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;
    let (limit, offset) = page.limit_offset();

    let providers = app_state
        .db_client
        .get_providers(query.status, limit, offset)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "Providers fetched successfully",
        providers,
    )))
}

pub async fn set_provider_blocked(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(provider_id): Path<Uuid>,
    Json(body): Json<SetBlockedDto>,
) -> Result<impl IntoResponse, HttpError> {
    let provider = app_state
        .db_client
        .set_provider_blocked(provider_id, body.blocked)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "Provider block status updated",
        provider,
    )))
}

pub async fn get_pending_kyc(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<PageQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    query
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let (limit, offset) = query.limit_offset();
    let documents = app_state
        .db_client
        .get_pending_kyc_documents(limit, offset)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "Pending documents fetched successfully",
        documents,
    )))
}

pub async fn review_kyc_document(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(document_id): Path<Uuid>,
    Json(body): Json<ReviewKycDocumentDto>,
) -> Result<impl IntoResponse, HttpError> {
    let (document, provider) = app_state
        .kyc_service
        .review_document(document_id, body.status, auth.user.id)
        .await
        .map_err(HttpError::from)?;

    app_state
        .notification_service
        .notify_kyc_reviewed(provider.user_id, &document)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::success(
        "Document reviewed",
        serde_json::json!({
            "document": document,
            "provider": provider,
        }),
    )))
}

pub async fn get_stats(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let db = &app_state.db_client;

    let users = db
        .user_count()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    let providers = db
        .provider_count()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    let requests = db
        .request_count()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    let pending_requests = db
        .request_count_by_status(RequestStatus::Pending)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    let completed_requests = db
        .request_count_by_status(RequestStatus::Completed)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "Stats fetched successfully",
        AdminStatsDto {
            users,
            providers,
            requests,
            pending_requests,
            completed_requests,
        },
    )))
}
