use std::sync::Arc;

use axum::{
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use validator::Validate;

use crate::{
    db::{kycdb::KycExt, providerdb::ProviderExt},
    dtos::{
        common::ApiResponse,
        providerdtos::{UpdateAvailabilityDto, UploadKycDocumentDto},
    },
    error::HttpError,
    middleware::JWTAuthMiddeware,
    models::providermodel::ServiceProvider,
    AppState,
};

pub fn provider_handler() -> Router {
    Router::new()
        .route("/me", get(get_my_provider_profile))
        .route("/availability", put(update_availability))
        .route("/kyc", post(upload_kyc_document))
        .route("/kyc", get(get_my_kyc_documents))
}

/// Resolve the calling user's provider record or 404.
pub async fn require_provider(
    app_state: &AppState,
    auth: &JWTAuthMiddeware,
) -> Result<ServiceProvider, HttpError> {
    app_state
        .db_client
        .get_provider_by_user(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Provider profile not found"))
}

pub async fn get_my_provider_profile(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let provider = require_provider(&app_state, &auth).await?;

    Ok(Json(ApiResponse::success(
        "Provider profile fetched successfully",
        provider,
    )))
}

pub async fn update_availability(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<UpdateAvailabilityDto>,
) -> Result<impl IntoResponse, HttpError> {
    let provider = require_provider(&app_state, &auth).await?;

    let updated = app_state
        .db_client
        .update_provider_availability(provider.id, body.is_available)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "Availability updated successfully",
        updated,
    )))
}

pub async fn upload_kyc_document(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<UploadKycDocumentDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let provider = require_provider(&app_state, &auth).await?;

    let document = app_state
        .kyc_service
        .submit_document(&provider, body.document_type, body.file_url)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(ApiResponse::success(
        "Document uploaded successfully",
        document,
    )))
}

pub async fn get_my_kyc_documents(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let provider = require_provider(&app_state, &auth).await?;

    let documents = app_state
        .db_client
        .get_kyc_documents_for_provider(provider.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "Documents fetched successfully",
        documents,
    )))
}
