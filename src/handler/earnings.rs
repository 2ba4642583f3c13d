use std::sync::Arc;

use axum::{response::IntoResponse, routing::get, Extension, Json, Router};

use crate::{
    db::earningsdb::EarningsExt,
    dtos::{common::ApiResponse, requestdtos::EarningsSummaryDto},
    error::HttpError,
    handler::provider::require_provider,
    middleware::JWTAuthMiddeware,
    AppState,
};

pub fn earnings_handler() -> Router {
    Router::new().route("/", get(get_my_earnings))
}

pub async fn get_my_earnings(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let provider = require_provider(&app_state, &auth).await?;

    let earnings = app_state
        .db_client
        .get_earnings_for_provider(provider.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ApiResponse::success(
        "Earnings fetched successfully",
        EarningsSummaryDto::from_earnings(earnings),
    )))
}
