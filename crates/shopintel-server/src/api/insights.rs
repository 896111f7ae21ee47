use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::Deserialize;
use shopintel_core::StoreProfile;
use shopintel_scraper::{ScraperError, StoreProfiler};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct InsightsRequest {
    #[serde(default)]
    pub website_url: Option<String>,
}

pub(super) async fn fetch_insights(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<InsightsRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<StoreProfile>>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "rejected insights request body");
        ApiError::new(req_id.0.clone(), "validation_error", rejection.body_text())
    })?;

    let website_url = request
        .website_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .ok_or_else(|| {
            ApiError::new(req_id.0.clone(), "validation_error", "website_url is required")
        })?;

    let profiler =
        StoreProfiler::new(state.client.clone()).with_content_max_chars(state.content_max_chars);

    let profile = profiler
        .profile(website_url)
        .await
        .map_err(|e| map_scraper_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: profile,
        meta: ResponseMeta::new(req_id.0),
    }))
}

fn map_scraper_error(request_id: String, error: &ScraperError) -> ApiError {
    match error {
        ScraperError::Unreachable { url } => {
            tracing::warn!(url, "insights request for unreachable store");
            ApiError::new(
                request_id,
                "store_unreachable",
                format!("could not reach store at {url}"),
            )
        }
        other => {
            tracing::error!(error = %other, "insights request failed");
            ApiError::new(request_id, "internal_error", "failed to build store profile")
        }
    }
}
