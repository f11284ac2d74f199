//! AI copywriting route handlers.
//!
//! Both endpoints answer 200 with fallback text when generation fails; only
//! a missing product name (400) or a generation already in flight (409) is
//! reported as an error.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::state::AdminState;

/// Description request from the product form.
#[derive(Debug, Deserialize)]
pub struct DescriptionRequest {
    #[serde(default)]
    pub name: String,
    pub category: Option<String>,
    pub features: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DescriptionResponse {
    pub description: String,
}

/// Marketing post request from the product list.
#[derive(Debug, Deserialize)]
pub struct MarketingPostRequest {
    pub product_name: String,
}

#[derive(Debug, Serialize)]
pub struct MarketingPostResponse {
    pub post: String,
}

/// Generate a product description.
#[instrument(skip(state))]
pub async fn description(
    _admin: RequireAdmin,
    State(state): State<AdminState>,
    Json(request): Json<DescriptionRequest>,
) -> Result<Json<DescriptionResponse>> {
    let description = state
        .copywriter()
        .generate_description(
            &request.name,
            request.category.as_deref(),
            request.features.as_deref(),
        )
        .await?;
    Ok(Json(DescriptionResponse { description }))
}

/// Suggest a social media post for a product.
#[instrument(skip(state))]
pub async fn marketing_post(
    _admin: RequireAdmin,
    State(state): State<AdminState>,
    Json(request): Json<MarketingPostRequest>,
) -> Result<Json<MarketingPostResponse>> {
    let post = state
        .copywriter()
        .suggest_marketing_post(&request.product_name)
        .await?;
    Ok(Json(MarketingPostResponse { post }))
}
