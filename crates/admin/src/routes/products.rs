//! Product management route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use souq_core::{Product, ProductDraft, ProductId};

use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::state::AdminState;

/// List every product, newest first.
#[instrument(skip(state))]
pub async fn index(_admin: RequireAdmin, State(state): State<AdminState>) -> Result<Json<Vec<Product>>> {
    let products = state.shop().read()?.catalog.products().to_vec();
    Ok(Json(products))
}

/// Create a product from a draft.
#[instrument(skip(state, draft))]
pub async fn create(
    _admin: RequireAdmin,
    State(state): State<AdminState>,
    Json(draft): Json<ProductDraft>,
) -> Result<(StatusCode, Json<Product>)> {
    let product = state.shop().write()?.catalog.create(draft)?;
    tracing::info!(product_id = %product.id, name = %product.name, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// Replace a product with a draft, keeping its id.
#[instrument(skip(state, draft))]
pub async fn update(
    _admin: RequireAdmin,
    State(state): State<AdminState>,
    Path(id): Path<ProductId>,
    Json(draft): Json<ProductDraft>,
) -> Result<Json<Product>> {
    let product = state.shop().write()?.catalog.update(&id, draft)?;
    tracing::info!(product_id = %product.id, "Product updated");
    Ok(Json(product))
}

/// Delete a product.
#[instrument(skip(state))]
pub async fn delete(
    _admin: RequireAdmin,
    State(state): State<AdminState>,
    Path(id): Path<ProductId>,
) -> Result<StatusCode> {
    let removed = state.shop().write()?.catalog.delete(&id)?;
    tracing::info!(product_id = %removed.id, "Product deleted");
    Ok(StatusCode::NO_CONTENT)
}
