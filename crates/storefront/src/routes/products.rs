//! Catalog browsing route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use souq_core::{Category, CategoryFilter, Product, ProductId, ShippingZone};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Query parameters for the product listing.
#[derive(Debug, Deserialize)]
pub struct ProductsQuery {
    /// Category name, or `all`.
    pub category: Option<String>,
}

/// Category list for the filter bar.
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = state.shop().read()?.catalog.categories().to_vec();
    Ok(Json(categories))
}

/// Product listing, optionally filtered by category.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> Result<Json<Vec<Product>>> {
    let filter = CategoryFilter::from_query(query.category.as_deref());
    let products = state
        .shop()
        .read()?
        .catalog
        .filter(&filter)
        .cloned()
        .collect();
    Ok(Json(products))
}

/// Product detail.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Product>> {
    let id = ProductId::new(id);
    state
        .shop()
        .read()?
        .catalog
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

/// Shipping zones for the wilaya selector.
#[instrument(skip(state))]
pub async fn shipping_zones(State(state): State<AppState>) -> Result<Json<Vec<ShippingZone>>> {
    let zones = state.shop().read()?.zones.list().to_vec();
    Ok(Json(zones))
}
