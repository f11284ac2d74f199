//! Shipping zone management route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use souq_core::{ShippingZone, ShippingZoneDraft, ZoneId};

use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::state::AdminState;

/// List every shipping zone.
#[instrument(skip(state))]
pub async fn index(
    _admin: RequireAdmin,
    State(state): State<AdminState>,
) -> Result<Json<Vec<ShippingZone>>> {
    let zones = state.shop().read()?.zones.list().to_vec();
    Ok(Json(zones))
}

/// Add a shipping zone.
#[instrument(skip(state))]
pub async fn create(
    _admin: RequireAdmin,
    State(state): State<AdminState>,
    Json(draft): Json<ShippingZoneDraft>,
) -> Result<(StatusCode, Json<ShippingZone>)> {
    let zone = state.shop().write()?.zones.add(draft)?;
    tracing::info!(zone_id = %zone.id, wilaya = %zone.wilaya, price = %zone.price, "Shipping zone added");
    Ok((StatusCode::CREATED, Json(zone)))
}

/// Delete a shipping zone.
#[instrument(skip(state))]
pub async fn delete(
    _admin: RequireAdmin,
    State(state): State<AdminState>,
    Path(id): Path<ZoneId>,
) -> Result<StatusCode> {
    let removed = state.shop().write()?.zones.delete(&id)?;
    tracing::info!(zone_id = %removed.id, wilaya = %removed.wilaya, "Shipping zone deleted");
    Ok(StatusCode::NO_CONTENT)
}
