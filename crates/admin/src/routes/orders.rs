//! Order log route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use tracing::instrument;

use souq_core::{Order, OrderId, OrderStatus};

use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::state::AdminState;

/// Status change request body.
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

/// Orders placed since startup, newest first.
#[instrument(skip(state))]
pub async fn index(_admin: RequireAdmin, State(state): State<AdminState>) -> Result<Json<Vec<Order>>> {
    let orders = state.shop().read()?.orders.list().to_vec();
    Ok(Json(orders))
}

/// Mark an order as shipped or delivered (or back to pending).
#[instrument(skip(state))]
pub async fn update_status(
    _admin: RequireAdmin,
    State(state): State<AdminState>,
    Path(id): Path<OrderId>,
    Json(update): Json<StatusUpdate>,
) -> Result<Json<Order>> {
    let order = state
        .shop()
        .write()?
        .orders
        .set_status(&id, update.status)?;
    tracing::info!(order_id = %order.id, status = %order.status, "Order status updated");
    Ok(Json(order))
}
