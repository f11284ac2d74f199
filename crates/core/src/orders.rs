//! Placed orders and the in-memory order log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::CartItem;
use crate::checkout::PendingOrder;
use crate::types::{OrderId, OrderStatus, PhoneNumber, Price, ShippingZone};

/// An order accepted by the order gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub customer_name: String,
    pub customer_phone: PhoneNumber,
    pub address: String,
    pub items: Vec<CartItem>,
    pub subtotal: Price,
    pub shipping: Price,
    pub total: Price,
    pub status: OrderStatus,
    pub date: DateTime<Utc>,
    pub shipping_zone: ShippingZone,
}

impl Order {
    /// Turn a validated submission into a pending order.
    #[must_use]
    pub fn place(id: OrderId, pending: PendingOrder, date: DateTime<Utc>) -> Self {
        let PendingOrder {
            customer,
            zone,
            items,
            quote,
        } = pending;
        Self {
            id,
            customer_name: customer.name,
            customer_phone: customer.phone,
            address: customer.address,
            items,
            subtotal: quote.subtotal,
            shipping: quote.shipping.unwrap_or(zone.price),
            total: quote.total,
            status: OrderStatus::Pending,
            date,
            shipping_zone: zone,
        }
    }

    /// Number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |n, item| n.saturating_add(item.quantity))
    }
}

/// Errors from order log updates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    /// No order with this id.
    #[error("order not found: {0}")]
    NotFound(OrderId),
}

/// Orders recorded since startup, newest first.
#[derive(Debug, Clone, Default)]
pub struct OrderLog {
    orders: Vec<Order>,
}

impl OrderLog {
    #[must_use]
    pub const fn new() -> Self {
        Self { orders: Vec::new() }
    }

    pub fn record(&mut self, order: Order) {
        self.orders.insert(0, order);
    }

    /// Change the fulfilment status of a recorded order, returning the
    /// updated order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NotFound`] if no order has this id.
    pub fn set_status(&mut self, id: &OrderId, status: OrderStatus) -> Result<Order, OrderError> {
        let order = self
            .orders
            .iter_mut()
            .find(|o| o.id == *id)
            .ok_or_else(|| OrderError::NotFound(id.clone()))?;
        order.status = status;
        Ok(order.clone())
    }

    #[must_use]
    pub fn list(&self) -> &[Order] {
        &self.orders
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
