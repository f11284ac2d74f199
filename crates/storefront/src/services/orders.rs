//! Order submission.
//!
//! Checkout hands a validated [`PendingOrder`] to an [`OrderGateway`] and
//! applies whatever [`SubmissionOutcome`] comes back. The shop has no
//! payment or fulfilment backend, so the only gateway is
//! [`SimulatedOrderGateway`], which waits a fixed delay, records the order
//! in the shop's order log and always accepts.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tracing::instrument;

use souq_core::{Order, OrderId, PendingOrder, SharedShop, SubmissionOutcome};

/// Reason given when the order log cannot be written.
pub const ORDER_LOG_UNAVAILABLE: &str = "تعذر تسجيل الطلب، يرجى المحاولة مرة أخرى.";

/// Destination for checkout submissions.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Submit an order and report whether it was accepted.
    async fn submit(&self, order: PendingOrder) -> SubmissionOutcome;
}

/// Gateway that accepts every order after a delay.
#[derive(Debug, Clone)]
pub struct SimulatedOrderGateway {
    shop: SharedShop,
    delay: Duration,
}

impl SimulatedOrderGateway {
    #[must_use]
    pub const fn new(shop: SharedShop, delay: Duration) -> Self {
        Self { shop, delay }
    }
}

#[async_trait]
impl OrderGateway for SimulatedOrderGateway {
    #[instrument(skip(self, order), fields(customer = %order.customer.name, total = %order.quote.total))]
    async fn submit(&self, order: PendingOrder) -> SubmissionOutcome {
        tokio::time::sleep(self.delay).await;

        tracing::info!(
            cart = ?order.items,
            customer = ?order.customer,
            total = %order.quote.total,
            "Order submitted"
        );

        let order_id = OrderId::generate();
        let placed = Order::place(order_id.clone(), order, Utc::now());

        match self.shop.write() {
            Ok(mut shop) => {
                shop.orders.record(placed);
                tracing::info!(order_id = %order_id, "Order recorded");
                SubmissionOutcome::Accepted { order_id }
            }
            Err(e) => {
                tracing::error!(error = %e, "Order log unavailable");
                SubmissionOutcome::Rejected {
                    reason: ORDER_LOG_UNAVAILABLE.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use souq_core::{Cart, CheckoutFlow, CheckoutForm, Shop};

    use super::*;

    fn pending(shop: &SharedShop) -> PendingOrder {
        let guard = shop.read().unwrap();
        let mut cart = Cart::new();
        let product = guard.catalog.products().first().cloned().unwrap();
        cart.add(&product, None, None);

        let mut flow = CheckoutFlow::new();
        flow.begin_checkout(&cart).unwrap();
        flow.update_form(CheckoutForm {
            name: "أمين".to_string(),
            phone: "0555123456".to_string(),
            wilaya_id: "1".to_string(),
            address: "حي النصر".to_string(),
        })
        .unwrap();
        flow.begin_submit(&cart, &guard.zones).unwrap()
    }

    #[tokio::test]
    async fn test_simulated_gateway_records_order() {
        let shop = SharedShop::new(Shop::seeded());
        let gateway = SimulatedOrderGateway::new(shop.clone(), Duration::ZERO);
        let order = pending(&shop);
        let total = order.quote.total;

        let outcome = gateway.submit(order).await;

        let SubmissionOutcome::Accepted { order_id } = outcome else {
            panic!("expected accepted outcome");
        };
        let guard = shop.read().unwrap();
        assert_eq!(guard.orders.len(), 1);
        let recorded = guard.orders.list().first().unwrap();
        assert_eq!(recorded.id, order_id);
        assert_eq!(recorded.total, total);
        assert_eq!(recorded.customer_name, "أمين");
    }

    #[tokio::test]
    async fn test_simulated_gateway_waits_for_delay() {
        let shop = SharedShop::new(Shop::seeded());
        let gateway = SimulatedOrderGateway::new(shop.clone(), Duration::from_millis(50));
        let order = pending(&shop);

        let started = tokio::time::Instant::now();
        gateway.submit(order).await;

        assert!(started.elapsed() >= Duration::from_millis(50));
    }
}
