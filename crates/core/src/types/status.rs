//! Status enums for various entities.

use serde::{Deserialize, Serialize};

/// Fulfillment status of a placed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Shipped,
    Delivered,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Shipped => write!(f, "shipped"),
            Self::Delivered => write!(f, "delivered"),
        }
    }
}

/// Step of the cart drawer's checkout flow.
///
/// ```text
/// Cart ──start──▶ Checkout ──submit──▶ Submitting ──accepted──▶ Success
///   ▲               │  ▲                    │
///   └─────back──────┘  └──────rejected──────┘
/// ```
///
/// Dismissing the drawer always returns to `Cart`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    /// Reviewing cart contents.
    #[default]
    Cart,
    /// Filling in delivery details.
    Checkout,
    /// Order handed to the order gateway, waiting for the outcome.
    Submitting,
    /// Order accepted.
    Success,
}

impl std::fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cart => write!(f, "cart"),
            Self::Checkout => write!(f, "checkout"),
            Self::Submitting => write!(f, "submitting"),
            Self::Success => write!(f, "success"),
        }
    }
}
