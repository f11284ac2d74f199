//! Session-stored shopper state.
//!
//! The cart is stored as its JSON text under [`CART_STORAGE_KEY`], so the
//! stored value has the same shape no matter which session store is used.
//! Cart writes are best-effort: a failure is logged and the request carries
//! on with the in-memory cart.

use tower_sessions::Session;

use souq_core::{CART_STORAGE_KEY, Cart, CheckoutFlow};

/// Session keys for shopper data.
pub mod keys {
    pub use souq_core::CART_STORAGE_KEY as CART;

    /// Key for the cart drawer and checkout state.
    pub const CHECKOUT: &str = "souq-checkout";
}

/// Restore the cart from the session.
///
/// A missing entry is an empty cart. A malformed entry is logged and also
/// gives an empty cart.
///
/// # Errors
///
/// Returns an error if the session store cannot be read.
pub async fn load_cart(session: &Session) -> Result<Cart, tower_sessions::session::Error> {
    let Some(raw) = session.get::<String>(CART_STORAGE_KEY).await? else {
        return Ok(Cart::new());
    };

    Ok(Cart::from_json(&raw).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Discarding stored cart");
        Cart::new()
    }))
}

/// Persist the cart to the session, logging instead of failing.
pub async fn save_cart(session: &Session, cart: &Cart) {
    let raw = match cart.to_json() {
        Ok(raw) => raw,
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode cart");
            return;
        }
    };

    if let Err(e) = session.insert(CART_STORAGE_KEY, raw).await {
        tracing::error!(error = %e, "Failed to store cart");
    }
}

/// Read the drawer and checkout state; a missing entry is a closed drawer.
///
/// # Errors
///
/// Returns an error if the session store cannot be read.
pub async fn load_checkout(
    session: &Session,
) -> Result<CheckoutFlow, tower_sessions::session::Error> {
    Ok(session
        .get::<CheckoutFlow>(keys::CHECKOUT)
        .await?
        .unwrap_or_default())
}

/// Store the drawer and checkout state.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn save_checkout(
    session: &Session,
    flow: &CheckoutFlow,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CHECKOUT, flow).await
}
