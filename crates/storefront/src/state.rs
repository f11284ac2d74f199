//! Application state shared across handlers.

use std::sync::Arc;

use axum::extract::FromRef;

use souq_admin::AdminState;
use souq_admin::claude::ClaudeError;
use souq_core::{SharedShop, Shop};

use crate::config::StorefrontConfig;
use crate::services::{OrderGateway, SimulatedOrderGateway};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. It owns the single [`Shop`]
/// (catalog, shipping zones, order log); per-shopper state lives in the
/// session.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    shop: SharedShop,
    admin: AdminState,
    orders: Arc<dyn OrderGateway>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.inner.config)
            .field("admin", &self.inner.admin)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Create the application state with a freshly seeded shop and the
    /// simulated order gateway.
    ///
    /// # Errors
    ///
    /// Returns an error if the Claude client cannot be created.
    pub fn new(config: StorefrontConfig) -> Result<Self, ClaudeError> {
        let shop = SharedShop::new(Shop::seeded());
        let admin = AdminState::from_config(shop.clone(), &config.admin)?;
        let orders = Arc::new(SimulatedOrderGateway::new(shop.clone(), config.order_delay));
        Ok(Self::with_parts(config, shop, admin, orders))
    }

    /// Assemble state from explicit parts.
    #[must_use]
    pub fn with_parts(
        config: StorefrontConfig,
        shop: SharedShop,
        admin: AdminState,
        orders: Arc<dyn OrderGateway>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                shop,
                admin,
                orders,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the shared shop.
    #[must_use]
    pub fn shop(&self) -> &SharedShop {
        &self.inner.shop
    }

    /// Get a reference to the admin handler state.
    #[must_use]
    pub fn admin(&self) -> &AdminState {
        &self.inner.admin
    }

    /// Get the order gateway used by checkout.
    #[must_use]
    pub fn orders(&self) -> Arc<dyn OrderGateway> {
        Arc::clone(&self.inner.orders)
    }
}

impl FromRef<AppState> for AdminState {
    fn from_ref(state: &AppState) -> Self {
        state.admin().clone()
    }
}
