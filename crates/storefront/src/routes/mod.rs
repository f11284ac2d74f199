//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness
//! GET  /health/ready               - Readiness (shop lock healthy)
//!
//! # Catalog
//! GET  /api/categories             - Category list
//! GET  /api/products?category=     - Product listing (name or "all")
//! GET  /api/products/{id}          - Product detail
//! GET  /api/shipping-zones         - Zones for the wilaya selector
//!
//! # Cart (session)
//! GET  /api/cart                   - Cart view
//! POST /api/cart/add               - Add a variant, opens the drawer
//! POST /api/cart/remove            - Remove every variant of a product
//! POST /api/cart/remove-line       - Remove one line
//! POST /api/cart/clear             - Empty the cart
//! POST /api/cart/toggle            - Open/close the drawer
//!
//! # Checkout (session)
//! GET  /api/checkout               - Step, form and quote
//! POST /api/checkout/start         - Cart -> Checkout
//! POST /api/checkout/back          - Checkout -> Cart
//! PUT  /api/checkout/form          - Update the delivery form
//! POST /api/checkout/submit        - Validate and place the order
//! POST /api/checkout/close         - Dismiss the drawer
//!
//! # Admin
//! /api/admin/...                   - See `souq_admin::routes`
//! ```

pub mod cart;
pub mod checkout;
pub mod health;
pub mod products;

use axum::{
    Router,
    body::Body,
    http::Request,
    middleware,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;
use tower_sessions::MemoryStore;

use crate::middleware::{create_session_layer, request_id_middleware};
use crate::state::AppState;

/// Create the JSON API router, including the admin API under `/admin`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Catalog
        .route("/categories", get(products::categories))
        .route("/products", get(products::index))
        .route("/products/{id}", get(products::show))
        .route("/shipping-zones", get(products::shipping_zones))
        // Cart
        .route("/cart", get(cart::show))
        .route("/cart/add", post(cart::add))
        .route("/cart/remove", post(cart::remove))
        .route("/cart/remove-line", post(cart::remove_line))
        .route("/cart/clear", post(cart::clear))
        .route("/cart/toggle", post(cart::toggle))
        // Checkout
        .route("/checkout", get(checkout::show))
        .route("/checkout/start", post(checkout::start))
        .route("/checkout/back", post(checkout::back))
        .route("/checkout/form", put(checkout::update_form))
        .route("/checkout/submit", post(checkout::submit))
        .route("/checkout/close", post(checkout::close))
        // Admin
        .nest("/admin", souq_admin::router())
}

/// Build the full application: routes, session layer, request IDs and
/// request tracing.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(MemoryStore::default(), state.config());

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api", api_routes())
        .layer(session_layer)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}
