//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! Mounted by the host application (the storefront nests it under
//! `/api/admin`).
//!
//! ```text
//! # Session gate
//! GET    /session                  - Current gate state
//! POST   /login/open               - Open the password prompt
//! POST   /login                    - Submit the password
//! POST   /login/cancel             - Close the prompt
//! POST   /logout                   - Leave admin mode
//!
//! # Catalog (admin only)
//! GET    /products                 - Product listing
//! POST   /products                 - Create product
//! PUT    /products/{id}            - Replace product
//! DELETE /products/{id}            - Delete product
//!
//! # Shipping (admin only)
//! GET    /shipping-zones           - Zone listing
//! POST   /shipping-zones           - Add zone
//! DELETE /shipping-zones/{id}      - Delete zone
//!
//! # Orders (admin only)
//! GET    /orders                   - Orders placed since startup
//! PUT    /orders/{id}/status       - Set fulfilment status
//!
//! # AI copywriting (admin only)
//! POST   /ai/description           - Product description
//! POST   /ai/marketing-post        - Social media post
//! ```

pub mod ai;
pub mod auth;
pub mod orders;
pub mod products;
pub mod shipping;

use axum::{
    Router,
    extract::FromRef,
    routing::{delete, get, post, put},
};

use crate::state::AdminState;

/// Build the admin router for any host state that can provide an
/// [`AdminState`].
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    AdminState: FromRef<S>,
{
    Router::new()
        // Session gate
        .route("/session", get(auth::show))
        .route("/login/open", post(auth::open_prompt))
        .route("/login", post(auth::login))
        .route("/login/cancel", post(auth::cancel))
        .route("/logout", post(auth::logout))
        // Catalog
        .route("/products", get(products::index).post(products::create))
        .route(
            "/products/{id}",
            put(products::update).delete(products::delete),
        )
        // Shipping
        .route(
            "/shipping-zones",
            get(shipping::index).post(shipping::create),
        )
        .route("/shipping-zones/{id}", delete(shipping::delete))
        // Orders
        .route("/orders", get(orders::index))
        .route("/orders/{id}/status", put(orders::update_status))
        // AI copywriting
        .route("/ai/description", post(ai::description))
        .route("/ai/marketing-post", post(ai::marketing_post))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode, header},
    };
    use secrecy::SecretString;
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use tower_sessions::{MemoryStore, SessionManagerLayer};

    use souq_core::{
        Cart, CheckoutFlow, CheckoutForm, Order, OrderId, ProductId, SharedShop, Shop,
    };

    use super::*;
    use crate::services::Copywriter;
    use crate::services::copywriter::NOT_CONFIGURED;

    const PASSWORD: &str = "correct-horse";

    fn app() -> Router {
        app_with(SharedShop::new(Shop::seeded()))
    }

    fn app_with(shop: SharedShop) -> Router {
        let state = AdminState::new(shop, Copywriter::disabled(), SecretString::from(PASSWORD));
        router()
            .with_state(state)
            .layer(SessionManagerLayer::new(MemoryStore::default()).with_secure(false))
    }

    /// Sends requests through the router, carrying the session cookie.
    struct Client {
        app: Router,
        cookie: Option<String>,
    }

    impl Client {
        fn new() -> Self {
            Self::with_app(app())
        }

        const fn with_app(app: Router) -> Self {
            Self { app, cookie: None }
        }

        async fn send(&mut self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
            let mut request = Request::builder().method(method).uri(uri);
            if let Some(cookie) = &self.cookie {
                request = request.header(header::COOKIE, cookie);
            }
            let request = match body {
                Some(body) => request
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
                None => request.body(Body::empty()).unwrap(),
            };

            let response = self.app.clone().oneshot(request).await.unwrap();
            if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
                let pair = set_cookie.to_str().unwrap().split(';').next().unwrap();
                self.cookie = Some(pair.to_string());
            }

            let status = response.status();
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let value = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes)
                    .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
            };
            (status, value)
        }

        async fn login(&mut self) {
            let (status, _) = self
                .send(Method::POST, "/login", Some(json!({ "password": PASSWORD })))
                .await;
            assert_eq!(status, StatusCode::OK);
        }
    }

    #[tokio::test]
    async fn test_admin_routes_require_login() {
        let mut client = Client::new();
        for (method, uri) in [
            (Method::GET, "/products"),
            (Method::GET, "/shipping-zones"),
            (Method::GET, "/orders"),
            (Method::DELETE, "/products/1"),
        ] {
            let (status, body) = client.send(method, uri, None).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
            assert!(body["error"].is_string());
        }
    }

    #[tokio::test]
    async fn test_wrong_password_sets_login_error() {
        let mut client = Client::new();
        client.send(Method::POST, "/login/open", None).await;

        let (status, body) = client
            .send(Method::POST, "/login", Some(json!({ "password": "nope" })))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body["error"].is_string());

        let (_, gate) = client.send(Method::GET, "/session", None).await;
        assert_eq!(gate["is_admin"], false);
        assert_eq!(gate["prompt_open"], true);
        assert!(gate["login_error"].is_string());

        let (_, gate) = client.send(Method::POST, "/login/cancel", None).await;
        assert_eq!(gate["prompt_open"], false);
    }

    #[tokio::test]
    async fn test_login_then_manage_catalog() {
        let mut client = Client::new();
        client.login().await;

        let (_, gate) = client.send(Method::GET, "/session", None).await;
        assert_eq!(gate["is_admin"], true);
        assert_eq!(gate["prompt_open"], false);

        let (status, product) = client
            .send(
                Method::POST,
                "/products",
                Some(json!({ "name": "مزهرية", "price": "1200", "sizes": "S, M,, L" })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(product["category"], "عام");
        assert_eq!(product["stock"], 10);
        assert_eq!(product["sizes"], json!(["S", "M", "L"]));

        let (status, body) = client
            .send(Method::POST, "/products", Some(json!({ "name": "x", "price": "0" })))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        for price in ["12.5", "79228162514264337593543950335"] {
            let (status, _) = client
                .send(Method::POST, "/products", Some(json!({ "name": "x", "price": price })))
                .await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{price}");
        }

        let (_, products) = client.send(Method::GET, "/products", None).await;
        assert_eq!(products[0]["name"], "مزهرية");

        let (status, _) = client.send(Method::DELETE, "/products/1", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = client.send(Method::DELETE, "/products/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_shipping_zone_defaults_baladiya() {
        let mut client = Client::new();
        client.login().await;

        let (status, zone) = client
            .send(
                Method::POST,
                "/shipping-zones",
                Some(json!({ "wilaya": "سطيف", "baladiya": "", "price": "700" })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(zone["baladiya"], "all");

        let (status, _) = client
            .send(
                Method::POST,
                "/shipping-zones",
                Some(json!({ "wilaya": "سطيف", "price": "0" })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_ai_description_fallback_and_validation() {
        let mut client = Client::new();
        client.login().await;

        let (status, body) = client
            .send(Method::POST, "/ai/description", Some(json!({ "name": "ساعة" })))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["description"], NOT_CONFIGURED);

        let (status, _) = client
            .send(Method::POST, "/ai/description", Some(json!({ "name": " " })))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = client
            .send(
                Method::POST,
                "/ai/marketing-post",
                Some(json!({ "product_name": "ساعة" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["post"], "");
    }

    fn shop_with_order(id: &str) -> SharedShop {
        let mut shop = Shop::seeded();
        let mut cart = Cart::new();
        let watch = shop.catalog.get(&ProductId::new("1")).cloned().unwrap();
        cart.add(&watch, None, None);

        let mut flow = CheckoutFlow::new();
        flow.begin_checkout(&cart).unwrap();
        flow.update_form(CheckoutForm {
            name: "ياسين".to_string(),
            phone: "0661234567".to_string(),
            wilaya_id: "1".to_string(),
            address: "باب الزوار".to_string(),
        })
        .unwrap();
        let pending = flow.begin_submit(&cart, &shop.zones).unwrap();
        shop.orders
            .record(Order::place(OrderId::new(id), pending, chrono::Utc::now()));
        SharedShop::new(shop)
    }

    #[tokio::test]
    async fn test_update_order_status() {
        let mut client = Client::with_app(app_with(shop_with_order("o-1")));

        let (status, _) = client
            .send(
                Method::PUT,
                "/orders/o-1/status",
                Some(json!({ "status": "shipped" })),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        client.login().await;
        let (status, order) = client
            .send(
                Method::PUT,
                "/orders/o-1/status",
                Some(json!({ "status": "shipped" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(order["status"], "shipped");

        let (_, orders) = client.send(Method::GET, "/orders", None).await;
        assert_eq!(orders[0]["status"], "shipped");

        let (status, _) = client
            .send(
                Method::PUT,
                "/orders/missing/status",
                Some(json!({ "status": "delivered" })),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = client
            .send(
                Method::PUT,
                "/orders/o-1/status",
                Some(json!({ "status": "lost" })),
            )
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_logout_revokes_access() {
        let mut client = Client::new();
        client.login().await;
        client.send(Method::POST, "/logout", None).await;

        let (status, _) = client.send(Method::GET, "/orders", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
