//! Cart route handlers.
//!
//! The cart lives in the session under `souq-cart` and is written back after
//! every change. The drawer flag lives with the checkout state; adding an
//! item opens it.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use souq_core::{Cart, CartItem, CheckoutFlow, Price, ProductId, VariantKey};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::models::session::{load_cart, load_checkout, save_cart, save_checkout};
use crate::state::AppState;

/// Cart display data.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: Price,
    /// Units across all lines (navbar badge).
    pub item_count: u32,
    pub drawer_open: bool,
}

/// One cart line with its computed total.
#[derive(Debug, Serialize)]
pub struct CartItemView {
    #[serde(flatten)]
    pub item: CartItem,
    pub line_total: Price,
}

impl CartView {
    #[must_use]
    pub fn new(cart: &Cart, flow: &CheckoutFlow) -> Self {
        Self {
            items: cart
                .items()
                .iter()
                .map(|item| CartItemView {
                    item: item.clone(),
                    line_total: item.line_total(),
                })
                .collect(),
            subtotal: cart.subtotal(),
            item_count: cart.item_count(),
            drawer_open: flow.is_drawer_open(),
        }
    }
}

/// Add-to-cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
    pub size: Option<String>,
    pub color: Option<String>,
}

/// Remove-all-variants form data.
#[derive(Debug, Deserialize)]
pub struct RemoveProductForm {
    pub product_id: ProductId,
}

/// Remove-one-line form data.
#[derive(Debug, Deserialize)]
pub struct RemoveLineForm {
    pub product_id: ProductId,
    pub size: Option<String>,
    pub color: Option<String>,
}

/// Current cart.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<CartView>> {
    let cart = load_cart(&session).await?;
    let flow = load_checkout(&session).await?;
    Ok(Json(CartView::new(&cart, &flow)))
}

/// Add a product variant and open the drawer.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<AddToCartForm>,
) -> Result<Json<CartView>> {
    let key = VariantKey::new(form.product_id, form.size, form.color);

    let product = state
        .shop()
        .read()?
        .catalog
        .get(&key.product_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("product {}", key.product_id)))?;
    product.check_selection(key.size.as_deref(), key.color.as_deref())?;

    let mut cart = load_cart(&session).await?;
    let quantity = cart.add(&product, key.size, key.color);
    save_cart(&session, &cart).await;

    let mut flow = load_checkout(&session).await?;
    flow.open_drawer();
    save_checkout(&session, &flow).await?;

    tracing::info!(product_id = %product.id, quantity, "Added to cart");
    add_breadcrumb("cart", "Added to cart", &[("product_id", product.id.as_str())]);

    Ok(Json(CartView::new(&cart, &flow)))
}

/// Remove every variant of a product.
#[instrument(skip(session))]
pub async fn remove(session: Session, Json(form): Json<RemoveProductForm>) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await?;
    let removed = cart.remove_product(&form.product_id);
    if removed > 0 {
        save_cart(&session, &cart).await;
    }

    let flow = load_checkout(&session).await?;
    Ok(Json(CartView::new(&cart, &flow)))
}

/// Remove a single line.
#[instrument(skip(session))]
pub async fn remove_line(session: Session, Json(form): Json<RemoveLineForm>) -> Result<Json<CartView>> {
    let key = VariantKey::new(form.product_id, form.size, form.color);

    let mut cart = load_cart(&session).await?;
    if cart.remove_variant(&key).is_some() {
        save_cart(&session, &cart).await;
    }

    let flow = load_checkout(&session).await?;
    Ok(Json(CartView::new(&cart, &flow)))
}

/// Empty the cart.
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await?;
    cart.clear();
    save_cart(&session, &cart).await;

    let flow = load_checkout(&session).await?;
    Ok(Json(CartView::new(&cart, &flow)))
}

/// Open or close the drawer.
#[instrument(skip(session))]
pub async fn toggle(session: Session) -> Result<Json<CartView>> {
    let mut flow = load_checkout(&session).await?;
    flow.toggle_drawer();
    save_checkout(&session, &flow).await?;

    let cart = load_cart(&session).await?;
    Ok(Json(CartView::new(&cart, &flow)))
}
