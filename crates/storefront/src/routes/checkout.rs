//! Checkout route handlers.
//!
//! Each handler loads the checkout state from the session, applies one
//! transition and stores it back. Submission persists the `submitting` step
//! before awaiting the order gateway so a second submit from the same
//! session is refused while the first is in flight.

use axum::{Json, extract::State};
use serde::Serialize;
use tower_sessions::Session;
use tracing::{Instrument, instrument};

use souq_core::{
    Cart, CheckoutFlow, CheckoutForm, CheckoutStep, OrderId, Quote, ShippingZones,
    SubmissionOutcome,
};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::models::session::{load_cart, load_checkout, save_cart, save_checkout};
use crate::state::AppState;

/// Checkout display data.
#[derive(Debug, Serialize)]
pub struct CheckoutView {
    pub step: CheckoutStep,
    pub drawer_open: bool,
    pub form: CheckoutForm,
    pub quote: Quote,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<OrderId>,
}

impl CheckoutView {
    #[must_use]
    pub fn new(flow: &CheckoutFlow, cart: &Cart, zones: &ShippingZones) -> Self {
        Self {
            step: flow.step(),
            drawer_open: flow.is_drawer_open(),
            form: flow.form().clone(),
            quote: flow.quote(cart, zones),
            error: flow.last_error().map(String::from),
            order_id: flow.order_id().cloned(),
        }
    }
}

fn view(state: &AppState, flow: &CheckoutFlow, cart: &Cart) -> Result<Json<CheckoutView>> {
    let shop = state.shop().read()?;
    Ok(Json(CheckoutView::new(flow, cart, &shop.zones)))
}

/// Current checkout state with a price quote.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Json<CheckoutView>> {
    let cart = load_cart(&session).await?;
    let flow = load_checkout(&session).await?;
    view(&state, &flow, &cart)
}

/// Move from the cart to the delivery form.
#[instrument(skip(state, session))]
pub async fn start(State(state): State<AppState>, session: Session) -> Result<Json<CheckoutView>> {
    let cart = load_cart(&session).await?;
    let mut flow = load_checkout(&session).await?;
    flow.begin_checkout(&cart)?;
    save_checkout(&session, &flow).await?;
    view(&state, &flow, &cart)
}

/// Return from the delivery form to the cart.
#[instrument(skip(state, session))]
pub async fn back(State(state): State<AppState>, session: Session) -> Result<Json<CheckoutView>> {
    let cart = load_cart(&session).await?;
    let mut flow = load_checkout(&session).await?;
    flow.back()?;
    save_checkout(&session, &flow).await?;
    view(&state, &flow, &cart)
}

/// Replace the delivery form and re-quote.
#[instrument(skip(state, session, form))]
pub async fn update_form(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<CheckoutForm>,
) -> Result<Json<CheckoutView>> {
    let cart = load_cart(&session).await?;
    let mut flow = load_checkout(&session).await?;
    flow.update_form(form)?;
    save_checkout(&session, &flow).await?;
    view(&state, &flow, &cart)
}

/// Validate the form and hand the order to the order gateway.
///
/// The gateway call runs on its own task and stores the outcome in the
/// session itself, so the order completes even if the client goes away.
/// The record is reloaded from the store before the outcome is written, so
/// cart changes made by other requests while the gateway was busy survive.
#[instrument(skip(state, session))]
pub async fn submit(State(state): State<AppState>, session: Session) -> Result<Json<CheckoutView>> {
    let cart = load_cart(&session).await?;
    let mut flow = load_checkout(&session).await?;

    let pending = {
        let shop = state.shop().read()?;
        flow.begin_submit(&cart, &shop.zones)?
    };
    save_checkout(&session, &flow).await?;
    session.save().await?;

    tracing::info!(
        zone = %pending.zone.wilaya,
        total = %pending.quote.total,
        "Submitting order"
    );

    let gateway = state.orders();
    let task_session = session.clone();
    let task = tokio::spawn(
        async move {
            let outcome = gateway.submit(pending).await;
            if let SubmissionOutcome::Rejected { reason } = &outcome {
                tracing::warn!(reason = %reason, "Order rejected");
            }
            flow.complete_submit(outcome)?;
            task_session.load().await?;
            save_checkout(&task_session, &flow).await?;
            task_session.save().await?;
            Ok::<_, AppError>(flow)
        }
        .in_current_span(),
    );

    let flow = task
        .await
        .map_err(|e| AppError::Internal(format!("order submission task failed: {e}")))??;

    if let Some(order_id) = flow.order_id() {
        add_breadcrumb("checkout", "Order placed", &[("order_id", order_id.as_str())]);
    }

    let cart = load_cart(&session).await?;
    view(&state, &flow, &cart)
}

/// Close the drawer and reset checkout; clears the cart after a completed
/// order.
#[instrument(skip(state, session))]
pub async fn close(State(state): State<AppState>, session: Session) -> Result<Json<CheckoutView>> {
    let mut cart = load_cart(&session).await?;
    let mut flow = load_checkout(&session).await?;

    if flow.dismiss(&mut cart) {
        save_cart(&session, &cart).await;
        tracing::info!("Cart cleared after completed order");
    }
    save_checkout(&session, &flow).await?;

    view(&state, &flow, &cart)
}
