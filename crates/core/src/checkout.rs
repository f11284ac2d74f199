//! Checkout state machine for the cart drawer.
//!
//! The drawer moves through [`CheckoutStep`]s:
//!
//! - `Cart` → `Checkout` when the customer starts checkout (cart must not be
//!   empty); `Checkout` → `Cart` on "back".
//! - `Checkout` → `Submitting` when the form validates; the order is then
//!   handed to an order gateway.
//! - `Submitting` → `Success` when the gateway accepts the order, or back to
//!   `Checkout` (with the reason kept) when it rejects it.
//! - Dismissing the drawer returns to `Cart` from any step and resets the
//!   form. Only a dismissal from `Success` clears the cart.
//!
//! The flow does not talk to the gateway itself: [`CheckoutFlow::begin_submit`]
//! produces a [`PendingOrder`] and [`CheckoutFlow::complete_submit`] consumes
//! a [`SubmissionOutcome`], so any transport can sit in between.

use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartItem};
use crate::shipping::ShippingZones;
use crate::types::{CheckoutStep, OrderId, PhoneError, PhoneNumber, Price, ShippingZone, ZoneId};

/// Errors from checkout transitions and validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckoutError {
    /// Checkout cannot start or complete with an empty cart.
    #[error("the cart is empty")]
    EmptyCart,
    /// The action is not allowed from the current step.
    #[error("cannot {action} while in the {step} step")]
    InvalidTransition {
        step: CheckoutStep,
        action: &'static str,
    },
    /// A submission is already in flight.
    #[error("the order is already being submitted")]
    AlreadySubmitting,
    /// A required form field is blank.
    #[error("{0} is required")]
    MissingField(&'static str),
    /// The phone number is not valid.
    #[error("invalid phone number: {0}")]
    InvalidPhone(#[from] PhoneError),
    /// No wilaya selected, so shipping cannot be priced.
    #[error("please select a wilaya to calculate the delivery price")]
    WilayaNotSelected,
    /// The selected wilaya does not match any shipping zone.
    #[error("unknown shipping zone: {0}")]
    UnknownZone(ZoneId),
}

/// Delivery details as typed into the checkout form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutForm {
    pub name: String,
    pub phone: String,
    pub wilaya_id: String,
    pub address: String,
}

impl CheckoutForm {
    /// The selected zone id, if one has been chosen.
    #[must_use]
    pub fn selected_zone(&self) -> Option<ZoneId> {
        let id = self.wilaya_id.trim();
        (!id.is_empty()).then(|| ZoneId::new(id))
    }
}

/// Price breakdown for the current cart and zone selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub subtotal: Price,
    /// `None` until a known zone is selected.
    pub shipping: Option<Price>,
    pub total: Price,
}

impl Quote {
    /// Price a cart against an optional zone selection.
    ///
    /// Shipping is the selected zone's price, or absent (counted as zero)
    /// when nothing is selected or the id matches no zone.
    #[must_use]
    pub fn for_cart(cart: &Cart, zones: &ShippingZones, zone: Option<&ZoneId>) -> Self {
        let subtotal = cart.subtotal();
        let shipping = zone.and_then(|id| zones.shipping_cost(id));
        Self {
            subtotal,
            shipping,
            total: subtotal + shipping.unwrap_or(Price::ZERO),
        }
    }
}

/// Validated customer details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub name: String,
    pub phone: PhoneNumber,
    pub address: String,
}

/// An order ready to be handed to the order gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingOrder {
    pub customer: CustomerDetails,
    pub zone: ShippingZone,
    pub items: Vec<CartItem>,
    pub quote: Quote,
}

/// Result reported by the order gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmissionOutcome {
    /// The order was recorded.
    Accepted { order_id: OrderId },
    /// The order was refused; the customer stays on the form.
    Rejected { reason: String },
}

/// Drawer and checkout state for one shopper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutFlow {
    step: CheckoutStep,
    drawer_open: bool,
    form: CheckoutForm,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    order_id: Option<OrderId>,
}

impl CheckoutFlow {
    /// A closed drawer on the cart step.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn step(&self) -> CheckoutStep {
        self.step
    }

    #[must_use]
    pub const fn is_drawer_open(&self) -> bool {
        self.drawer_open
    }

    #[must_use]
    pub const fn form(&self) -> &CheckoutForm {
        &self.form
    }

    /// Reason the last submission was rejected, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Id of the accepted order while on the success step.
    #[must_use]
    pub const fn order_id(&self) -> Option<&OrderId> {
        self.order_id.as_ref()
    }

    /// Open the drawer (adding to the cart does this).
    pub fn open_drawer(&mut self) {
        self.drawer_open = true;
    }

    /// Flip the drawer open/closed without touching the step or form.
    ///
    /// Returns whether the drawer is now open.
    pub fn toggle_drawer(&mut self) -> bool {
        self.drawer_open = !self.drawer_open;
        self.drawer_open
    }

    /// `Cart` → `Checkout`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidTransition`] outside the cart step and
    /// [`CheckoutError::EmptyCart`] when there is nothing to buy.
    pub fn begin_checkout(&mut self, cart: &Cart) -> Result<(), CheckoutError> {
        self.expect_step(CheckoutStep::Cart, "start checkout")?;
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        self.step = CheckoutStep::Checkout;
        self.drawer_open = true;
        self.last_error = None;
        Ok(())
    }

    /// `Checkout` → `Cart`, keeping what was typed into the form.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidTransition`] outside the checkout step.
    pub fn back(&mut self) -> Result<(), CheckoutError> {
        self.expect_step(CheckoutStep::Checkout, "go back")?;
        self.step = CheckoutStep::Cart;
        Ok(())
    }

    /// Replace the form contents.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidTransition`] outside the checkout step.
    pub fn update_form(&mut self, form: CheckoutForm) -> Result<(), CheckoutError> {
        self.expect_step(CheckoutStep::Checkout, "edit the delivery form")?;
        self.form = form;
        Ok(())
    }

    /// Price the cart against the zone currently selected in the form.
    #[must_use]
    pub fn quote(&self, cart: &Cart, zones: &ShippingZones) -> Quote {
        Quote::for_cart(cart, zones, self.form.selected_zone().as_ref())
    }

    /// Validate the form and move `Checkout` → `Submitting`.
    ///
    /// On error the step is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::AlreadySubmitting`] while a submission is in
    /// flight, [`CheckoutError::InvalidTransition`] from any other step but
    /// `Checkout`, or the first validation error of the form.
    pub fn begin_submit(
        &mut self,
        cart: &Cart,
        zones: &ShippingZones,
    ) -> Result<PendingOrder, CheckoutError> {
        if self.step == CheckoutStep::Submitting {
            return Err(CheckoutError::AlreadySubmitting);
        }
        self.expect_step(CheckoutStep::Checkout, "submit the order")?;

        let pending = self.validate(cart, zones)?;
        self.step = CheckoutStep::Submitting;
        self.last_error = None;
        Ok(pending)
    }

    /// Apply the gateway's outcome: `Submitting` → `Success` or `Checkout`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidTransition`] if no submission is in
    /// flight.
    pub fn complete_submit(&mut self, outcome: SubmissionOutcome) -> Result<(), CheckoutError> {
        self.expect_step(CheckoutStep::Submitting, "complete the order")?;
        match outcome {
            SubmissionOutcome::Accepted { order_id } => {
                self.step = CheckoutStep::Success;
                self.order_id = Some(order_id);
            }
            SubmissionOutcome::Rejected { reason } => {
                self.step = CheckoutStep::Checkout;
                self.last_error = Some(reason);
            }
        }
        Ok(())
    }

    /// Close the drawer and reset the flow for next use.
    ///
    /// Clears the cart only when the order was completed. Returns whether
    /// the cart was cleared.
    pub fn dismiss(&mut self, cart: &mut Cart) -> bool {
        let completed = self.step == CheckoutStep::Success;
        if completed {
            cart.clear();
        }
        *self = Self::new();
        completed
    }

    fn expect_step(&self, expected: CheckoutStep, action: &'static str) -> Result<(), CheckoutError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(CheckoutError::InvalidTransition {
                step: self.step,
                action,
            })
        }
    }

    fn validate(&self, cart: &Cart, zones: &ShippingZones) -> Result<PendingOrder, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let form = &self.form;
        let name = required(&form.name, "name")?;
        let phone = PhoneNumber::parse(required(&form.phone, "phone")?)?;
        let zone_id = form
            .selected_zone()
            .ok_or(CheckoutError::WilayaNotSelected)?;
        let zone = zones
            .find(&zone_id)
            .ok_or(CheckoutError::UnknownZone(zone_id))?;
        let address = required(&form.address, "address")?;

        Ok(PendingOrder {
            customer: CustomerDetails {
                name: name.to_owned(),
                phone,
                address: address.to_owned(),
            },
            zone: zone.clone(),
            items: cart.items().to_vec(),
            quote: self.quote(cart, zones),
        })
    }
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, CheckoutError> {
    let value = value.trim();
    if value.is_empty() {
        Err(CheckoutError::MissingField(field))
    } else {
        Ok(value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::seed;
    use crate::types::ProductId;

    fn cart_with(prices: &[(i64, u32)]) -> Cart {
        let catalog = seed::catalog();
        let template = catalog.get(&ProductId::new("4")).unwrap();
        let mut cart = Cart::new();
        for (i, &(price, qty)) in prices.iter().enumerate() {
            let mut product = template.clone();
            product.id = ProductId::new(format!("p{i}"));
            product.price = Price::from_units(price);
            for _ in 0..qty {
                cart.add(&product, None, None);
            }
        }
        cart
    }

    fn filled_form(wilaya_id: &str) -> CheckoutForm {
        CheckoutForm {
            name: "أمين".to_string(),
            phone: "0555123456".to_string(),
            wilaya_id: wilaya_id.to_string(),
            address: "حي البدر، رقم 12".to_string(),
        }
    }

    fn at_checkout(cart: &Cart, form: CheckoutForm) -> CheckoutFlow {
        let mut flow = CheckoutFlow::new();
        flow.begin_checkout(cart).unwrap();
        flow.update_form(form).unwrap();
        flow
    }

    #[test]
    fn test_quote_without_zone() {
        let cart = cart_with(&[(100, 2), (50, 1)]);
        let zones = seed::shipping_zones();
        let quote = CheckoutFlow::new().quote(&cart, &zones);

        assert_eq!(quote.subtotal, Price::from_units(250));
        assert_eq!(quote.shipping, None);
        assert_eq!(quote.total, Price::from_units(250));
    }

    #[test]
    fn test_quote_with_zone() {
        let cart = cart_with(&[(100, 2), (50, 1)]);
        let zones = seed::shipping_zones();
        let flow = at_checkout(&cart, filled_form("1"));

        let quote = flow.quote(&cart, &zones);
        assert_eq!(quote.shipping, Some(Price::from_units(400)));
        assert_eq!(quote.total, Price::from_units(650));
    }

    #[test]
    fn test_quote_with_unknown_zone_is_unpriced() {
        let cart = cart_with(&[(100, 1)]);
        let zones = seed::shipping_zones();
        let flow = at_checkout(&cart, filled_form("404"));

        let quote = flow.quote(&cart, &zones);
        assert_eq!(quote.shipping, None);
        assert_eq!(quote.total, Price::from_units(100));
    }

    #[test]
    fn test_checkout_requires_items() {
        let mut flow = CheckoutFlow::new();
        assert_eq!(flow.begin_checkout(&Cart::new()), Err(CheckoutError::EmptyCart));
        assert_eq!(flow.step(), CheckoutStep::Cart);
    }

    #[test]
    fn test_back_from_checkout_keeps_form() {
        let cart = cart_with(&[(100, 1)]);
        let mut flow = at_checkout(&cart, filled_form("2"));

        flow.back().unwrap();
        assert_eq!(flow.step(), CheckoutStep::Cart);
        assert_eq!(flow.form().wilaya_id, "2");
        assert!(flow.back().is_err());
    }

    #[test]
    fn test_submit_without_wilaya_is_rejected() {
        let cart = cart_with(&[(100, 1)]);
        let zones = seed::shipping_zones();
        let mut flow = at_checkout(&cart, filled_form(""));

        assert_eq!(
            flow.begin_submit(&cart, &zones),
            Err(CheckoutError::WilayaNotSelected)
        );
        assert_eq!(flow.step(), CheckoutStep::Checkout);
    }

    #[test]
    fn test_submit_validates_fields() {
        let cart = cart_with(&[(100, 1)]);
        let zones = seed::shipping_zones();

        let mut form = filled_form("1");
        form.name = "  ".to_string();
        let mut flow = at_checkout(&cart, form);
        assert_eq!(
            flow.begin_submit(&cart, &zones),
            Err(CheckoutError::MissingField("name"))
        );

        let mut form = filled_form("1");
        form.phone = "12345".to_string();
        let mut flow = at_checkout(&cart, form);
        assert!(matches!(
            flow.begin_submit(&cart, &zones),
            Err(CheckoutError::InvalidPhone(PhoneError::InvalidLength { .. }))
        ));

        let mut form = filled_form("1");
        form.address = String::new();
        let mut flow = at_checkout(&cart, form);
        assert_eq!(
            flow.begin_submit(&cart, &zones),
            Err(CheckoutError::MissingField("address"))
        );

        let mut flow = at_checkout(&cart, filled_form("77"));
        assert_eq!(
            flow.begin_submit(&cart, &zones),
            Err(CheckoutError::UnknownZone(ZoneId::new("77")))
        );
        assert_eq!(flow.step(), CheckoutStep::Checkout);
    }

    #[test]
    fn test_successful_submission() {
        let cart = cart_with(&[(100, 2), (50, 1)]);
        let zones = seed::shipping_zones();
        let mut flow = at_checkout(&cart, filled_form("4"));

        let pending = flow.begin_submit(&cart, &zones).unwrap();
        assert_eq!(flow.step(), CheckoutStep::Submitting);
        assert_eq!(pending.quote.total, Price::from_units(1150));
        assert_eq!(pending.items.len(), 2);
        assert_eq!(pending.customer.phone.as_str(), "0555123456");

        assert_eq!(
            flow.begin_submit(&cart, &zones),
            Err(CheckoutError::AlreadySubmitting)
        );

        flow.complete_submit(SubmissionOutcome::Accepted {
            order_id: OrderId::new("o-1"),
        })
        .unwrap();
        assert_eq!(flow.step(), CheckoutStep::Success);
        assert_eq!(flow.order_id(), Some(&OrderId::new("o-1")));
    }

    #[test]
    fn test_rejected_submission_returns_to_form() {
        let cart = cart_with(&[(100, 1)]);
        let zones = seed::shipping_zones();
        let mut flow = at_checkout(&cart, filled_form("1"));

        flow.begin_submit(&cart, &zones).unwrap();
        flow.complete_submit(SubmissionOutcome::Rejected {
            reason: "gateway down".to_string(),
        })
        .unwrap();

        assert_eq!(flow.step(), CheckoutStep::Checkout);
        assert_eq!(flow.last_error(), Some("gateway down"));
        assert_eq!(flow.form().name, "أمين");
    }

    #[test]
    fn test_complete_without_submission() {
        let mut flow = CheckoutFlow::new();
        let err = flow
            .complete_submit(SubmissionOutcome::Accepted {
                order_id: OrderId::new("x"),
            })
            .unwrap_err();
        assert!(matches!(err, CheckoutError::InvalidTransition { .. }));
    }

    #[test]
    fn test_dismiss_after_success_clears_cart() {
        let mut cart = cart_with(&[(100, 1)]);
        let zones = seed::shipping_zones();
        let mut flow = at_checkout(&cart, filled_form("1"));
        flow.begin_submit(&cart, &zones).unwrap();
        flow.complete_submit(SubmissionOutcome::Accepted {
            order_id: OrderId::new("o-2"),
        })
        .unwrap();

        // Cart is still intact on the success step
        assert!(!cart.is_empty());

        assert!(flow.dismiss(&mut cart));
        assert!(cart.is_empty());
        assert_eq!(flow, CheckoutFlow::new());
    }

    #[test]
    fn test_dismiss_before_success_keeps_cart() {
        let mut cart = cart_with(&[(100, 1)]);

        let mut flow = at_checkout(&cart, filled_form("1"));
        assert!(!flow.dismiss(&mut cart));
        assert_eq!(cart.len(), 1);
        assert_eq!(flow.step(), CheckoutStep::Cart);
        assert_eq!(flow.form(), &CheckoutForm::default());

        let mut flow = CheckoutFlow::new();
        flow.open_drawer();
        assert!(!flow.dismiss(&mut cart));
        assert_eq!(cart.len(), 1);
        assert!(!flow.is_drawer_open());
    }

    #[test]
    fn test_toggle_drawer() {
        let mut flow = CheckoutFlow::new();
        assert!(flow.toggle_drawer());
        assert!(!flow.toggle_drawer());
        assert_eq!(flow.step(), CheckoutStep::Cart);
    }

    #[test]
    fn test_flow_survives_serialization() {
        let cart = cart_with(&[(100, 1)]);
        let flow = at_checkout(&cart, filled_form("3"));
        let json = serde_json::to_string(&flow).unwrap();
        let back: CheckoutFlow = serde_json::from_str(&json).unwrap();
        assert_eq!(back, flow);
    }
}
