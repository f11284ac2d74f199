//! Shipping zones (wilaya / baladiya pairs with a delivery price).

use serde::{Deserialize, Serialize};

use super::id::ZoneId;
use super::price::Price;

/// Baladiya stored when a zone covers the whole wilaya.
pub const DEFAULT_BALADIYA: &str = "all";

/// A delivery region and its shipping price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingZone {
    pub id: ZoneId,
    /// Province.
    pub wilaya: String,
    /// Municipality, or [`DEFAULT_BALADIYA`].
    pub baladiya: String,
    pub price: Price,
}

/// Input for a new shipping zone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShippingZoneDraft {
    pub wilaya: String,
    pub baladiya: Option<String>,
    pub price: Option<Price>,
}
