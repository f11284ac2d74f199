//! Shipping zone registry.
//!
//! A flat list of zones keyed by id. The same (wilaya, baladiya) pair may
//! appear more than once; lookups during checkout are always by id.

use crate::types::{DEFAULT_BALADIYA, Price, PriceError, ShippingZone, ShippingZoneDraft, ZoneId};

/// Errors from shipping zone mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShippingError {
    /// Wilaya name missing or blank.
    #[error("wilaya name is required")]
    MissingWilaya,
    /// Price missing.
    #[error("shipping price is required")]
    MissingPrice,
    /// Price not a positive whole number within range.
    #[error("shipping {0}")]
    InvalidPrice(#[from] PriceError),
    /// No zone with this id.
    #[error("shipping zone not found: {0}")]
    NotFound(ZoneId),
}

/// In-memory shipping zone registry.
#[derive(Debug, Clone, Default)]
pub struct ShippingZones {
    zones: Vec<ShippingZone>,
}

impl ShippingZones {
    /// Create a registry from existing zones.
    #[must_use]
    pub const fn new(zones: Vec<ShippingZone>) -> Self {
        Self { zones }
    }

    /// All zones in insertion order.
    #[must_use]
    pub fn list(&self) -> &[ShippingZone] {
        &self.zones
    }

    /// Look up a zone by id.
    #[must_use]
    pub fn find(&self, id: &ZoneId) -> Option<&ShippingZone> {
        self.zones.iter().find(|z| z.id == *id)
    }

    /// Shipping price for a selected zone id, if the zone exists.
    #[must_use]
    pub fn shipping_cost(&self, id: &ZoneId) -> Option<Price> {
        self.find(id).map(|z| z.price)
    }

    /// Validate a draft and append the new zone.
    ///
    /// A blank or missing baladiya is stored as [`DEFAULT_BALADIYA`].
    ///
    /// # Errors
    ///
    /// Returns [`ShippingError::MissingWilaya`],
    /// [`ShippingError::MissingPrice`] or [`ShippingError::InvalidPrice`]
    /// when the draft is invalid.
    pub fn add(&mut self, draft: ShippingZoneDraft) -> Result<ShippingZone, ShippingError> {
        let wilaya = draft.wilaya.trim();
        if wilaya.is_empty() {
            return Err(ShippingError::MissingWilaya);
        }

        let price = draft
            .price
            .ok_or(ShippingError::MissingPrice)?
            .validate_listing()?;

        let baladiya = draft
            .baladiya
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .unwrap_or(DEFAULT_BALADIYA)
            .to_owned();

        let zone = ShippingZone {
            id: ZoneId::generate(),
            wilaya: wilaya.to_owned(),
            baladiya,
            price,
        };
        self.zones.push(zone.clone());
        Ok(zone)
    }

    /// Remove a zone by id, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`ShippingError::NotFound`] if no zone has this id.
    pub fn delete(&mut self, id: &ZoneId) -> Result<ShippingZone, ShippingError> {
        let pos = self
            .zones
            .iter()
            .position(|z| z.id == *id)
            .ok_or_else(|| ShippingError::NotFound(id.clone()))?;
        Ok(self.zones.remove(pos))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::seed;

    fn draft(wilaya: &str, baladiya: Option<&str>, price: i64) -> ShippingZoneDraft {
        ShippingZoneDraft {
            wilaya: wilaya.to_string(),
            baladiya: baladiya.map(str::to_string),
            price: Some(Price::from_units(price)),
        }
    }

    #[test]
    fn test_add_defaults_baladiya() {
        let mut zones = ShippingZones::default();
        let zone = zones.add(draft("سطيف", None, 700)).unwrap();
        assert_eq!(zone.baladiya, DEFAULT_BALADIYA);

        let zone = zones.add(draft("سطيف", Some("   "), 700)).unwrap();
        assert_eq!(zone.baladiya, DEFAULT_BALADIYA);

        let zone = zones.add(draft("سطيف", Some("العلمة"), 750)).unwrap();
        assert_eq!(zone.baladiya, "العلمة");
        assert_eq!(zones.list().len(), 3);
    }

    #[test]
    fn test_add_validates() {
        let mut zones = ShippingZones::default();
        assert_eq!(
            zones.add(draft("  ", None, 500)),
            Err(ShippingError::MissingWilaya)
        );
        assert_eq!(
            zones.add(draft("بجاية", None, 0)),
            Err(ShippingError::InvalidPrice(PriceError::NonPositive))
        );
        assert_eq!(
            zones.add(draft("بجاية", None, 100_000_001)),
            Err(ShippingError::InvalidPrice(PriceError::TooHigh))
        );
        let fractional = ShippingZoneDraft {
            wilaya: "بجاية".to_string(),
            baladiya: None,
            price: Some(serde_json::from_str("\"450.5\"").unwrap()),
        };
        assert_eq!(
            zones.add(fractional),
            Err(ShippingError::InvalidPrice(PriceError::Fractional))
        );
        let no_price = ShippingZoneDraft {
            wilaya: "بجاية".to_string(),
            ..Default::default()
        };
        assert_eq!(zones.add(no_price), Err(ShippingError::MissingPrice));
        assert!(zones.list().is_empty());
    }

    #[test]
    fn test_duplicates_allowed() {
        let mut zones = ShippingZones::default();
        let a = zones.add(draft("عنابة", None, 650)).unwrap();
        let b = zones.add(draft("عنابة", None, 650)).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(zones.list().len(), 2);
    }

    #[test]
    fn test_lookup_and_delete() {
        let mut zones = seed::shipping_zones();
        let oran = ZoneId::new("2");

        assert_eq!(zones.shipping_cost(&oran), Some(Price::from_units(600)));
        assert_eq!(zones.shipping_cost(&ZoneId::new("99")), None);

        let removed = zones.delete(&oran).unwrap();
        assert_eq!(removed.id, oran);
        assert!(zones.find(&oran).is_none());
        assert_eq!(zones.delete(&oran), Err(ShippingError::NotFound(oran)));
    }
}
