//! Shop state shared by all requests.
//!
//! The catalog, shipping zones and order log live in one [`Shop`] behind a
//! read-write lock. Locks are only held for the duration of a synchronous
//! operation, never across an await.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::catalog::Catalog;
use crate::orders::OrderLog;
use crate::seed;
use crate::shipping::ShippingZones;

/// Returned when a previous holder of the shop lock panicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("shop state is unavailable")]
pub struct ShopUnavailable;

impl<T> From<PoisonError<T>> for ShopUnavailable {
    fn from(_: PoisonError<T>) -> Self {
        Self
    }
}

/// Catalog, shipping zones and placed orders.
#[derive(Debug, Clone, Default)]
pub struct Shop {
    pub catalog: Catalog,
    pub zones: ShippingZones,
    pub orders: OrderLog,
}

impl Shop {
    /// A shop holding the seeded catalog and zones and no orders.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            catalog: seed::catalog(),
            zones: seed::shipping_zones(),
            orders: OrderLog::new(),
        }
    }
}

/// Cheaply cloneable handle to the shop.
#[derive(Debug, Clone, Default)]
pub struct SharedShop {
    inner: Arc<RwLock<Shop>>,
}

impl SharedShop {
    #[must_use]
    pub fn new(shop: Shop) -> Self {
        Self {
            inner: Arc::new(RwLock::new(shop)),
        }
    }

    /// Acquire shared read access.
    ///
    /// # Errors
    ///
    /// Returns [`ShopUnavailable`] if the lock is poisoned.
    pub fn read(&self) -> Result<RwLockReadGuard<'_, Shop>, ShopUnavailable> {
        Ok(self.inner.read()?)
    }

    /// Acquire exclusive write access.
    ///
    /// # Errors
    ///
    /// Returns [`ShopUnavailable`] if the lock is poisoned.
    pub fn write(&self) -> Result<RwLockWriteGuard<'_, Shop>, ShopUnavailable> {
        Ok(self.inner.write()?)
    }

    /// Whether the shop can still be read and written.
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        !self.inner.is_poisoned()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{Price, ShippingZoneDraft};

    #[test]
    fn test_clones_share_state() {
        let shop = SharedShop::new(Shop::seeded());
        let other = shop.clone();

        other
            .write()
            .unwrap()
            .zones
            .add(ShippingZoneDraft {
                wilaya: "تلمسان".to_string(),
                baladiya: None,
                price: Some(Price::from_units(650)),
            })
            .unwrap();

        assert_eq!(shop.read().unwrap().zones.list().len(), 5);
        assert!(shop.is_healthy());
    }

    #[test]
    fn test_poisoned_lock_is_reported() {
        let shop = SharedShop::new(Shop::default());
        let poisoner = shop.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.write().unwrap();
            panic!("boom");
        })
        .join();

        assert!(!shop.is_healthy());
        assert_eq!(shop.read().err(), Some(ShopUnavailable));
    }
}
