//! Souq Core - Shared types and shop logic.
//!
//! This crate provides the domain used by every Souq component:
//! - `storefront` - Public shop API (catalog browsing, cart, checkout)
//! - `admin` - Administration API (catalog and shipping management, copywriting)
//!
//! # Architecture
//!
//! The core crate contains only types and state transitions - no I/O, no
//! HTTP, no session access. Persistence and transport live in the crates
//! that use it, which keeps every rule here testable in isolation.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, phone numbers, products, shipping zones
//! - [`catalog`] - Product catalog store
//! - [`shipping`] - Shipping zone registry
//! - [`cart`] - Cart engine with variant merging
//! - [`checkout`] - Checkout state machine for the cart drawer
//! - [`admin`] - Admin session gate
//! - [`orders`] - Placed orders and the in-memory order log
//! - [`shop`] - Shared shop state owned by the application
//! - [`seed`] - Initial catalog, categories and shipping zones

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod orders;
pub mod seed;
pub mod shipping;
pub mod shop;
pub mod types;

pub use admin::AdminGate;
pub use cart::{CART_STORAGE_KEY, Cart, CartError, CartItem, VariantKey};
pub use catalog::{Catalog, CatalogError, CategoryFilter};
pub use checkout::{
    CheckoutError, CheckoutFlow, CheckoutForm, CustomerDetails, PendingOrder, Quote,
    SubmissionOutcome,
};
pub use orders::{Order, OrderError, OrderLog};
pub use shipping::{ShippingError, ShippingZones};
pub use shop::{SharedShop, Shop, ShopUnavailable};
pub use types::*;
