//! Core types for Souq.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod phone;
pub mod price;
pub mod product;
pub mod status;
pub mod zone;

pub use id::*;
pub use phone::{PhoneError, PhoneNumber};
pub use price::{MAX_PRICE_UNITS, Price, PriceError};
pub use product::{
    Category, DEFAULT_CATEGORY, DEFAULT_IMAGE, DEFAULT_STOCK, OptionList, Product, ProductDraft,
    ProductError, SelectionError, parse_option_list,
};
pub use status::*;
pub use zone::{DEFAULT_BALADIYA, ShippingZone, ShippingZoneDraft};
