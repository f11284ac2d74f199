//! Services used by storefront handlers.
//!
//! - `orders` - Order gateway that receives checkout submissions

pub mod orders;

pub use orders::{OrderGateway, SimulatedOrderGateway};
