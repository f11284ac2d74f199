//! Business logic services for admin.
//!
//! # Services
//!
//! - `copywriter` - AI product descriptions and marketing posts with
//!   fallbacks

pub mod copywriter;

pub use copywriter::{Copywriter, CopywriterError};
