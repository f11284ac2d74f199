//! Souq Admin library.
//!
//! The admin API as a router the host application mounts:
//! - session-stored admin gate with a shared password
//! - product and shipping zone management
//! - order log
//! - AI product copy through the Claude API
//!
//! The router is generic over the host's state; see [`state::AdminState`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod claude;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use config::{AdminConfig, ClaudeConfig};
pub use routes::router;
pub use state::AdminState;
