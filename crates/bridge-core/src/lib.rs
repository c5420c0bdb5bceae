//! Bridge-core: Shared types, errors, and configuration
//!
//! This crate provides the foundational types used across the bridge workspace:
//! Ethereum addresses, bridge-chain token amounts, native coins, and the error
//! taxonomy shared by the outgoing pool.

pub mod config;
pub mod errors;
pub mod types;

pub use config::*;
pub use errors::*;
pub use types::*;
