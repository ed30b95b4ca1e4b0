//! Genutils Core - Genesis value types, exact arithmetic, and addressing
//!
//! This crate provides the typed module states (auth, bank, staking,
//! distribution) that genesis transformations operate on, together with the
//! big-integer and fixed-point math and the bech32 address scheme they need.

pub mod crypto;
pub mod error;
pub mod math;
pub mod serialize;
pub mod types;

pub use crypto::{Address, Bech32Prefixes, PubKey};
pub use error::CoreError;
pub use math::{Dec, Int};
pub use types::*;
