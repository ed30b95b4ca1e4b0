//! Genutils State - Genesis document handling
//!
//! This crate loads and writes genesis documents and maps the module states
//! inside `app_state` to and from their typed representations.

pub mod app_state;
pub mod codec;
pub mod document;
pub mod error;

pub use app_state::AppState;
pub use codec::ModuleGenesis;
pub use document::GenesisDoc;
pub use error::StateError;
