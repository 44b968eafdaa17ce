//! Shared types for the Lumen configurator
//!
//! Catalog data model, selection state, and the pricing/part-code
//! derivation engine. Everything in this crate is pure and synchronous:
//! the client crate owns transport and session orchestration.

pub mod export;
pub mod models;
pub mod pricing;
pub mod selection;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{ProductCatalog, ProductDetails};
pub use pricing::{Derivation, DeriveError, derive};
pub use selection::{SelectionError, SelectionState};
