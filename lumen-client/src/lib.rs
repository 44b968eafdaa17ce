//! Lumen Client - HTTP client for the catalog service
//!
//! Provides the network calls the configurator core consumes (catalog
//! read, configuration persistence, datasheet export) and the
//! per-session orchestration: load a product snapshot, apply defaults,
//! and re-derive price/part-code after every edit.

pub mod client;
pub mod config;
pub mod error;
pub mod session;

pub use client::{CatalogApi, CatalogClient};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use session::{ConfiguratorSession, SessionError};

// Re-export shared types for convenience
pub use shared::{Derivation, DeriveError, ProductCatalog, SelectionError, SelectionState};
