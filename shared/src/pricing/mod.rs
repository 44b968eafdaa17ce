//! Derivation Engine
//!
//! Pure functions turning a catalog snapshot plus a selection state into
//! the configured price, the assembled part code, and a display summary.
//! No hidden state: every output is a deterministic function of the two
//! inputs, and nothing here mutates either.

mod engine;
pub mod money;
mod part_code;
mod summary;

pub use engine::*;
pub use part_code::*;
pub use summary::*;
