//! if97-core: stable foundation for the steam-property workspace.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - error (shared error types)

pub mod error;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use units::*;
