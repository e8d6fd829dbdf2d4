//! fc-core: stable foundation for flowconv.
//!
//! Contains:
//! - numeric (Real, EOC tolerance, finiteness check)
//! - observable (the catalogue of logged physical quantities)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod observable;

// Re-exports for downstream crates
pub use error::{FcError, FcResult};
pub use numeric::*;
pub use observable::{Observable, StatShape};
