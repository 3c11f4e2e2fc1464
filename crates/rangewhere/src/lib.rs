//! Public facade over `rangewhere-core`.
//!
//! Downstream crates depend on this crate and reach everything through
//! the re-exported modules or the prelude.

pub use rangewhere_core as core;

pub use rangewhere_core::{
    bound, diag, error, key, pattern, query, select, source, types, value,
};

pub mod prelude {
    pub use rangewhere_core::prelude::*;
}

/// Crate version, for hosts that surface it in their own diagnostics.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// TESTS
///
