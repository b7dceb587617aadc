//! mkinfer: implicit suffix-rule inference for make-style build tools.
//!
//! ## Crate layout
//! - `core`: the name registry, rule records, suffix and archive-member
//!   splitting, the mtime oracle seam, the resolver, and the built-in
//!   rule/macro tables.
//!
//! The `prelude` mirrors the surface a build driver uses.

pub use mkinfer_core as core;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Driver Prelude
///

pub mod prelude {
    pub use crate::core::{
        MAX_CHAIN_DEPTH,
        config::Config,
        infer::Resolver,
        mtime::{FsOracle, MtimeOracle, Probe, Timestamp},
        names::{NameFlags, NameId, NameRegistry, SUFFIXES},
        rules::{Commands, Rule},
    };
}
