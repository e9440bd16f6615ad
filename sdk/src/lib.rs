//! Module Registry SDK - Off-chain interface for the module registry program
//!
//! This SDK provides thin wrappers for:
//! - Account fetching and deserialization over RPC
//! - Instruction building for every registry operation
//! - PDA derivation (re-exported from the program crate)
//! - Serde-friendly views of on-chain state for dashboards and tooling

pub mod client;
pub mod instructions;
pub mod types;

// Re-export key types
pub use client::RegistryClient;
pub use types::*;

// The program crate is the source of truth for addresses and layouts
pub use module_registry::{RegistrySeeds, PROGRAM_ID};

// Prelude for downstream tooling
pub mod prelude {
    pub use anchor_lang::prelude::*;

    pub use crate::client::RegistryClient;
    pub use crate::instructions::*;
    pub use crate::types::*;
}
