//! Versioned on-chain registry for repositories, generated modules and
//! forks, gated by an admin-controlled configuration and lifecycle lock.
//!
//! Every record is a PDA derived from a fixed per-kind seed plus its
//! identifying keys, so any client can locate a record without a lookup
//! table. Instructions are one-shot atomic transitions: a failed validation
//! anywhere aborts the whole call and every successful mutation emits one
//! event for external indexers.

use anchor_lang::prelude::*;

// ================================
// Module Declarations
// ================================

pub mod errors;
pub mod events;
pub mod instructions;
pub mod pda;
pub mod state;
pub mod validation;

// ================================
// Public API Exports
// ================================

pub use errors::*;
pub use events::*;
pub use instructions::*;
pub use pda::RegistrySeeds;
pub use state::*;

// ================================
// Program Declaration
// ================================

declare_id!("ModReg1111111111111111111111111111111111111");

// Make ID accessible for tests
pub const PROGRAM_ID: Pubkey = ID;

#[program]
pub mod module_registry {
    use super::*;

    /// Create the Config, Metrics, Lifecycle and GlobalMetadata singletons;
    /// the payer becomes the admin
    pub fn initialize(ctx: Context<Initialize>, args: InitializeArgs) -> Result<()> {
        instructions::initialize::handle(ctx, args)
    }

    /// Partial-update the global configuration (admin only)
    pub fn set_config(ctx: Context<SetConfig>, args: SetConfigArgs) -> Result<()> {
        instructions::set_config::handle(ctx, args)
    }

    /// Partial-update the deployment lifecycle flags (admin only)
    pub fn set_lifecycle(ctx: Context<SetLifecycle>, args: SetLifecycleArgs) -> Result<()> {
        instructions::set_lifecycle::handle(ctx, args)
    }

    /// Create or update an on-chain role record (admin only)
    pub fn set_authority_role(
        ctx: Context<SetAuthorityRole>,
        args: SetAuthorityRoleArgs,
    ) -> Result<()> {
        instructions::set_authority_role::handle(ctx, args)
    }

    /// Register a repository; the signer becomes its authority
    pub fn register_repo(ctx: Context<RegisterRepo>, args: RegisterRepoArgs) -> Result<()> {
        instructions::register_repo::handle(ctx, args)
    }

    /// Partial-update a repository (repo authority only)
    pub fn update_repo(ctx: Context<UpdateRepo>, args: UpdateRepoArgs) -> Result<()> {
        instructions::update_repo::handle(ctx, args)
    }

    /// Register a module for a repository, optionally snapshotting its
    /// initial version; the signer becomes the module authority
    pub fn register_module(ctx: Context<RegisterModule>, args: RegisterModuleArgs) -> Result<()> {
        instructions::register_module::handle(ctx, args)
    }

    /// Partial-update a module, optionally bumping its version with an
    /// immutable snapshot (module authority only)
    pub fn update_module(ctx: Context<UpdateModule>, args: UpdateModuleArgs) -> Result<()> {
        instructions::update_module::handle(ctx, args)
    }

    /// Create or update the link between a module and a repository;
    /// promoting a link demotes the previous primary in the same call
    pub fn link_module_to_repo(
        ctx: Context<LinkModuleToRepo>,
        args: LinkModuleToRepoArgs,
    ) -> Result<()> {
        instructions::link_module_to_repo::handle(ctx, args)
    }

    /// Create a fork; the signer becomes its owner
    pub fn create_fork(ctx: Context<CreateFork>, args: CreateForkArgs) -> Result<()> {
        instructions::create_fork::handle(ctx, args)
    }

    /// Partial-update a fork's mutable state (fork owner only)
    pub fn update_fork_state(
        ctx: Context<UpdateForkState>,
        args: UpdateForkStateArgs,
    ) -> Result<()> {
        instructions::update_fork_state::handle(ctx, args)
    }

    /// Record one observation run over a repository
    pub fn record_observation(
        ctx: Context<RecordObservation>,
        args: RecordObservationArgs,
    ) -> Result<()> {
        instructions::record_observation::handle(ctx, args)
    }

    /// Overwrite aggregate metrics counters (admin reconciliation only)
    pub fn record_metrics(ctx: Context<RecordMetrics>, args: RecordMetricsArgs) -> Result<()> {
        instructions::record_metrics::handle(ctx, args)
    }

    /// Partial-update the global metadata (admin only)
    pub fn set_metadata(ctx: Context<SetMetadata>, args: SetMetadataArgs) -> Result<()> {
        instructions::set_metadata::handle(ctx, args)
    }
}
