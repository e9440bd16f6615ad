use anchor_lang::prelude::*;

use crate::state::{Role, SemanticVersion};

// ================================
// Registry Events
// ================================
//
// One event per successful instruction, emitted after every validation and
// mutation has succeeded. A failed instruction emits nothing. Delivery and
// consumption are the concern of external indexers.

/// Emitted once when the deployment singletons are created
#[event]
pub struct RegistryInitialized {
    pub admin: Pubkey,
    pub fee_bps: u16,
    pub max_modules_per_repo: u32,
    pub created_at: i64,
}

/// Emitted when the admin updates the configuration
#[event]
pub struct ConfigUpdated {
    pub admin: Pubkey,
    pub fee_bps: u16,
    pub max_modules_per_repo: u32,
    pub is_active: bool,
    pub updated_at: i64,
}

/// Emitted when the admin changes the deployment lifecycle
#[event]
pub struct LifecycleUpdated {
    pub admin: Pubkey,
    pub is_write_locked: bool,
    pub is_read_only: bool,
    pub updated_at: i64,
}

/// Emitted when the admin grants or changes a role record
#[event]
pub struct AuthorityRoleSet {
    pub authority: Pubkey,
    pub role: Role,
    pub updated_at: i64,
}

/// Emitted when a repository is registered
#[event]
pub struct RepoRegistered {
    pub repo: Pubkey,
    pub repo_key: Pubkey,
    pub authority: Pubkey,
    pub name: String,
    pub url: String,
    pub created_at: i64,
}

/// Emitted when a repository is updated
#[event]
pub struct RepoUpdated {
    pub repo: Pubkey,
    pub authority: Pubkey,
    pub is_active: bool,
    pub allow_observation: bool,
    pub updated_at: i64,
}

/// Emitted when a module is registered
#[event]
pub struct ModuleRegistered {
    pub module: Pubkey,
    pub module_key: Pubkey,
    pub repo: Pubkey,
    pub authority: Pubkey,
    pub name: String,
    pub version: SemanticVersion,
    /// Initial version snapshot, when one was created
    pub snapshot: Option<Pubkey>,
    pub created_at: i64,
}

/// Emitted when a module is updated
#[event]
pub struct ModuleUpdated {
    pub module: Pubkey,
    pub authority: Pubkey,
    pub version: SemanticVersion,
    /// New version snapshot, when the update bumped the version
    pub snapshot: Option<Pubkey>,
    pub is_active: bool,
    pub updated_at: i64,
}

/// Emitted when a module is linked to a repository
#[event]
pub struct ModuleLinked {
    pub link: Pubkey,
    pub module: Pubkey,
    pub repo: Pubkey,
    pub linked_by: Pubkey,
    pub is_primary: bool,
    pub updated_at: i64,
}

/// Emitted when a fork is created
#[event]
pub struct ForkCreated {
    pub fork: Pubkey,
    pub fork_key: Pubkey,
    pub owner: Pubkey,
    pub parent_key: Pubkey,
    pub is_root: bool,
    pub depth: u16,
    pub created_at: i64,
}

/// Emitted when a fork is updated
#[event]
pub struct ForkUpdated {
    pub fork: Pubkey,
    pub owner: Pubkey,
    pub is_active: bool,
    pub updated_at: i64,
}

/// Emitted when an observation run lands on a repository
#[event]
pub struct ObservationRecorded {
    pub repo: Pubkey,
    pub observer: Pubkey,
    pub lines_of_code: u64,
    pub files_processed: u32,
    pub modules_touched: u32,
    pub revision: String,
    pub observed_at: i64,
}

/// Emitted when the admin reconciles the aggregate metrics
#[event]
pub struct MetricsReconciled {
    pub admin: Pubkey,
    pub total_repos: u64,
    pub total_modules: u64,
    pub total_forks: u64,
    pub total_observations: u64,
    pub total_lines_of_code: u64,
    pub total_files_processed: u64,
    pub updated_at: i64,
}

/// Emitted when the admin updates the global metadata
#[event]
pub struct MetadataUpdated {
    pub admin: Pubkey,
    pub updated_at: i64,
}
