// State definitions for the module registry
//
// Singletons (Config, Metrics, Lifecycle, GlobalMetadata) are created once
// at initialize and mutated in place forever. Keyed records (Repo, Module,
// ModuleVersion, Fork, ModuleRepoLink, AuthorityRecord) are created on
// demand and never deleted, only deactivated, so history stays auditable.

pub mod authority;
pub mod config;
pub mod fork;
pub mod lifecycle;
pub mod link;
pub mod metadata;
pub mod metrics;
pub mod module;
pub mod repo;

pub use authority::*;
pub use config::*;
pub use fork::*;
pub use lifecycle::*;
pub use link::*;
pub use metadata::*;
pub use metrics::*;
pub use module::*;
pub use repo::*;
