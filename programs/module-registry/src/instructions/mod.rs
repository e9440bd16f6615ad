// Instruction handlers grouped by domain
//
// Each submodule exposes an `Args` struct where needed, an Accounts context
// and a `handle` function. The `#[program]` module in lib.rs delegates here
// so all business logic stays in the instruction-specific files.

pub mod create_fork;
pub mod initialize;
pub mod link_module_to_repo;
pub mod record_metrics;
pub mod record_observation;
pub mod register_module;
pub mod register_repo;
pub mod set_authority_role;
pub mod set_config;
pub mod set_lifecycle;
pub mod set_metadata;
pub mod update_fork_state;
pub mod update_module;
pub mod update_repo;

pub use create_fork::*;
pub use initialize::*;
pub use link_module_to_repo::*;
pub use record_metrics::*;
pub use record_observation::*;
pub use register_module::*;
pub use register_repo::*;
pub use set_authority_role::*;
pub use set_config::*;
pub use set_lifecycle::*;
pub use set_metadata::*;
pub use update_fork_state::*;
pub use update_module::*;
pub use update_repo::*;
