// Standardized PDA derivation patterns for the module registry
use anchor_lang::prelude::*;

use crate::errors::RegistryError;
use crate::state::SemanticVersion;

/// Standard PDA seeds for the registry program
pub struct RegistrySeeds;

impl RegistrySeeds {
    /// Global configuration singleton seed
    pub const CONFIG: &'static [u8] = b"config";

    /// Aggregate metrics singleton seed
    pub const METRICS: &'static [u8] = b"metrics";

    /// Lifecycle singleton seed
    pub const LIFECYCLE: &'static [u8] = b"lifecycle";

    /// Global metadata singleton seed
    pub const GLOBAL_METADATA: &'static [u8] = b"global_metadata";

    /// Repository PDA seed
    pub const REPO: &'static [u8] = b"repo";

    /// Module PDA seed
    pub const MODULE: &'static [u8] = b"module";

    /// Module version snapshot PDA seed
    pub const MODULE_VERSION: &'static [u8] = b"module_version";

    /// Fork PDA seed
    pub const FORK: &'static [u8] = b"fork";

    /// Module-to-repo link PDA seed
    pub const MODULE_REPO_LINK: &'static [u8] = b"module_repo_link";

    /// On-chain authority role record PDA seed
    pub const AUTHORITY: &'static [u8] = b"authority";
}

/// PDA derivation helpers
///
/// Derivation is a pure function of the per-kind seed and the identifying
/// keys; it never touches account storage, so clients can pre-compute
/// addresses before the accounts exist.
impl RegistrySeeds {
    /// Derive the config singleton PDA
    pub fn config(program_id: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[Self::CONFIG], program_id)
    }

    /// Derive the metrics singleton PDA
    pub fn metrics(program_id: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[Self::METRICS], program_id)
    }

    /// Derive the lifecycle singleton PDA
    pub fn lifecycle(program_id: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[Self::LIFECYCLE], program_id)
    }

    /// Derive the global metadata singleton PDA
    pub fn global_metadata(program_id: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[Self::GLOBAL_METADATA], program_id)
    }

    /// Derive a repository PDA from its repo key
    pub fn repo(repo_key: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[Self::REPO, repo_key.as_ref()], program_id)
    }

    /// Derive a module PDA from its module key
    pub fn module(module_key: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[Self::MODULE, module_key.as_ref()], program_id)
    }

    /// Derive a module version snapshot PDA from the module key and the
    /// LE-encoded version triple
    pub fn module_version(
        module_key: &Pubkey,
        version: &SemanticVersion,
        program_id: &Pubkey,
    ) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[
                Self::MODULE_VERSION,
                module_key.as_ref(),
                &version.seed_bytes(),
            ],
            program_id,
        )
    }

    /// Derive a fork PDA from its fork key
    pub fn fork(fork_key: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[Self::FORK, fork_key.as_ref()], program_id)
    }

    /// Derive a module-repo link PDA from the module and repo keys
    pub fn module_repo_link(
        module_key: &Pubkey,
        repo_key: &Pubkey,
        program_id: &Pubkey,
    ) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[
                Self::MODULE_REPO_LINK,
                module_key.as_ref(),
                repo_key.as_ref(),
            ],
            program_id,
        )
    }

    /// Derive an authority role record PDA from the authority pubkey
    pub fn authority_record(authority: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[Self::AUTHORITY, authority.as_ref()], program_id)
    }
}

/// Re-derive an address and require that it matches the supplied account.
///
/// Used wherever an instruction argument carries an identifying key that
/// back-references another record: the key must derive to exactly the
/// account that was passed in.
pub fn assert_derivation(expected: &Pubkey, derived: &Pubkey) -> Result<()> {
    require_keys_eq!(*expected, *derived, RegistryError::InvalidPda);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derivation_is_deterministic() {
        let program_id = Pubkey::new_unique();
        let repo_key = Pubkey::new_unique();

        let (a, bump_a) = RegistrySeeds::repo(&repo_key, &program_id);
        let (b, bump_b) = RegistrySeeds::repo(&repo_key, &program_id);
        assert_eq!(a, b);
        assert_eq!(bump_a, bump_b);
    }

    #[test]
    fn test_distinct_keys_derive_distinct_addresses() {
        let program_id = Pubkey::new_unique();
        let (a, _) = RegistrySeeds::repo(&Pubkey::new_unique(), &program_id);
        let (b, _) = RegistrySeeds::repo(&Pubkey::new_unique(), &program_id);
        assert_ne!(a, b);

        // Same identifying key under different kinds must not collide either
        let key = Pubkey::new_unique();
        let (repo, _) = RegistrySeeds::repo(&key, &program_id);
        let (module, _) = RegistrySeeds::module(&key, &program_id);
        assert_ne!(repo, module);
    }

    #[test]
    fn test_version_triple_changes_address() {
        let program_id = Pubkey::new_unique();
        let module_key = Pubkey::new_unique();
        let v1 = SemanticVersion::new(1, 0, 0);
        let v2 = SemanticVersion::new(1, 0, 1);

        let (a, _) = RegistrySeeds::module_version(&module_key, &v1, &program_id);
        let (b, _) = RegistrySeeds::module_version(&module_key, &v2, &program_id);
        assert_ne!(a, b);
    }

    #[test]
    fn test_assert_derivation() {
        let key = Pubkey::new_unique();
        assert!(assert_derivation(&key, &key).is_ok());
        assert!(assert_derivation(&key, &Pubkey::new_unique()).is_err());
    }
}
