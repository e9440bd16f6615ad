use anchor_lang::prelude::*;

use crate::errors::RegistryError;
use crate::validation::{
    validate_required_str, validate_str, MAX_NAME_LEN, MAX_TAGS_LEN, MAX_URI_LEN,
};

/// Tracked repository record
///
/// PDA: seeds = [b"repo", repo_key]. Created by any signer, who becomes the
/// authority; never deleted, only deactivated via `is_active`.
#[account]
pub struct Repo {
    /// Identifying key used for PDA derivation
    pub repo_key: Pubkey,
    /// Only this key may update the repo
    pub authority: Pubkey,
    pub name: String,
    pub url: String,
    pub tags: String,
    pub is_active: bool,
    /// Whether non-authority observers may record observations
    pub allow_observation: bool,
    pub total_observations: u64,
    pub total_lines_of_code: u64,
    pub total_files_processed: u64,
    /// Number of modules linked to this repo
    pub total_modules: u32,
    /// Timestamp of the most recent observation, zero if never observed
    pub last_observed_at: i64,
    /// Signer of the most recent observation
    pub last_observer: Pubkey,
    /// Creation timestamp (Unix seconds)
    pub created_at: i64,
    /// Last mutation timestamp (Unix seconds)
    pub updated_at: i64,
    /// PDA bump
    pub bump: u8,
    /// Reserved for in-place schema evolution
    pub reserved: [u8; 64],
}

impl Repo {
    pub const LEN: usize = 8 // discriminator
        + 32 // repo_key
        + 32 // authority
        + 4 + MAX_NAME_LEN // name
        + 4 + MAX_URI_LEN  // url
        + 4 + MAX_TAGS_LEN // tags
        + 1  // is_active
        + 1  // allow_observation
        + 8  // total_observations
        + 8  // total_lines_of_code
        + 8  // total_files_processed
        + 4  // total_modules
        + 8  // last_observed_at
        + 32 // last_observer
        + 8  // created_at
        + 8  // updated_at
        + 1  // bump
        + 64; // reserved

    #[allow(clippy::too_many_arguments)]
    pub fn init(
        &mut self,
        repo_key: Pubkey,
        authority: Pubkey,
        name: String,
        url: String,
        tags: String,
        allow_observation: bool,
        bump: u8,
        now: i64,
    ) -> Result<()> {
        validate_required_str(&name, MAX_NAME_LEN)?;
        validate_required_str(&url, MAX_URI_LEN)?;
        validate_str(&tags, MAX_TAGS_LEN)?;

        self.repo_key = repo_key;
        self.authority = authority;
        self.name = name;
        self.url = url;
        self.tags = tags;
        self.is_active = true;
        self.allow_observation = allow_observation;
        self.total_observations = 0;
        self.total_lines_of_code = 0;
        self.total_files_processed = 0;
        self.total_modules = 0;
        self.last_observed_at = 0;
        self.last_observer = Pubkey::default();
        self.created_at = now;
        self.updated_at = now;
        self.bump = bump;
        self.reserved = [0u8; 64];
        Ok(())
    }

    /// Apply a partial update. `None` leaves the stored field unchanged.
    pub fn apply_update(
        &mut self,
        name: Option<String>,
        url: Option<String>,
        tags: Option<String>,
        is_active: Option<bool>,
        allow_observation: Option<bool>,
        now: i64,
    ) -> Result<()> {
        if let Some(v) = &name {
            validate_required_str(v, MAX_NAME_LEN)?;
        }
        if let Some(v) = &url {
            validate_required_str(v, MAX_URI_LEN)?;
        }
        if let Some(v) = &tags {
            validate_str(v, MAX_TAGS_LEN)?;
        }

        if let Some(v) = name {
            self.name = v;
        }
        if let Some(v) = url {
            self.url = v;
        }
        if let Some(v) = tags {
            self.tags = v;
        }
        if let Some(v) = is_active {
            self.is_active = v;
        }
        if let Some(v) = allow_observation {
            self.allow_observation = v;
        }
        self.updated_at = now;
        Ok(())
    }

    /// Require that the signer key matches the stored authority
    pub fn assert_authority(&self, signer: &Pubkey) -> Result<()> {
        require_keys_eq!(*signer, self.authority, RegistryError::InvalidAuthority);
        Ok(())
    }

    /// Require that the repo is active
    pub fn assert_active(&self) -> Result<()> {
        require!(self.is_active, RegistryError::DeploymentInactive);
        Ok(())
    }

    /// Count one newly linked module against the configured cap
    pub fn record_module_linked(&mut self, max_modules_per_repo: u32, now: i64) -> Result<()> {
        let total = self
            .total_modules
            .checked_add(1)
            .ok_or(RegistryError::InternalError)?;
        require!(total <= max_modules_per_repo, RegistryError::ValueOutOfRange);
        self.total_modules = total;
        self.updated_at = now;
        Ok(())
    }

    /// Fold one observation into per-repo statistics
    pub fn record_observation(
        &mut self,
        lines_of_code: u64,
        files_processed: u32,
        observer: Pubkey,
        observed_at: i64,
        now: i64,
    ) -> Result<()> {
        let observations = self
            .total_observations
            .checked_add(1)
            .ok_or(RegistryError::InternalError)?;
        let lines = self
            .total_lines_of_code
            .checked_add(lines_of_code)
            .ok_or(RegistryError::InternalError)?;
        let files = self
            .total_files_processed
            .checked_add(u64::from(files_processed))
            .ok_or(RegistryError::InternalError)?;

        self.total_observations = observations;
        self.total_lines_of_code = lines;
        self.total_files_processed = files;
        self.last_observed_at = observed_at;
        self.last_observer = observer;
        self.updated_at = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo_at(now: i64) -> Repo {
        let mut repo = Repo {
            repo_key: Pubkey::default(),
            authority: Pubkey::default(),
            name: String::new(),
            url: String::new(),
            tags: String::new(),
            is_active: false,
            allow_observation: false,
            total_observations: 0,
            total_lines_of_code: 0,
            total_files_processed: 0,
            total_modules: 0,
            last_observed_at: 0,
            last_observer: Pubkey::default(),
            created_at: 0,
            updated_at: 0,
            bump: 0,
            reserved: [0u8; 64],
        };
        repo.init(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            "core".into(),
            "https://git.example.org/core".into(),
            "rust,onchain".into(),
            true,
            253,
            now,
        )
        .unwrap();
        repo
    }

    #[test]
    fn test_init_rejects_empty_name() {
        let mut repo = repo_at(100);
        assert!(repo
            .init(
                Pubkey::new_unique(),
                Pubkey::new_unique(),
                String::new(),
                "https://git.example.org".into(),
                String::new(),
                false,
                1,
                100,
            )
            .is_err());
    }

    #[test]
    fn test_partial_update_preserves_untouched_fields() {
        let mut repo = repo_at(100);
        repo.apply_update(None, None, None, Some(false), None, 200)
            .unwrap();
        assert!(!repo.is_active);
        assert_eq!(repo.name, "core");
        assert_eq!(repo.url, "https://git.example.org/core");
        assert!(repo.allow_observation);
        assert_eq!(repo.updated_at, 200);
    }

    #[test]
    fn test_module_cap_enforced() {
        let mut repo = repo_at(100);
        repo.record_module_linked(2, 110).unwrap();
        repo.record_module_linked(2, 120).unwrap();
        assert!(repo.record_module_linked(2, 130).is_err());
        assert_eq!(repo.total_modules, 2);
    }

    #[test]
    fn test_observation_updates_stats() {
        let mut repo = repo_at(100);
        let observer = Pubkey::new_unique();
        repo.record_observation(9_000, 32, observer, 190, 200).unwrap();
        assert_eq!(repo.total_observations, 1);
        assert_eq!(repo.total_lines_of_code, 9_000);
        assert_eq!(repo.total_files_processed, 32);
        assert_eq!(repo.last_observed_at, 190);
        assert_eq!(repo.last_observer, observer);
    }
}
