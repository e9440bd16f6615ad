use anchor_lang::prelude::*;

use crate::errors::RegistryError;

/// Aggregate metrics singleton
///
/// PDA: seeds = [b"metrics"]. Counters grow implicitly as repos, modules and
/// forks are registered and observations land. `apply_override` is the
/// admin reconciliation path: a plain per-field overwrite, never a merge.
#[account]
pub struct Metrics {
    pub total_repos: u64,
    pub total_modules: u64,
    pub total_forks: u64,
    pub total_observations: u64,
    pub total_lines_of_code: u64,
    pub total_files_processed: u64,
    /// Creation timestamp (Unix seconds)
    pub created_at: i64,
    /// Last mutation timestamp (Unix seconds)
    pub updated_at: i64,
    /// PDA bump
    pub bump: u8,
    /// Reserved for in-place schema evolution
    pub reserved: [u8; 64],
}

impl Metrics {
    pub const LEN: usize = 8 // discriminator
        + 8 * 6 // counters
        + 8  // created_at
        + 8  // updated_at
        + 1  // bump
        + 64; // reserved

    pub fn init(&mut self, bump: u8, now: i64) {
        self.total_repos = 0;
        self.total_modules = 0;
        self.total_forks = 0;
        self.total_observations = 0;
        self.total_lines_of_code = 0;
        self.total_files_processed = 0;
        self.created_at = now;
        self.updated_at = now;
        self.bump = bump;
        self.reserved = [0u8; 64];
    }

    pub fn record_repo_created(&mut self, now: i64) -> Result<()> {
        self.total_repos = self
            .total_repos
            .checked_add(1)
            .ok_or(RegistryError::InternalError)?;
        self.updated_at = now;
        Ok(())
    }

    pub fn record_module_created(&mut self, now: i64) -> Result<()> {
        self.total_modules = self
            .total_modules
            .checked_add(1)
            .ok_or(RegistryError::InternalError)?;
        self.updated_at = now;
        Ok(())
    }

    pub fn record_fork_created(&mut self, now: i64) -> Result<()> {
        self.total_forks = self
            .total_forks
            .checked_add(1)
            .ok_or(RegistryError::InternalError)?;
        self.updated_at = now;
        Ok(())
    }

    /// Fold one observation into the aggregates
    pub fn record_observation(
        &mut self,
        lines_of_code: u64,
        files_processed: u32,
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
        self.updated_at = now;
        Ok(())
    }

    /// Admin override: each `Some` value replaces the stored counter
    /// outright (last-writer-wins); `None` keeps the stored value.
    pub fn apply_override(
        &mut self,
        total_repos: Option<u64>,
        total_modules: Option<u64>,
        total_forks: Option<u64>,
        total_observations: Option<u64>,
        total_lines_of_code: Option<u64>,
        total_files_processed: Option<u64>,
        now: i64,
    ) -> Result<()> {
        // u64::MAX is rejected as a sentinel for corrupt off-chain input
        for value in [
            total_repos,
            total_modules,
            total_forks,
            total_observations,
            total_lines_of_code,
            total_files_processed,
        ]
        .into_iter()
        .flatten()
        {
            require!(value < u64::MAX, RegistryError::ValueOutOfRange);
        }

        if let Some(v) = total_repos {
            self.total_repos = v;
        }
        if let Some(v) = total_modules {
            self.total_modules = v;
        }
        if let Some(v) = total_forks {
            self.total_forks = v;
        }
        if let Some(v) = total_observations {
            self.total_observations = v;
        }
        if let Some(v) = total_lines_of_code {
            self.total_lines_of_code = v;
        }
        if let Some(v) = total_files_processed {
            self.total_files_processed = v;
        }
        self.updated_at = now;
        Ok(())
    }
}
