use anchor_lang::prelude::*;

use crate::errors::RegistryError;
use crate::validation::validate_fee_bps;

/// Current schema version stamped onto versioned accounts
pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Global configuration singleton
///
/// PDA: seeds = [b"config"]. Initialized exactly once per deployment; the
/// payer of `initialize` becomes the admin and only the admin may update it.
#[account]
pub struct Config {
    /// Admin authority for this deployment
    pub admin: Pubkey,
    /// Current fee in basis points (0..=10_000)
    pub fee_bps: u16,
    /// Maximum modules that may be linked to a single repository
    pub max_modules_per_repo: u32,
    /// Schema version of this account layout
    pub schema_version: u8,
    /// Whether the deployment accepts non-admin mutations
    pub is_active: bool,
    /// Hash or reference to an off-chain policy document
    pub policy_ref: [u8; 32],
    /// Creation timestamp (Unix seconds)
    pub created_at: i64,
    /// Last mutation timestamp (Unix seconds)
    pub updated_at: i64,
    /// PDA bump
    pub bump: u8,
    /// Reserved for in-place schema evolution
    pub reserved: [u8; 64],
}

impl Config {
    pub const LEN: usize = 8 // discriminator
        + 32 // admin
        + 2  // fee_bps
        + 4  // max_modules_per_repo
        + 1  // schema_version
        + 1  // is_active
        + 32 // policy_ref
        + 8  // created_at
        + 8  // updated_at
        + 1  // bump
        + 64; // reserved

    pub fn init(
        &mut self,
        admin: Pubkey,
        fee_bps: u16,
        max_modules_per_repo: u32,
        policy_ref: [u8; 32],
        bump: u8,
        now: i64,
    ) -> Result<()> {
        validate_fee_bps(fee_bps)?;
        require!(max_modules_per_repo > 0, RegistryError::ValueOutOfRange);

        self.admin = admin;
        self.fee_bps = fee_bps;
        self.max_modules_per_repo = max_modules_per_repo;
        self.schema_version = CURRENT_SCHEMA_VERSION;
        self.is_active = true;
        self.policy_ref = policy_ref;
        self.created_at = now;
        self.updated_at = now;
        self.bump = bump;
        self.reserved = [0u8; 64];
        Ok(())
    }

    /// Apply a partial update. `None` leaves the stored field unchanged.
    pub fn apply_update(
        &mut self,
        admin: Option<Pubkey>,
        fee_bps: Option<u16>,
        max_modules_per_repo: Option<u32>,
        is_active: Option<bool>,
        policy_ref: Option<[u8; 32]>,
        now: i64,
    ) -> Result<()> {
        // Validate everything before the first assignment so a rejected
        // update leaves the account untouched
        if let Some(fee_bps) = fee_bps {
            validate_fee_bps(fee_bps)?;
        }
        if let Some(max_modules) = max_modules_per_repo {
            require!(max_modules > 0, RegistryError::ValueOutOfRange);
        }

        if let Some(fee_bps) = fee_bps {
            self.fee_bps = fee_bps;
        }
        if let Some(max_modules) = max_modules_per_repo {
            self.max_modules_per_repo = max_modules;
        }
        if let Some(admin) = admin {
            self.admin = admin;
        }
        if let Some(is_active) = is_active {
            self.is_active = is_active;
        }
        if let Some(policy_ref) = policy_ref {
            self.policy_ref = policy_ref;
        }
        self.updated_at = now;
        Ok(())
    }

    /// Require that the signer key matches the stored admin
    pub fn assert_admin(&self, signer: &Pubkey) -> Result<()> {
        require_keys_eq!(*signer, self.admin, RegistryError::InvalidAdmin);
        Ok(())
    }

    /// Require that the deployment is active for non-admin mutations
    pub fn assert_active(&self) -> Result<()> {
        require!(self.is_active, RegistryError::DeploymentInactive);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_at(now: i64) -> Config {
        let mut config = Config {
            admin: Pubkey::new_unique(),
            fee_bps: 0,
            max_modules_per_repo: 0,
            schema_version: 0,
            is_active: false,
            policy_ref: [0u8; 32],
            created_at: 0,
            updated_at: 0,
            bump: 0,
            reserved: [0u8; 64],
        };
        config
            .init(Pubkey::new_unique(), 250, 100, [7u8; 32], 254, now)
            .unwrap();
        config
    }

    #[test]
    fn test_init_sets_defaults() {
        let config = config_at(1_000);
        assert!(config.is_active);
        assert_eq!(config.schema_version, CURRENT_SCHEMA_VERSION);
        assert_eq!(config.created_at, 1_000);
        assert_eq!(config.updated_at, 1_000);
    }

    #[test]
    fn test_partial_update_preserves_untouched_fields() {
        let mut config = config_at(1_000);
        let admin = config.admin;
        config
            .apply_update(None, Some(10_000), None, None, None, 2_000)
            .unwrap();
        assert_eq!(config.fee_bps, 10_000);
        assert_eq!(config.admin, admin);
        assert_eq!(config.max_modules_per_repo, 100);
        assert!(config.is_active);
        assert_eq!(config.policy_ref, [7u8; 32]);
        assert_eq!(config.updated_at, 2_000);
        assert_eq!(config.created_at, 1_000);
    }

    #[test]
    fn test_fee_bps_upper_bound() {
        let mut config = config_at(1_000);
        assert!(config
            .apply_update(None, Some(10_001), None, None, None, 2_000)
            .is_err());
        // Rejected update must not have touched anything
        assert_eq!(config.fee_bps, 250);
        assert_eq!(config.updated_at, 1_000);
    }

    #[test]
    fn test_assert_admin() {
        let config = config_at(1_000);
        assert!(config.assert_admin(&config.admin).is_ok());
        assert!(config.assert_admin(&Pubkey::new_unique()).is_err());
    }
}
