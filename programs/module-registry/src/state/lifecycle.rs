use anchor_lang::prelude::*;

use crate::errors::RegistryError;

/// Deployment lifecycle singleton
///
/// PDA: seeds = [b"lifecycle"]. Gates every mutating instruction except the
/// admin-only config and lifecycle updates themselves (otherwise a locked
/// deployment could never be unlocked).
#[account]
pub struct Lifecycle {
    /// When set, all non-admin mutating instructions fail
    pub is_write_locked: bool,
    /// When set, the deployment serves reads only
    pub is_read_only: bool,
    /// Hash or reference to an off-chain note explaining the current phase
    pub note_ref: [u8; 32],
    /// Creation timestamp (Unix seconds)
    pub created_at: i64,
    /// Last mutation timestamp (Unix seconds)
    pub updated_at: i64,
    /// PDA bump
    pub bump: u8,
    /// Reserved for in-place schema evolution
    pub reserved: [u8; 32],
}

impl Lifecycle {
    pub const LEN: usize = 8 // discriminator
        + 1  // is_write_locked
        + 1  // is_read_only
        + 32 // note_ref
        + 8  // created_at
        + 8  // updated_at
        + 1  // bump
        + 32; // reserved

    pub fn init(&mut self, bump: u8, now: i64) {
        self.is_write_locked = false;
        self.is_read_only = false;
        self.note_ref = [0u8; 32];
        self.created_at = now;
        self.updated_at = now;
        self.bump = bump;
        self.reserved = [0u8; 32];
    }

    /// Apply a partial update. `None` leaves the stored field unchanged.
    pub fn apply_update(
        &mut self,
        is_write_locked: Option<bool>,
        is_read_only: Option<bool>,
        note_ref: Option<[u8; 32]>,
        now: i64,
    ) {
        if let Some(locked) = is_write_locked {
            self.is_write_locked = locked;
        }
        if let Some(read_only) = is_read_only {
            self.is_read_only = read_only;
        }
        if let Some(note_ref) = note_ref {
            self.note_ref = note_ref;
        }
        self.updated_at = now;
    }

    /// Require that the deployment currently accepts writes
    pub fn assert_writes_allowed(&self) -> Result<()> {
        require!(
            !self.is_write_locked && !self.is_read_only,
            RegistryError::DeploymentInactive
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_lock_blocks_writes() {
        let mut lifecycle = Lifecycle {
            is_write_locked: false,
            is_read_only: false,
            note_ref: [0u8; 32],
            created_at: 0,
            updated_at: 0,
            bump: 0,
            reserved: [0u8; 32],
        };
        lifecycle.init(255, 100);
        assert!(lifecycle.assert_writes_allowed().is_ok());

        lifecycle.apply_update(Some(true), None, None, 200);
        assert!(lifecycle.assert_writes_allowed().is_err());
        assert!(!lifecycle.is_read_only);

        lifecycle.apply_update(Some(false), Some(true), None, 300);
        assert!(lifecycle.assert_writes_allowed().is_err());

        lifecycle.apply_update(None, Some(false), None, 400);
        assert!(lifecycle.assert_writes_allowed().is_ok());
        assert_eq!(lifecycle.updated_at, 400);
        assert_eq!(lifecycle.created_at, 100);
    }
}
