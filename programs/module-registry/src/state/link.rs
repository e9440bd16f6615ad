use anchor_lang::prelude::*;

use crate::state::config::CURRENT_SCHEMA_VERSION;
use crate::validation::{validate_str, MAX_NOTE_LEN};

/// Association between a module and a repository
///
/// PDA: seeds = [b"module_repo_link", module_key, repo_key], so at most one
/// link can exist per pair. At most one link per module carries
/// `is_primary`; the owning `Module` tracks which repo that is and the
/// link instruction demotes the previous primary in the same transaction.
#[account]
pub struct ModuleRepoLink {
    pub module_key: Pubkey,
    pub repo_key: Pubkey,
    /// Signer that created the link
    pub linked_by: Pubkey,
    pub is_primary: bool,
    pub notes: String,
    pub schema_version: u8,
    /// Creation timestamp (Unix seconds)
    pub created_at: i64,
    /// Last mutation timestamp (Unix seconds)
    pub updated_at: i64,
    /// PDA bump
    pub bump: u8,
    /// Reserved for in-place schema evolution
    pub reserved: [u8; 32],
}

impl ModuleRepoLink {
    pub const LEN: usize = 8 // discriminator
        + 32 // module_key
        + 32 // repo_key
        + 32 // linked_by
        + 1  // is_primary
        + 4 + MAX_NOTE_LEN // notes
        + 1  // schema_version
        + 8  // created_at
        + 8  // updated_at
        + 1  // bump
        + 32; // reserved

    pub fn init(
        &mut self,
        module_key: Pubkey,
        repo_key: Pubkey,
        linked_by: Pubkey,
        bump: u8,
        now: i64,
    ) {
        self.module_key = module_key;
        self.repo_key = repo_key;
        self.linked_by = linked_by;
        self.is_primary = false;
        self.notes = String::new();
        self.schema_version = CURRENT_SCHEMA_VERSION;
        self.created_at = now;
        self.updated_at = now;
        self.bump = bump;
        self.reserved = [0u8; 32];
    }

    /// True until `init` has run, used to detect an `init_if_needed`
    /// account that was just created
    pub fn is_uninitialized(&self) -> bool {
        self.created_at == 0
    }

    /// Apply a partial update. `None` leaves the stored field unchanged.
    pub fn apply_update(&mut self, notes: Option<String>, now: i64) -> Result<()> {
        if let Some(v) = &notes {
            validate_str(v, MAX_NOTE_LEN)?;
        }
        if let Some(v) = notes {
            self.notes = v;
        }
        self.updated_at = now;
        Ok(())
    }

    pub fn promote(&mut self, now: i64) {
        self.is_primary = true;
        self.updated_at = now;
    }

    pub fn demote(&mut self, now: i64) {
        self.is_primary = false;
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_and_promote() {
        let mut link = ModuleRepoLink {
            module_key: Pubkey::default(),
            repo_key: Pubkey::default(),
            linked_by: Pubkey::default(),
            is_primary: false,
            notes: String::new(),
            schema_version: 0,
            created_at: 0,
            updated_at: 0,
            bump: 0,
            reserved: [0u8; 32],
        };
        assert!(link.is_uninitialized());

        link.init(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            250,
            100,
        );
        assert!(!link.is_uninitialized());
        assert!(!link.is_primary);
        assert_eq!(link.schema_version, CURRENT_SCHEMA_VERSION);

        link.promote(200);
        assert!(link.is_primary);
        link.demote(300);
        assert!(!link.is_primary);
        assert_eq!(link.updated_at, 300);
    }
}
