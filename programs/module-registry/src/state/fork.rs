use anchor_lang::prelude::*;

use crate::errors::RegistryError;
use crate::validation::{
    validate_required_str, validate_str, MAX_NAME_LEN, MAX_TAGS_LEN, MAX_URI_LEN,
};

/// Fork record: an independent configuration profile, optionally descended
/// from a parent fork
///
/// PDA: seeds = [b"fork", fork_key]. `is_root` and `depth` are fixed at
/// creation; only label, metadata, tags and the active flag can change.
#[account]
pub struct Fork {
    /// Identifying key used for PDA derivation
    pub fork_key: Pubkey,
    /// Fork key of the parent, default for root or detached forks
    pub parent_key: Pubkey,
    /// Only this key may update the fork
    pub owner: Pubkey,
    pub label: String,
    pub metadata_uri: String,
    pub tags: String,
    pub is_root: bool,
    pub is_active: bool,
    /// Distance from the root of the fork tree
    pub depth: u16,
    /// Creation timestamp (Unix seconds)
    pub created_at: i64,
    /// Last mutation timestamp (Unix seconds)
    pub updated_at: i64,
    /// PDA bump
    pub bump: u8,
    /// Reserved for in-place schema evolution
    pub reserved: [u8; 64],
}

impl Fork {
    pub const LEN: usize = 8 // discriminator
        + 32 // fork_key
        + 32 // parent_key
        + 32 // owner
        + 4 + MAX_NAME_LEN // label
        + 4 + MAX_URI_LEN  // metadata_uri
        + 4 + MAX_TAGS_LEN // tags
        + 1  // is_root
        + 1  // is_active
        + 2  // depth
        + 8  // created_at
        + 8  // updated_at
        + 1  // bump
        + 64; // reserved

    #[allow(clippy::too_many_arguments)]
    pub fn init(
        &mut self,
        fork_key: Pubkey,
        parent_key: Pubkey,
        owner: Pubkey,
        label: String,
        metadata_uri: String,
        tags: String,
        is_root: bool,
        depth: u16,
        bump: u8,
        now: i64,
    ) -> Result<()> {
        validate_required_str(&label, MAX_NAME_LEN)?;
        validate_required_str(&metadata_uri, MAX_URI_LEN)?;
        validate_str(&tags, MAX_TAGS_LEN)?;

        self.fork_key = fork_key;
        self.parent_key = parent_key;
        self.owner = owner;
        self.label = label;
        self.metadata_uri = metadata_uri;
        self.tags = tags;
        self.is_root = is_root;
        self.is_active = true;
        self.depth = depth;
        self.created_at = now;
        self.updated_at = now;
        self.bump = bump;
        self.reserved = [0u8; 64];
        Ok(())
    }

    /// Apply a partial update. `None` leaves the stored field unchanged.
    /// `is_root` and `depth` are not updatable.
    pub fn apply_update(
        &mut self,
        label: Option<String>,
        metadata_uri: Option<String>,
        tags: Option<String>,
        is_active: Option<bool>,
        now: i64,
    ) -> Result<()> {
        if let Some(v) = &label {
            validate_required_str(v, MAX_NAME_LEN)?;
        }
        if let Some(v) = &metadata_uri {
            validate_required_str(v, MAX_URI_LEN)?;
        }
        if let Some(v) = &tags {
            validate_str(v, MAX_TAGS_LEN)?;
        }

        if let Some(v) = label {
            self.label = v;
        }
        if let Some(v) = metadata_uri {
            self.metadata_uri = v;
        }
        if let Some(v) = tags {
            self.tags = v;
        }
        if let Some(v) = is_active {
            self.is_active = v;
        }
        self.updated_at = now;
        Ok(())
    }

    /// Require that the signer key matches the stored owner
    pub fn assert_owner(&self, signer: &Pubkey) -> Result<()> {
        require_keys_eq!(*signer, self.owner, RegistryError::InvalidForkOwner);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fork_at(now: i64) -> Fork {
        let mut fork = Fork {
            fork_key: Pubkey::default(),
            parent_key: Pubkey::default(),
            owner: Pubkey::default(),
            label: String::new(),
            metadata_uri: String::new(),
            tags: String::new(),
            is_root: false,
            is_active: false,
            depth: 0,
            created_at: 0,
            updated_at: 0,
            bump: 0,
            reserved: [0u8; 64],
        };
        fork.init(
            Pubkey::new_unique(),
            Pubkey::default(),
            Pubkey::new_unique(),
            "lab-alpha".into(),
            "ipfs://fork-manifest".into(),
            "experimental".into(),
            true,
            0,
            251,
            now,
        )
        .unwrap();
        fork
    }

    #[test]
    fn test_owner_check() {
        let fork = fork_at(100);
        assert!(fork.assert_owner(&fork.owner).is_ok());
        assert!(fork.assert_owner(&Pubkey::new_unique()).is_err());
    }

    #[test]
    fn test_update_cannot_touch_lineage() {
        let mut fork = fork_at(100);
        fork.apply_update(Some("lab-beta".into()), None, None, Some(false), 200)
            .unwrap();
        assert_eq!(fork.label, "lab-beta");
        assert!(!fork.is_active);
        // Lineage fields are fixed at creation
        assert!(fork.is_root);
        assert_eq!(fork.depth, 0);
    }
}
