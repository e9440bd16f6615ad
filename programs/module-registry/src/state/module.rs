use anchor_lang::prelude::*;

use crate::errors::RegistryError;
use crate::validation::{
    validate_required_str, validate_str, MAX_NAME_LEN, MAX_TAGS_LEN, MAX_URI_LEN,
};

/// Semantic version triple
///
/// Field order gives the derived `Ord` exactly the lexicographic comparison
/// the version axis requires: (1,1,0) > (1,0,9) > (1,0,0).
#[derive(
    AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord,
)]
pub struct SemanticVersion {
    pub major: u16,
    pub minor: u16,
    pub patch: u16,
}

impl SemanticVersion {
    pub const SERIALIZED_LEN: usize = 6;

    pub fn new(major: u16, minor: u16, patch: u16) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// LE-encoded triple used as a PDA seed component
    pub fn seed_bytes(&self) -> [u8; 6] {
        let mut bytes = [0u8; 6];
        bytes[0..2].copy_from_slice(&self.major.to_le_bytes());
        bytes[2..4].copy_from_slice(&self.minor.to_le_bytes());
        bytes[4..6].copy_from_slice(&self.patch.to_le_bytes());
        bytes
    }
}

/// Generated module record
///
/// PDA: seeds = [b"module", module_key]. Back-references its home repo by
/// repo key, never by in-memory pointer; the version axis only moves
/// forward, with each bump snapshotted into an immutable `ModuleVersion`.
#[account]
pub struct Module {
    /// Identifying key used for PDA derivation
    pub module_key: Pubkey,
    /// Repo key of the repository this module was generated from
    pub repo_key: Pubkey,
    /// Only this key may update the module
    pub authority: Pubkey,
    pub name: String,
    pub metadata_uri: String,
    pub category: String,
    pub tags: String,
    pub is_active: bool,
    /// Current semantic version; strictly increasing across updates
    pub version: SemanticVersion,
    /// Repo key of the link currently marked primary, default when none
    pub primary_repo_key: Pubkey,
    /// Creation timestamp (Unix seconds)
    pub created_at: i64,
    /// Last mutation timestamp (Unix seconds)
    pub updated_at: i64,
    /// PDA bump
    pub bump: u8,
    /// Reserved for in-place schema evolution
    pub reserved: [u8; 64],
}

impl Module {
    pub const LEN: usize = 8 // discriminator
        + 32 // module_key
        + 32 // repo_key
        + 32 // authority
        + 4 + MAX_NAME_LEN // name
        + 4 + MAX_URI_LEN  // metadata_uri
        + 4 + MAX_NAME_LEN // category
        + 4 + MAX_TAGS_LEN // tags
        + 1  // is_active
        + SemanticVersion::SERIALIZED_LEN // version
        + 32 // primary_repo_key
        + 8  // created_at
        + 8  // updated_at
        + 1  // bump
        + 64; // reserved

    #[allow(clippy::too_many_arguments)]
    pub fn init(
        &mut self,
        module_key: Pubkey,
        repo_key: Pubkey,
        authority: Pubkey,
        name: String,
        metadata_uri: String,
        category: String,
        tags: String,
        version: SemanticVersion,
        bump: u8,
        now: i64,
    ) -> Result<()> {
        validate_required_str(&name, MAX_NAME_LEN)?;
        validate_required_str(&metadata_uri, MAX_URI_LEN)?;
        validate_str(&category, MAX_NAME_LEN)?;
        validate_str(&tags, MAX_TAGS_LEN)?;

        self.module_key = module_key;
        self.repo_key = repo_key;
        self.authority = authority;
        self.name = name;
        self.metadata_uri = metadata_uri;
        self.category = category;
        self.tags = tags;
        self.is_active = true;
        self.version = version;
        self.primary_repo_key = Pubkey::default();
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
        metadata_uri: Option<String>,
        category: Option<String>,
        tags: Option<String>,
        is_active: Option<bool>,
        now: i64,
    ) -> Result<()> {
        if let Some(v) = &name {
            validate_required_str(v, MAX_NAME_LEN)?;
        }
        if let Some(v) = &metadata_uri {
            validate_required_str(v, MAX_URI_LEN)?;
        }
        if let Some(v) = &category {
            validate_str(v, MAX_NAME_LEN)?;
        }
        if let Some(v) = &tags {
            validate_str(v, MAX_TAGS_LEN)?;
        }

        if let Some(v) = name {
            self.name = v;
        }
        if let Some(v) = metadata_uri {
            self.metadata_uri = v;
        }
        if let Some(v) = category {
            self.category = v;
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

    /// Require that the signer key matches the stored authority
    pub fn assert_authority(&self, signer: &Pubkey) -> Result<()> {
        require_keys_eq!(*signer, self.authority, RegistryError::InvalidAuthority);
        Ok(())
    }

    /// Advance the version axis; the new version must be strictly greater
    pub fn bump_version(&mut self, new_version: SemanticVersion, now: i64) -> Result<()> {
        require!(new_version > self.version, RegistryError::ValueOutOfRange);
        self.version = new_version;
        self.updated_at = now;
        Ok(())
    }
}

/// Immutable snapshot of a module at one semantic version
///
/// PDA: seeds = [b"module_version", module_key, version LE bytes]. Created
/// once per distinct version triple and never mutated again.
#[account]
pub struct ModuleVersion {
    /// Module key of the snapshotted module
    pub module_key: Pubkey,
    pub version: SemanticVersion,
    pub metadata_uri: String,
    pub changelog_uri: String,
    pub label: String,
    pub is_stable: bool,
    /// Creation timestamp (Unix seconds)
    pub created_at: i64,
    /// Equal to `created_at`; snapshots are never mutated
    pub updated_at: i64,
    /// PDA bump
    pub bump: u8,
    /// Reserved for in-place schema evolution
    pub reserved: [u8; 32],
}

impl ModuleVersion {
    pub const LEN: usize = 8 // discriminator
        + 32 // module_key
        + SemanticVersion::SERIALIZED_LEN // version
        + 4 + MAX_URI_LEN  // metadata_uri
        + 4 + MAX_URI_LEN  // changelog_uri
        + 4 + MAX_NAME_LEN // label
        + 1  // is_stable
        + 8  // created_at
        + 8  // updated_at
        + 1  // bump
        + 32; // reserved

    #[allow(clippy::too_many_arguments)]
    pub fn init(
        &mut self,
        module_key: Pubkey,
        version: SemanticVersion,
        metadata_uri: String,
        changelog_uri: String,
        label: String,
        is_stable: bool,
        bump: u8,
        now: i64,
    ) -> Result<()> {
        validate_required_str(&metadata_uri, MAX_URI_LEN)?;
        validate_str(&changelog_uri, MAX_URI_LEN)?;
        validate_str(&label, MAX_NAME_LEN)?;

        self.module_key = module_key;
        self.version = version;
        self.metadata_uri = metadata_uri;
        self.changelog_uri = changelog_uri;
        self.label = label;
        self.is_stable = is_stable;
        self.created_at = now;
        self.updated_at = now;
        self.bump = bump;
        self.reserved = [0u8; 32];
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module_at(now: i64) -> Module {
        let mut module = Module {
            module_key: Pubkey::default(),
            repo_key: Pubkey::default(),
            authority: Pubkey::default(),
            name: String::new(),
            metadata_uri: String::new(),
            category: String::new(),
            tags: String::new(),
            is_active: false,
            version: SemanticVersion::default(),
            primary_repo_key: Pubkey::default(),
            created_at: 0,
            updated_at: 0,
            bump: 0,
            reserved: [0u8; 64],
        };
        module
            .init(
                Pubkey::new_unique(),
                Pubkey::new_unique(),
                Pubkey::new_unique(),
                "parser".into(),
                "ipfs://manifest".into(),
                "analysis".into(),
                "ast,rust".into(),
                SemanticVersion::new(1, 0, 0),
                252,
                now,
            )
            .unwrap();
        module
    }

    #[test]
    fn test_version_ordering_is_lexicographic() {
        let v100 = SemanticVersion::new(1, 0, 0);
        let v101 = SemanticVersion::new(1, 0, 1);
        let v110 = SemanticVersion::new(1, 1, 0);
        let v200 = SemanticVersion::new(2, 0, 0);
        assert!(v101 > v100);
        assert!(v110 > v101);
        assert!(v200 > v110);
        // Large patch does not outrank a minor bump
        assert!(SemanticVersion::new(1, 1, 0) > SemanticVersion::new(1, 0, 999));
    }

    #[test]
    fn test_seed_bytes_are_little_endian() {
        let bytes = SemanticVersion::new(0x0102, 0x0304, 0x0506).seed_bytes();
        assert_eq!(bytes, [0x02, 0x01, 0x04, 0x03, 0x06, 0x05]);
    }

    #[test]
    fn test_version_bump_must_strictly_increase() {
        let mut module = module_at(100);
        assert!(module
            .bump_version(SemanticVersion::new(1, 0, 0), 200)
            .is_err());
        assert!(module
            .bump_version(SemanticVersion::new(0, 9, 9), 200)
            .is_err());
        assert_eq!(module.version, SemanticVersion::new(1, 0, 0));
        assert_eq!(module.updated_at, 100);

        module
            .bump_version(SemanticVersion::new(1, 1, 0), 300)
            .unwrap();
        assert_eq!(module.version, SemanticVersion::new(1, 1, 0));
        assert_eq!(module.updated_at, 300);
    }

    #[test]
    fn test_partial_update_preserves_untouched_fields() {
        let mut module = module_at(100);
        module
            .apply_update(None, None, Some("codegen".into()), None, None, 200)
            .unwrap();
        assert_eq!(module.category, "codegen");
        assert_eq!(module.name, "parser");
        assert_eq!(module.metadata_uri, "ipfs://manifest");
        assert!(module.is_active);
    }
}
