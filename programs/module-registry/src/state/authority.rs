use anchor_lang::prelude::*;

/// Role assigned to an on-chain authority record
///
/// A closed set checked by explicit match in the handlers; observers that
/// are not a repo's authority need at least `Operator`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Role {
    Admin,
    Operator,
    User,
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

/// On-chain role record for one authority pubkey
///
/// PDA: seeds = [b"authority", authority]. Only the config admin may create
/// or modify these records.
#[account]
pub struct AuthorityRecord {
    /// The pubkey this record describes
    pub authority: Pubkey,
    pub role: Role,
    /// Creation timestamp (Unix seconds)
    pub created_at: i64,
    /// Last mutation timestamp (Unix seconds)
    pub updated_at: i64,
    /// PDA bump
    pub bump: u8,
    /// Reserved for in-place schema evolution
    pub reserved: [u8; 32],
}

impl AuthorityRecord {
    pub const LEN: usize = 8 // discriminator
        + 32 // authority
        + 1  // role
        + 8  // created_at
        + 8  // updated_at
        + 1  // bump
        + 32; // reserved

    pub fn init(&mut self, authority: Pubkey, role: Role, bump: u8, now: i64) {
        self.authority = authority;
        self.role = role;
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

    pub fn set_role(&mut self, role: Role, now: i64) {
        self.role = role;
        self.updated_at = now;
    }

    /// Whether this role may record observations on repos it does not own
    pub fn can_observe(&self) -> bool {
        match self.role {
            Role::Admin | Role::Operator => true,
            Role::User => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observer_roles() {
        let mut record = AuthorityRecord {
            authority: Pubkey::default(),
            role: Role::default(),
            created_at: 0,
            updated_at: 0,
            bump: 0,
            reserved: [0u8; 32],
        };
        record.init(Pubkey::new_unique(), Role::User, 249, 100);
        assert!(!record.can_observe());

        record.set_role(Role::Operator, 200);
        assert!(record.can_observe());

        record.set_role(Role::Admin, 300);
        assert!(record.can_observe());
        assert_eq!(record.updated_at, 300);
    }
}
