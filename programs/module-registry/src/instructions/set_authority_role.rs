use anchor_lang::prelude::*;

use crate::events::AuthorityRoleSet;
use crate::pda::RegistrySeeds;
use crate::state::{AuthorityRecord, Config, Lifecycle, Role};

/// Arguments for the `set_authority_role` instruction
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct SetAuthorityRoleArgs {
    /// Pubkey the role record describes
    pub authority: Pubkey,
    pub role: Role,
}

#[derive(Accounts)]
#[instruction(args: SetAuthorityRoleArgs)]
pub struct SetAuthorityRole<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        seeds = [RegistrySeeds::CONFIG],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        seeds = [RegistrySeeds::LIFECYCLE],
        bump = lifecycle.bump
    )]
    pub lifecycle: Account<'info, Lifecycle>,

    #[account(
        init_if_needed,
        payer = admin,
        space = AuthorityRecord::LEN,
        seeds = [RegistrySeeds::AUTHORITY, args.authority.as_ref()],
        bump
    )]
    pub authority_record: Account<'info, AuthorityRecord>,

    pub system_program: Program<'info, System>,
}

/// Create or update an on-chain role record. Admin-only; role records gate
/// who may observe repositories they do not own.
pub fn handle(ctx: Context<SetAuthorityRole>, args: SetAuthorityRoleArgs) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    ctx.accounts.lifecycle.assert_writes_allowed()?;
    ctx.accounts.config.assert_active()?;
    ctx.accounts
        .config
        .assert_admin(&ctx.accounts.admin.key())?;

    let record = &mut ctx.accounts.authority_record;
    if record.is_uninitialized() {
        record.init(args.authority, args.role, ctx.bumps.authority_record, now);
    } else {
        record.set_role(args.role, now);
    }

    emit!(AuthorityRoleSet {
        authority: record.authority,
        role: record.role,
        updated_at: record.updated_at,
    });

    Ok(())
}
