use anchor_lang::prelude::*;

use crate::events::LifecycleUpdated;
use crate::pda::RegistrySeeds;
use crate::state::{Config, Lifecycle};

/// Arguments for the `set_lifecycle` instruction.
///
/// Every field is optional: `None` leaves the stored value unchanged.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct SetLifecycleArgs {
    pub is_write_locked: Option<bool>,
    pub is_read_only: Option<bool>,
    pub note_ref: Option<[u8; 32]>,
}

#[derive(Accounts)]
pub struct SetLifecycle<'info> {
    pub admin: Signer<'info>,

    #[account(
        seeds = [RegistrySeeds::CONFIG],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [RegistrySeeds::LIFECYCLE],
        bump = lifecycle.bump
    )]
    pub lifecycle: Account<'info, Lifecycle>,
}

/// Admin-only lifecycle update. Like `set_config`, this is exempt from the
/// write lock; otherwise a locked deployment could never be unlocked.
pub fn handle(ctx: Context<SetLifecycle>, args: SetLifecycleArgs) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    ctx.accounts
        .config
        .assert_admin(&ctx.accounts.admin.key())?;

    let lifecycle = &mut ctx.accounts.lifecycle;
    lifecycle.apply_update(args.is_write_locked, args.is_read_only, args.note_ref, now);

    emit!(LifecycleUpdated {
        admin: ctx.accounts.config.admin,
        is_write_locked: lifecycle.is_write_locked,
        is_read_only: lifecycle.is_read_only,
        updated_at: lifecycle.updated_at,
    });

    Ok(())
}
