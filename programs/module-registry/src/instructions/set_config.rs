use anchor_lang::prelude::*;

use crate::events::ConfigUpdated;
use crate::pda::RegistrySeeds;
use crate::state::Config;

/// Arguments for the `set_config` instruction.
///
/// Every field is optional: `None` leaves the stored value unchanged,
/// `Some(v)` replaces it after validation.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct SetConfigArgs {
    pub admin: Option<Pubkey>,
    pub fee_bps: Option<u16>,
    pub max_modules_per_repo: Option<u32>,
    pub is_active: Option<bool>,
    pub policy_ref: Option<[u8; 32]>,
}

#[derive(Accounts)]
pub struct SetConfig<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [RegistrySeeds::CONFIG],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,
}

/// Admin-only configuration update.
///
/// Deliberately not gated on the lifecycle write lock: the admin must stay
/// able to reconfigure (and re-activate) a locked deployment.
pub fn handle(ctx: Context<SetConfig>, args: SetConfigArgs) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let config = &mut ctx.accounts.config;

    config.assert_admin(&ctx.accounts.admin.key())?;
    config.apply_update(
        args.admin,
        args.fee_bps,
        args.max_modules_per_repo,
        args.is_active,
        args.policy_ref,
        now,
    )?;

    emit!(ConfigUpdated {
        admin: config.admin,
        fee_bps: config.fee_bps,
        max_modules_per_repo: config.max_modules_per_repo,
        is_active: config.is_active,
        updated_at: config.updated_at,
    });

    Ok(())
}
