use anchor_lang::prelude::*;

use crate::events::ForkUpdated;
use crate::pda::RegistrySeeds;
use crate::state::{Config, Fork, Lifecycle};

/// Arguments for the `update_fork_state` instruction.
///
/// Every field is optional: `None` leaves the stored value unchanged.
/// Lineage (`is_root`, `depth`, `parent_key`) is fixed at creation and has
/// no update path.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct UpdateForkStateArgs {
    pub label: Option<String>,
    pub metadata_uri: Option<String>,
    pub tags: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Accounts)]
pub struct UpdateForkState<'info> {
    pub owner: Signer<'info>,

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
        mut,
        seeds = [RegistrySeeds::FORK, fork.fork_key.as_ref()],
        bump = fork.bump
    )]
    pub fork: Account<'info, Fork>,
}

pub fn handle(ctx: Context<UpdateForkState>, args: UpdateForkStateArgs) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    ctx.accounts.lifecycle.assert_writes_allowed()?;
    ctx.accounts.config.assert_active()?;

    let fork = &mut ctx.accounts.fork;
    fork.assert_owner(&ctx.accounts.owner.key())?;
    fork.apply_update(args.label, args.metadata_uri, args.tags, args.is_active, now)?;

    emit!(ForkUpdated {
        fork: fork.key(),
        owner: fork.owner,
        is_active: fork.is_active,
        updated_at: fork.updated_at,
    });

    Ok(())
}
