use anchor_lang::prelude::*;

use crate::events::RepoUpdated;
use crate::pda::RegistrySeeds;
use crate::state::{Config, Lifecycle, Repo};

/// Arguments for the `update_repo` instruction.
///
/// Every field is optional: `None` leaves the stored value unchanged.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct UpdateRepoArgs {
    pub name: Option<String>,
    pub url: Option<String>,
    pub tags: Option<String>,
    pub is_active: Option<bool>,
    pub allow_observation: Option<bool>,
}

#[derive(Accounts)]
pub struct UpdateRepo<'info> {
    pub authority: Signer<'info>,

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
        seeds = [RegistrySeeds::REPO, repo.repo_key.as_ref()],
        bump = repo.bump
    )]
    pub repo: Account<'info, Repo>,
}

pub fn handle(ctx: Context<UpdateRepo>, args: UpdateRepoArgs) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    ctx.accounts.lifecycle.assert_writes_allowed()?;
    ctx.accounts.config.assert_active()?;

    let repo = &mut ctx.accounts.repo;
    repo.assert_authority(&ctx.accounts.authority.key())?;
    repo.apply_update(
        args.name,
        args.url,
        args.tags,
        args.is_active,
        args.allow_observation,
        now,
    )?;

    emit!(RepoUpdated {
        repo: repo.key(),
        authority: repo.authority,
        is_active: repo.is_active,
        allow_observation: repo.allow_observation,
        updated_at: repo.updated_at,
    });

    Ok(())
}
