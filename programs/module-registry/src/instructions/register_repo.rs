use anchor_lang::prelude::*;

use crate::events::RepoRegistered;
use crate::pda::RegistrySeeds;
use crate::state::{Config, Lifecycle, Metrics, Repo};

/// Arguments for the `register_repo` instruction
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct RegisterRepoArgs {
    /// Identifying key used with the repo seed to derive the PDA
    pub repo_key: Pubkey,
    pub name: String,
    pub url: String,
    pub tags: String,
    /// Whether non-authority observers may record observations
    pub allow_observation: bool,
}

#[derive(Accounts)]
#[instruction(args: RegisterRepoArgs)]
pub struct RegisterRepo<'info> {
    /// Pays for the repo account and becomes its authority
    #[account(mut)]
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
        seeds = [RegistrySeeds::METRICS],
        bump = metrics.bump
    )]
    pub metrics: Account<'info, Metrics>,

    #[account(
        init,
        payer = authority,
        space = Repo::LEN,
        seeds = [RegistrySeeds::REPO, args.repo_key.as_ref()],
        bump
    )]
    pub repo: Account<'info, Repo>,

    pub system_program: Program<'info, System>,
}

pub fn handle(ctx: Context<RegisterRepo>, args: RegisterRepoArgs) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    ctx.accounts.lifecycle.assert_writes_allowed()?;
    ctx.accounts.config.assert_active()?;

    let repo = &mut ctx.accounts.repo;
    repo.init(
        args.repo_key,
        ctx.accounts.authority.key(),
        args.name,
        args.url,
        args.tags,
        args.allow_observation,
        ctx.bumps.repo,
        now,
    )?;

    ctx.accounts.metrics.record_repo_created(now)?;

    emit!(RepoRegistered {
        repo: repo.key(),
        repo_key: repo.repo_key,
        authority: repo.authority,
        name: repo.name.clone(),
        url: repo.url.clone(),
        created_at: repo.created_at,
    });

    Ok(())
}
