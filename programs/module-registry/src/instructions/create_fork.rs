use anchor_lang::prelude::*;

use crate::errors::RegistryError;
use crate::events::ForkCreated;
use crate::pda::{assert_derivation, RegistrySeeds};
use crate::state::{Config, Fork, Lifecycle, Metrics};

/// Arguments for the `create_fork` instruction
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct CreateForkArgs {
    /// Identifying key used with the fork seed to derive the PDA
    pub fork_key: Pubkey,
    pub label: String,
    pub metadata_uri: String,
    pub tags: String,
    /// Root forks have no parent; fixed forever at creation
    pub is_root: bool,
    /// Fork key of the parent; required when `is_root` is false
    pub parent_key: Option<Pubkey>,
    /// Explicit depth, honored for root forks only; non-root depth is
    /// always derived from the parent
    pub depth: Option<u16>,
}

#[derive(Accounts)]
#[instruction(args: CreateForkArgs)]
pub struct CreateFork<'info> {
    /// Pays for the fork account and becomes its owner
    #[account(mut)]
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
        seeds = [RegistrySeeds::METRICS],
        bump = metrics.bump
    )]
    pub metrics: Account<'info, Metrics>,

    #[account(
        init,
        payer = owner,
        space = Fork::LEN,
        seeds = [RegistrySeeds::FORK, args.fork_key.as_ref()],
        bump
    )]
    pub fork: Account<'info, Fork>,

    /// Parent fork; required when `args.is_root` is false
    pub parent_fork: Option<Account<'info, Fork>>,

    pub system_program: Program<'info, System>,
}

pub fn handle(ctx: Context<CreateFork>, args: CreateForkArgs) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    ctx.accounts.lifecycle.assert_writes_allowed()?;
    ctx.accounts.config.assert_active()?;

    let (parent_key, depth) = if args.is_root {
        (Pubkey::default(), args.depth.unwrap_or(0))
    } else {
        let parent_key = args.parent_key.ok_or(RegistryError::InvalidPda)?;
        let parent = ctx
            .accounts
            .parent_fork
            .as_ref()
            .ok_or(RegistryError::InvalidPda)?;
        let (expected, _) = RegistrySeeds::fork(&parent_key, ctx.program_id);
        assert_derivation(&expected, &parent.key())?;

        let depth = parent
            .depth
            .checked_add(1)
            .ok_or(RegistryError::InternalError)?;
        (parent_key, depth)
    };

    let fork = &mut ctx.accounts.fork;
    fork.init(
        args.fork_key,
        parent_key,
        ctx.accounts.owner.key(),
        args.label,
        args.metadata_uri,
        args.tags,
        args.is_root,
        depth,
        ctx.bumps.fork,
        now,
    )?;

    ctx.accounts.metrics.record_fork_created(now)?;

    emit!(ForkCreated {
        fork: fork.key(),
        fork_key: fork.fork_key,
        owner: fork.owner,
        parent_key: fork.parent_key,
        is_root: fork.is_root,
        depth: fork.depth,
        created_at: fork.created_at,
    });

    Ok(())
}
