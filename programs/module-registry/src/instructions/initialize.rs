use anchor_lang::prelude::*;

use crate::events::RegistryInitialized;
use crate::pda::RegistrySeeds;
use crate::state::{Config, GlobalMetadata, Lifecycle, Metrics};

/// Arguments for the `initialize` instruction
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct InitializeArgs {
    /// Initial fee in basis points (0..=10_000)
    pub fee_bps: u16,
    /// Cap on modules linked per repository
    pub max_modules_per_repo: u32,
    /// Hash or reference to an off-chain policy document
    pub policy_ref: [u8; 32],
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Pays for the singleton accounts and becomes the admin
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        init,
        payer = payer,
        space = Config::LEN,
        seeds = [RegistrySeeds::CONFIG],
        bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        init,
        payer = payer,
        space = Metrics::LEN,
        seeds = [RegistrySeeds::METRICS],
        bump
    )]
    pub metrics: Account<'info, Metrics>,

    #[account(
        init,
        payer = payer,
        space = Lifecycle::LEN,
        seeds = [RegistrySeeds::LIFECYCLE],
        bump
    )]
    pub lifecycle: Account<'info, Lifecycle>,

    #[account(
        init,
        payer = payer,
        space = GlobalMetadata::LEN,
        seeds = [RegistrySeeds::GLOBAL_METADATA],
        bump
    )]
    pub global_metadata: Account<'info, GlobalMetadata>,

    pub system_program: Program<'info, System>,
}

/// Create the four deployment singletons. Anchor's `init` constraint makes
/// a second call fail outright, so initialization is one-shot.
pub fn handle(ctx: Context<Initialize>, args: InitializeArgs) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let admin = ctx.accounts.payer.key();

    ctx.accounts.config.init(
        admin,
        args.fee_bps,
        args.max_modules_per_repo,
        args.policy_ref,
        ctx.bumps.config,
        now,
    )?;
    ctx.accounts.metrics.init(ctx.bumps.metrics, now);
    ctx.accounts.lifecycle.init(ctx.bumps.lifecycle, now);
    ctx.accounts
        .global_metadata
        .init(ctx.bumps.global_metadata, now);

    msg!("Registry initialized, admin: {}", admin);

    emit!(RegistryInitialized {
        admin,
        fee_bps: args.fee_bps,
        max_modules_per_repo: args.max_modules_per_repo,
        created_at: now,
    });

    Ok(())
}
