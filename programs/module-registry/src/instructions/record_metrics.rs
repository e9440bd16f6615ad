use anchor_lang::prelude::*;

use crate::events::MetricsReconciled;
use crate::pda::RegistrySeeds;
use crate::state::{Config, Lifecycle, Metrics};

/// Arguments for the `record_metrics` instruction.
///
/// Each present field overwrites the stored counter outright; `None` keeps
/// the stored value. This is a plain last-writer-wins reconciliation path
/// for off-chain analytics; callers wanting max-preserving semantics must
/// compare before calling.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct RecordMetricsArgs {
    pub total_repos: Option<u64>,
    pub total_modules: Option<u64>,
    pub total_forks: Option<u64>,
    pub total_observations: Option<u64>,
    pub total_lines_of_code: Option<u64>,
    pub total_files_processed: Option<u64>,
}

#[derive(Accounts)]
pub struct RecordMetrics<'info> {
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
        mut,
        seeds = [RegistrySeeds::METRICS],
        bump = metrics.bump
    )]
    pub metrics: Account<'info, Metrics>,
}

pub fn handle(ctx: Context<RecordMetrics>, args: RecordMetricsArgs) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    ctx.accounts.lifecycle.assert_writes_allowed()?;
    ctx.accounts
        .config
        .assert_admin(&ctx.accounts.admin.key())?;
    ctx.accounts.config.assert_active()?;

    let metrics = &mut ctx.accounts.metrics;
    metrics.apply_override(
        args.total_repos,
        args.total_modules,
        args.total_forks,
        args.total_observations,
        args.total_lines_of_code,
        args.total_files_processed,
        now,
    )?;

    emit!(MetricsReconciled {
        admin: ctx.accounts.config.admin,
        total_repos: metrics.total_repos,
        total_modules: metrics.total_modules,
        total_forks: metrics.total_forks,
        total_observations: metrics.total_observations,
        total_lines_of_code: metrics.total_lines_of_code,
        total_files_processed: metrics.total_files_processed,
        updated_at: metrics.updated_at,
    });

    Ok(())
}
