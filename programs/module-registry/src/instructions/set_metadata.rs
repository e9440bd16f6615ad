use anchor_lang::prelude::*;

use crate::events::MetadataUpdated;
use crate::pda::RegistrySeeds;
use crate::state::{Config, GlobalMetadata, Lifecycle};

/// Arguments for the `set_metadata` instruction.
///
/// Every field is optional: `None` leaves the stored value unchanged.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct SetMetadataArgs {
    pub description: Option<String>,
    pub tags: Option<String>,
    pub website_url: Option<String>,
    pub docs_url: Option<String>,
    pub dashboard_url: Option<String>,
    pub icon_uri: Option<String>,
    pub extra_json: Option<String>,
}

#[derive(Accounts)]
pub struct SetMetadata<'info> {
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
        seeds = [RegistrySeeds::GLOBAL_METADATA],
        bump = global_metadata.bump
    )]
    pub global_metadata: Account<'info, GlobalMetadata>,
}

pub fn handle(ctx: Context<SetMetadata>, args: SetMetadataArgs) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    ctx.accounts.lifecycle.assert_writes_allowed()?;
    ctx.accounts.config.assert_active()?;
    ctx.accounts
        .config
        .assert_admin(&ctx.accounts.admin.key())?;

    ctx.accounts.global_metadata.apply_update(
        args.description,
        args.tags,
        args.website_url,
        args.docs_url,
        args.dashboard_url,
        args.icon_uri,
        args.extra_json,
        now,
    )?;

    emit!(MetadataUpdated {
        admin: ctx.accounts.config.admin,
        updated_at: ctx.accounts.global_metadata.updated_at,
    });

    Ok(())
}
