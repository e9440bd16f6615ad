use anchor_lang::prelude::*;

use crate::errors::RegistryError;
use crate::events::ModuleRegistered;
use crate::pda::{assert_derivation, RegistrySeeds};
use crate::state::{Config, Lifecycle, Metrics, Module, ModuleVersion, Repo, SemanticVersion};

/// Fields for a version snapshot created alongside a register or update
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct VersionSnapshotArgs {
    pub metadata_uri: String,
    pub changelog_uri: String,
    pub label: String,
    pub is_stable: bool,
}

/// Arguments for the `register_module` instruction
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct RegisterModuleArgs {
    /// Identifying key used with the module seed to derive the PDA
    pub module_key: Pubkey,
    pub name: String,
    pub metadata_uri: String,
    pub category: String,
    pub tags: String,
    /// Initial semantic version of the module
    pub version: SemanticVersion,
    /// When present, an initial `ModuleVersion` snapshot is created; the
    /// `module_version` account must then be supplied as well
    pub initial_snapshot: Option<VersionSnapshotArgs>,
}

#[derive(Accounts)]
#[instruction(args: RegisterModuleArgs)]
pub struct RegisterModule<'info> {
    /// Pays for the module account and becomes its authority
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

    /// Repository the module was generated from
    #[account(
        seeds = [RegistrySeeds::REPO, repo.repo_key.as_ref()],
        bump = repo.bump
    )]
    pub repo: Account<'info, Repo>,

    #[account(
        init,
        payer = authority,
        space = Module::LEN,
        seeds = [RegistrySeeds::MODULE, args.module_key.as_ref()],
        bump
    )]
    pub module: Account<'info, Module>,

    /// Optional initial version snapshot, created only when
    /// `args.initial_snapshot` is present
    #[account(
        init,
        payer = authority,
        space = ModuleVersion::LEN,
        seeds = [
            RegistrySeeds::MODULE_VERSION,
            args.module_key.as_ref(),
            &args.version.seed_bytes(),
        ],
        bump
    )]
    pub module_version: Option<Account<'info, ModuleVersion>>,

    pub system_program: Program<'info, System>,
}

pub fn handle(ctx: Context<RegisterModule>, args: RegisterModuleArgs) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    ctx.accounts.lifecycle.assert_writes_allowed()?;
    ctx.accounts.config.assert_active()?;
    ctx.accounts.repo.assert_active()?;

    let authority = ctx.accounts.authority.key();
    let module = &mut ctx.accounts.module;
    module.init(
        args.module_key,
        ctx.accounts.repo.repo_key,
        authority,
        args.name,
        args.metadata_uri,
        args.category,
        args.tags,
        args.version,
        ctx.bumps.module,
        now,
    )?;

    let snapshot_key = match (&mut ctx.accounts.module_version, args.initial_snapshot) {
        (Some(snapshot), Some(fields)) => {
            let (expected, bump) =
                RegistrySeeds::module_version(&args.module_key, &args.version, ctx.program_id);
            assert_derivation(&expected, &snapshot.key())?;
            snapshot.init(
                args.module_key,
                args.version,
                fields.metadata_uri,
                fields.changelog_uri,
                fields.label,
                fields.is_stable,
                bump,
                now,
            )?;
            Some(snapshot.key())
        }
        (None, None) => None,
        // Snapshot account and snapshot fields must come together
        _ => return err!(RegistryError::InvalidPda),
    };

    ctx.accounts.metrics.record_module_created(now)?;

    emit!(ModuleRegistered {
        module: module.key(),
        module_key: module.module_key,
        repo: ctx.accounts.repo.key(),
        authority,
        name: module.name.clone(),
        version: module.version,
        snapshot: snapshot_key,
        created_at: module.created_at,
    });

    Ok(())
}
