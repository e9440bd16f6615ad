use anchor_lang::prelude::*;

use crate::errors::RegistryError;
use crate::events::ModuleUpdated;
use crate::instructions::register_module::VersionSnapshotArgs;
use crate::pda::{assert_derivation, RegistrySeeds};
use crate::state::{Config, Lifecycle, Module, ModuleVersion, SemanticVersion};

/// Arguments for the `update_module` instruction.
///
/// Metadata fields follow the partial-update convention. A version bump is
/// requested by setting `new_version`; it must be strictly greater than the
/// module's current version and is always snapshotted, so `snapshot` and
/// the `module_version` account must be supplied with it.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct UpdateModuleArgs {
    pub name: Option<String>,
    pub metadata_uri: Option<String>,
    pub category: Option<String>,
    pub tags: Option<String>,
    pub is_active: Option<bool>,
    pub new_version: Option<SemanticVersion>,
    pub snapshot: Option<VersionSnapshotArgs>,
}

impl UpdateModuleArgs {
    /// The requested version bump, if any. `new_version` and `snapshot`
    /// must be supplied together; a half-specified bump is malformed.
    pub fn version_bump(&self) -> Result<Option<(SemanticVersion, &VersionSnapshotArgs)>> {
        match (self.new_version, &self.snapshot) {
            (Some(version), Some(fields)) => Ok(Some((version, fields))),
            (None, None) => Ok(None),
            _ => err!(RegistryError::InvalidPda),
        }
    }
}

#[derive(Accounts)]
#[instruction(args: UpdateModuleArgs)]
pub struct UpdateModule<'info> {
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
        seeds = [RegistrySeeds::MODULE, module.module_key.as_ref()],
        bump = module.bump
    )]
    pub module: Account<'info, Module>,

    /// Snapshot account for the new version, required iff
    /// `args.new_version` is present
    #[account(
        init,
        payer = authority,
        space = ModuleVersion::LEN,
        seeds = [
            RegistrySeeds::MODULE_VERSION,
            module.module_key.as_ref(),
            &args.new_version.unwrap_or_default().seed_bytes(),
        ],
        bump
    )]
    pub module_version: Option<Account<'info, ModuleVersion>>,

    pub system_program: Program<'info, System>,
}

pub fn handle(ctx: Context<UpdateModule>, args: UpdateModuleArgs) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    ctx.accounts.lifecycle.assert_writes_allowed()?;
    ctx.accounts.config.assert_active()?;

    let module = &mut ctx.accounts.module;
    module.assert_authority(&ctx.accounts.authority.key())?;

    let version_bump = args
        .version_bump()?
        .map(|(version, fields)| (version, fields.clone()));

    module.apply_update(
        args.name,
        args.metadata_uri,
        args.category,
        args.tags,
        args.is_active,
        now,
    )?;

    let snapshot_key = match (&mut ctx.accounts.module_version, version_bump) {
        (Some(snapshot), Some((new_version, fields))) => {
            module.bump_version(new_version, now)?;

            let (expected, bump) = RegistrySeeds::module_version(
                &module.module_key,
                &new_version,
                ctx.program_id,
            );
            assert_derivation(&expected, &snapshot.key())?;
            snapshot.init(
                module.module_key,
                new_version,
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
        // A version bump without its snapshot account (or the reverse)
        // is a malformed call
        _ => return err!(RegistryError::InvalidPda),
    };

    emit!(ModuleUpdated {
        module: module.key(),
        authority: module.authority,
        version: module.version,
        snapshot: snapshot_key,
        is_active: module.is_active,
        updated_at: module.updated_at,
    });

    Ok(())
}
