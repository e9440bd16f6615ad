use anchor_lang::prelude::*;

use crate::errors::RegistryError;
use crate::events::ModuleLinked;
use crate::pda::{assert_derivation, RegistrySeeds};
use crate::state::{Config, Lifecycle, Module, ModuleRepoLink, Repo};

/// Arguments for the `link_module_to_repo` instruction
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct LinkModuleToRepoArgs {
    /// Whether this link becomes the module's primary link
    pub is_primary: bool,
    pub notes: Option<String>,
}

#[derive(Accounts)]
pub struct LinkModuleToRepo<'info> {
    /// Must be the module authority or the repo authority
    #[account(mut)]
    pub signer: Signer<'info>,

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

    #[account(
        mut,
        seeds = [RegistrySeeds::REPO, repo.repo_key.as_ref()],
        bump = repo.bump
    )]
    pub repo: Account<'info, Repo>,

    #[account(
        init_if_needed,
        payer = signer,
        space = ModuleRepoLink::LEN,
        seeds = [
            RegistrySeeds::MODULE_REPO_LINK,
            module.module_key.as_ref(),
            repo.repo_key.as_ref(),
        ],
        bump
    )]
    pub link: Account<'info, ModuleRepoLink>,

    /// The module's current primary link; required when promoting this
    /// link while a different link holds primary, so the old primary can
    /// be demoted in the same transaction
    #[account(mut)]
    pub previous_primary_link: Option<Account<'info, ModuleRepoLink>>,

    pub system_program: Program<'info, System>,
}

pub fn handle(ctx: Context<LinkModuleToRepo>, args: LinkModuleToRepoArgs) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    ctx.accounts.lifecycle.assert_writes_allowed()?;
    ctx.accounts.config.assert_active()?;

    let signer = ctx.accounts.signer.key();
    let module = &mut ctx.accounts.module;
    let repo = &mut ctx.accounts.repo;

    // Either side of the association may manage the link
    require!(
        signer == module.authority || signer == repo.authority,
        RegistryError::InvalidAuthority
    );

    let link = &mut ctx.accounts.link;
    if link.is_uninitialized() {
        link.init(
            module.module_key,
            repo.repo_key,
            signer,
            ctx.bumps.link,
            now,
        );
        repo.record_module_linked(ctx.accounts.config.max_modules_per_repo, now)?;
    }
    link.apply_update(args.notes, now)?;

    if args.is_primary {
        // Demote the previous primary atomically so at most one link per
        // module ever carries the flag
        if module.primary_repo_key != Pubkey::default()
            && module.primary_repo_key != repo.repo_key
        {
            let previous = ctx
                .accounts
                .previous_primary_link
                .as_mut()
                .ok_or(RegistryError::InvalidPda)?;
            let (expected, _) = RegistrySeeds::module_repo_link(
                &module.module_key,
                &module.primary_repo_key,
                ctx.program_id,
            );
            assert_derivation(&expected, &previous.key())?;
            previous.demote(now);
        }
        module.primary_repo_key = repo.repo_key;
        module.updated_at = now;
        link.promote(now);
    } else if link.is_primary {
        // Explicitly stepping down from primary
        module.primary_repo_key = Pubkey::default();
        module.updated_at = now;
        link.demote(now);
    }

    emit!(ModuleLinked {
        link: link.key(),
        module: module.key(),
        repo: repo.key(),
        linked_by: link.linked_by,
        is_primary: link.is_primary,
        updated_at: link.updated_at,
    });

    Ok(())
}
