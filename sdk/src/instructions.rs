//! Instruction builders for the module registry program
//!
//! Account ordering here must match the program's account structs
//! exactly. Optional accounts follow the Anchor convention: a `None`
//! slot is filled with the program id as a readonly placeholder.

use anchor_lang::AnchorSerialize;
use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program,
};

use module_registry::{
    CreateForkArgs, InitializeArgs, LinkModuleToRepoArgs, RecordMetricsArgs,
    RecordObservationArgs, RegisterModuleArgs, RegisterRepoArgs, RegistrySeeds,
    SetAuthorityRoleArgs, SetConfigArgs, SetLifecycleArgs, SetMetadataArgs, UpdateForkStateArgs,
    UpdateModuleArgs, UpdateRepoArgs,
};

/// Anchor global instruction discriminator: first 8 bytes of
/// sha256("global:<name>")
pub fn instruction_discriminator(name: &str) -> [u8; 8] {
    let digest = Sha256::digest(format!("global:{name}").as_bytes());
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&digest[..8]);
    discriminator
}

fn instruction_data<T: AnchorSerialize>(name: &str, args: &T) -> Result<Vec<u8>> {
    let mut data = instruction_discriminator(name).to_vec();
    args.serialize(&mut data)
        .with_context(|| format!("failed to serialize {name} args"))?;
    Ok(data)
}

fn optional_meta(account: Option<Pubkey>, writable: bool, program_id: &Pubkey) -> AccountMeta {
    match account {
        Some(key) if writable => AccountMeta::new(key, false),
        Some(key) => AccountMeta::new_readonly(key, false),
        None => AccountMeta::new_readonly(*program_id, false),
    }
}

/// Initialize the four singletons; the payer becomes the admin
pub fn build_initialize_instruction(
    program_id: Pubkey,
    payer: Pubkey,
    args: InitializeArgs,
) -> Result<Instruction> {
    let (config, _) = RegistrySeeds::config(&program_id);
    let (metrics, _) = RegistrySeeds::metrics(&program_id);
    let (lifecycle, _) = RegistrySeeds::lifecycle(&program_id);
    let (global_metadata, _) = RegistrySeeds::global_metadata(&program_id);

    Ok(Instruction {
        program_id,
        accounts: vec![
            AccountMeta::new(payer, true),
            AccountMeta::new(config, false),
            AccountMeta::new(metrics, false),
            AccountMeta::new(lifecycle, false),
            AccountMeta::new(global_metadata, false),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data: instruction_data("initialize", &args)?,
    })
}

pub fn build_set_config_instruction(
    program_id: Pubkey,
    admin: Pubkey,
    args: SetConfigArgs,
) -> Result<Instruction> {
    let (config, _) = RegistrySeeds::config(&program_id);

    Ok(Instruction {
        program_id,
        accounts: vec![
            AccountMeta::new_readonly(admin, true),
            AccountMeta::new(config, false),
        ],
        data: instruction_data("set_config", &args)?,
    })
}

pub fn build_set_lifecycle_instruction(
    program_id: Pubkey,
    admin: Pubkey,
    args: SetLifecycleArgs,
) -> Result<Instruction> {
    let (config, _) = RegistrySeeds::config(&program_id);
    let (lifecycle, _) = RegistrySeeds::lifecycle(&program_id);

    Ok(Instruction {
        program_id,
        accounts: vec![
            AccountMeta::new_readonly(admin, true),
            AccountMeta::new_readonly(config, false),
            AccountMeta::new(lifecycle, false),
        ],
        data: instruction_data("set_lifecycle", &args)?,
    })
}

pub fn build_set_authority_role_instruction(
    program_id: Pubkey,
    admin: Pubkey,
    args: SetAuthorityRoleArgs,
) -> Result<Instruction> {
    let (config, _) = RegistrySeeds::config(&program_id);
    let (lifecycle, _) = RegistrySeeds::lifecycle(&program_id);
    let (authority_record, _) = RegistrySeeds::authority_record(&args.authority, &program_id);

    Ok(Instruction {
        program_id,
        accounts: vec![
            AccountMeta::new(admin, true),
            AccountMeta::new_readonly(config, false),
            AccountMeta::new_readonly(lifecycle, false),
            AccountMeta::new(authority_record, false),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data: instruction_data("set_authority_role", &args)?,
    })
}

pub fn build_register_repo_instruction(
    program_id: Pubkey,
    authority: Pubkey,
    args: RegisterRepoArgs,
) -> Result<Instruction> {
    let (config, _) = RegistrySeeds::config(&program_id);
    let (lifecycle, _) = RegistrySeeds::lifecycle(&program_id);
    let (metrics, _) = RegistrySeeds::metrics(&program_id);
    let (repo, _) = RegistrySeeds::repo(&args.repo_key, &program_id);

    Ok(Instruction {
        program_id,
        accounts: vec![
            AccountMeta::new(authority, true),
            AccountMeta::new_readonly(config, false),
            AccountMeta::new_readonly(lifecycle, false),
            AccountMeta::new(metrics, false),
            AccountMeta::new(repo, false),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data: instruction_data("register_repo", &args)?,
    })
}

pub fn build_update_repo_instruction(
    program_id: Pubkey,
    authority: Pubkey,
    repo_key: Pubkey,
    args: UpdateRepoArgs,
) -> Result<Instruction> {
    let (config, _) = RegistrySeeds::config(&program_id);
    let (lifecycle, _) = RegistrySeeds::lifecycle(&program_id);
    let (repo, _) = RegistrySeeds::repo(&repo_key, &program_id);

    Ok(Instruction {
        program_id,
        accounts: vec![
            AccountMeta::new_readonly(authority, true),
            AccountMeta::new_readonly(config, false),
            AccountMeta::new_readonly(lifecycle, false),
            AccountMeta::new(repo, false),
        ],
        data: instruction_data("update_repo", &args)?,
    })
}

/// Register a module under an existing repo. When `args.initial_snapshot`
/// is set the builder also wires up the version snapshot PDA.
pub fn build_register_module_instruction(
    program_id: Pubkey,
    authority: Pubkey,
    repo_key: Pubkey,
    args: RegisterModuleArgs,
) -> Result<Instruction> {
    let (config, _) = RegistrySeeds::config(&program_id);
    let (lifecycle, _) = RegistrySeeds::lifecycle(&program_id);
    let (metrics, _) = RegistrySeeds::metrics(&program_id);
    let (repo, _) = RegistrySeeds::repo(&repo_key, &program_id);
    let (module, _) = RegistrySeeds::module(&args.module_key, &program_id);
    let module_version = args.initial_snapshot.as_ref().map(|_| {
        RegistrySeeds::module_version(&args.module_key, &args.version, &program_id).0
    });

    Ok(Instruction {
        program_id,
        accounts: vec![
            AccountMeta::new(authority, true),
            AccountMeta::new_readonly(config, false),
            AccountMeta::new_readonly(lifecycle, false),
            AccountMeta::new(metrics, false),
            AccountMeta::new_readonly(repo, false),
            AccountMeta::new(module, false),
            optional_meta(module_version, true, &program_id),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data: instruction_data("register_module", &args)?,
    })
}

pub fn build_update_module_instruction(
    program_id: Pubkey,
    authority: Pubkey,
    module_key: Pubkey,
    args: UpdateModuleArgs,
) -> Result<Instruction> {
    let (config, _) = RegistrySeeds::config(&program_id);
    let (lifecycle, _) = RegistrySeeds::lifecycle(&program_id);
    let (module, _) = RegistrySeeds::module(&module_key, &program_id);
    let module_version = args
        .new_version
        .as_ref()
        .map(|version| RegistrySeeds::module_version(&module_key, version, &program_id).0);

    Ok(Instruction {
        program_id,
        accounts: vec![
            AccountMeta::new(authority, true),
            AccountMeta::new_readonly(config, false),
            AccountMeta::new_readonly(lifecycle, false),
            AccountMeta::new(module, false),
            optional_meta(module_version, true, &program_id),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data: instruction_data("update_module", &args)?,
    })
}

/// Link a module to a repo. `previous_primary_repo_key` must name the
/// repo currently holding the primary link when promoting a new one.
pub fn build_link_module_to_repo_instruction(
    program_id: Pubkey,
    signer: Pubkey,
    module_key: Pubkey,
    repo_key: Pubkey,
    previous_primary_repo_key: Option<Pubkey>,
    args: LinkModuleToRepoArgs,
) -> Result<Instruction> {
    let (config, _) = RegistrySeeds::config(&program_id);
    let (lifecycle, _) = RegistrySeeds::lifecycle(&program_id);
    let (module, _) = RegistrySeeds::module(&module_key, &program_id);
    let (repo, _) = RegistrySeeds::repo(&repo_key, &program_id);
    let (link, _) = RegistrySeeds::module_repo_link(&module_key, &repo_key, &program_id);
    let previous_primary_link = previous_primary_repo_key.map(|previous| {
        RegistrySeeds::module_repo_link(&module_key, &previous, &program_id).0
    });

    Ok(Instruction {
        program_id,
        accounts: vec![
            AccountMeta::new(signer, true),
            AccountMeta::new_readonly(config, false),
            AccountMeta::new_readonly(lifecycle, false),
            AccountMeta::new(module, false),
            AccountMeta::new(repo, false),
            AccountMeta::new(link, false),
            optional_meta(previous_primary_link, true, &program_id),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data: instruction_data("link_module_to_repo", &args)?,
    })
}

pub fn build_create_fork_instruction(
    program_id: Pubkey,
    owner: Pubkey,
    args: CreateForkArgs,
) -> Result<Instruction> {
    let (config, _) = RegistrySeeds::config(&program_id);
    let (lifecycle, _) = RegistrySeeds::lifecycle(&program_id);
    let (metrics, _) = RegistrySeeds::metrics(&program_id);
    let (fork, _) = RegistrySeeds::fork(&args.fork_key, &program_id);
    let parent_fork = args
        .parent_key
        .as_ref()
        .map(|parent_key| RegistrySeeds::fork(parent_key, &program_id).0);

    Ok(Instruction {
        program_id,
        accounts: vec![
            AccountMeta::new(owner, true),
            AccountMeta::new_readonly(config, false),
            AccountMeta::new_readonly(lifecycle, false),
            AccountMeta::new(metrics, false),
            AccountMeta::new(fork, false),
            optional_meta(parent_fork, false, &program_id),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data: instruction_data("create_fork", &args)?,
    })
}

pub fn build_update_fork_state_instruction(
    program_id: Pubkey,
    owner: Pubkey,
    fork_key: Pubkey,
    args: UpdateForkStateArgs,
) -> Result<Instruction> {
    let (config, _) = RegistrySeeds::config(&program_id);
    let (lifecycle, _) = RegistrySeeds::lifecycle(&program_id);
    let (fork, _) = RegistrySeeds::fork(&fork_key, &program_id);

    Ok(Instruction {
        program_id,
        accounts: vec![
            AccountMeta::new_readonly(owner, true),
            AccountMeta::new_readonly(config, false),
            AccountMeta::new_readonly(lifecycle, false),
            AccountMeta::new(fork, false),
        ],
        data: instruction_data("update_fork_state", &args)?,
    })
}

/// Record an observation against a repo. `with_observer_record` includes
/// the observer's authority record, required when the signer is not the
/// repo authority.
pub fn build_record_observation_instruction(
    program_id: Pubkey,
    observer: Pubkey,
    repo_key: Pubkey,
    with_observer_record: bool,
    args: RecordObservationArgs,
) -> Result<Instruction> {
    let (config, _) = RegistrySeeds::config(&program_id);
    let (lifecycle, _) = RegistrySeeds::lifecycle(&program_id);
    let (metrics, _) = RegistrySeeds::metrics(&program_id);
    let (repo, _) = RegistrySeeds::repo(&repo_key, &program_id);
    let observer_record = with_observer_record
        .then(|| RegistrySeeds::authority_record(&observer, &program_id).0);

    Ok(Instruction {
        program_id,
        accounts: vec![
            AccountMeta::new_readonly(observer, true),
            AccountMeta::new_readonly(config, false),
            AccountMeta::new_readonly(lifecycle, false),
            AccountMeta::new(metrics, false),
            AccountMeta::new(repo, false),
            optional_meta(observer_record, false, &program_id),
        ],
        data: instruction_data("record_observation", &args)?,
    })
}

pub fn build_record_metrics_instruction(
    program_id: Pubkey,
    admin: Pubkey,
    args: RecordMetricsArgs,
) -> Result<Instruction> {
    let (config, _) = RegistrySeeds::config(&program_id);
    let (lifecycle, _) = RegistrySeeds::lifecycle(&program_id);
    let (metrics, _) = RegistrySeeds::metrics(&program_id);

    Ok(Instruction {
        program_id,
        accounts: vec![
            AccountMeta::new_readonly(admin, true),
            AccountMeta::new_readonly(config, false),
            AccountMeta::new_readonly(lifecycle, false),
            AccountMeta::new(metrics, false),
        ],
        data: instruction_data("record_metrics", &args)?,
    })
}

pub fn build_set_metadata_instruction(
    program_id: Pubkey,
    admin: Pubkey,
    args: SetMetadataArgs,
) -> Result<Instruction> {
    let (config, _) = RegistrySeeds::config(&program_id);
    let (lifecycle, _) = RegistrySeeds::lifecycle(&program_id);
    let (global_metadata, _) = RegistrySeeds::global_metadata(&program_id);

    Ok(Instruction {
        program_id,
        accounts: vec![
            AccountMeta::new_readonly(admin, true),
            AccountMeta::new_readonly(config, false),
            AccountMeta::new_readonly(lifecycle, false),
            AccountMeta::new(global_metadata, false),
        ],
        data: instruction_data("set_metadata", &args)?,
    })
}
