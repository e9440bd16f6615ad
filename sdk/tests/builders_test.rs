use modreg_sdk::instructions::*;
use modreg_sdk::{format_version, parse_version, RegistrySeeds, PROGRAM_ID};
use module_registry::{
    InitializeArgs, LinkModuleToRepoArgs, RecordObservationArgs, RegisterModuleArgs,
    RegisterRepoArgs, SemanticVersion, UpdateModuleArgs, VersionSnapshotArgs,
};
use solana_sdk::pubkey::Pubkey;

#[test]
fn initialize_instruction_targets_singleton_pdas() {
    let payer = Pubkey::new_unique();
    let ix = build_initialize_instruction(
        PROGRAM_ID,
        payer,
        InitializeArgs {
            fee_bps: 100,
            max_modules_per_repo: 64,
            policy_ref: [0u8; 32],
        },
    )
    .unwrap();

    assert_eq!(ix.program_id, PROGRAM_ID);
    assert_eq!(ix.accounts.len(), 6);
    assert_eq!(ix.accounts[0].pubkey, payer);
    assert!(ix.accounts[0].is_signer);
    assert_eq!(ix.accounts[1].pubkey, RegistrySeeds::config(&PROGRAM_ID).0);
    assert_eq!(ix.accounts[2].pubkey, RegistrySeeds::metrics(&PROGRAM_ID).0);
    assert_eq!(ix.accounts[3].pubkey, RegistrySeeds::lifecycle(&PROGRAM_ID).0);
    assert_eq!(
        ix.accounts[4].pubkey,
        RegistrySeeds::global_metadata(&PROGRAM_ID).0
    );
    assert_eq!(ix.data[..8], instruction_discriminator("initialize"));
}

#[test]
fn register_repo_derives_repo_pda_from_args() {
    let authority = Pubkey::new_unique();
    let repo_key = Pubkey::new_unique();
    let ix = build_register_repo_instruction(
        PROGRAM_ID,
        authority,
        RegisterRepoArgs {
            repo_key,
            name: "core".into(),
            url: "https://git.example.org/core".into(),
            tags: String::new(),
            allow_observation: false,
        },
    )
    .unwrap();

    let (expected_repo, _) = RegistrySeeds::repo(&repo_key, &PROGRAM_ID);
    assert_eq!(ix.accounts[4].pubkey, expected_repo);
    assert!(ix.accounts[4].is_writable);
    assert_eq!(ix.data[..8], instruction_discriminator("register_repo"));
}

#[test]
fn optional_snapshot_slot_uses_program_id_placeholder() {
    let authority = Pubkey::new_unique();
    let module_key = Pubkey::new_unique();
    let repo_key = Pubkey::new_unique();

    let base_args = RegisterModuleArgs {
        module_key,
        name: "parser".into(),
        metadata_uri: "ipfs://bafy/m.json".into(),
        category: String::new(),
        tags: String::new(),
        version: SemanticVersion::new(1, 0, 0),
        initial_snapshot: None,
    };

    // Without a snapshot the optional slot holds the program id
    let without =
        build_register_module_instruction(PROGRAM_ID, authority, repo_key, base_args.clone())
            .unwrap();
    assert_eq!(without.accounts[6].pubkey, PROGRAM_ID);
    assert!(!without.accounts[6].is_writable);

    // With a snapshot it holds the version PDA, writable for init
    let mut args = base_args;
    args.initial_snapshot = Some(VersionSnapshotArgs {
        metadata_uri: "ipfs://bafy/v1.json".into(),
        changelog_uri: String::new(),
        label: "initial".into(),
        is_stable: true,
    });
    let with =
        build_register_module_instruction(PROGRAM_ID, authority, repo_key, args).unwrap();
    let (expected, _) = RegistrySeeds::module_version(
        &module_key,
        &SemanticVersion::new(1, 0, 0),
        &PROGRAM_ID,
    );
    assert_eq!(with.accounts[6].pubkey, expected);
    assert!(with.accounts[6].is_writable);
}

#[test]
fn update_module_snapshot_follows_new_version() {
    let authority = Pubkey::new_unique();
    let module_key = Pubkey::new_unique();
    let ix = build_update_module_instruction(
        PROGRAM_ID,
        authority,
        module_key,
        UpdateModuleArgs {
            name: None,
            metadata_uri: None,
            category: None,
            tags: None,
            is_active: None,
            new_version: Some(SemanticVersion::new(2, 0, 0)),
            snapshot: Some(VersionSnapshotArgs {
                metadata_uri: "ipfs://bafy/v2.json".into(),
                changelog_uri: "ipfs://bafy/v2-changes.json".into(),
                label: String::new(),
                is_stable: false,
            }),
        },
    )
    .unwrap();

    let (expected, _) = RegistrySeeds::module_version(
        &module_key,
        &SemanticVersion::new(2, 0, 0),
        &PROGRAM_ID,
    );
    assert_eq!(ix.accounts[4].pubkey, expected);
}

#[test]
fn link_builder_wires_previous_primary_when_promoting() {
    let signer = Pubkey::new_unique();
    let module_key = Pubkey::new_unique();
    let repo_key = Pubkey::new_unique();
    let previous_repo = Pubkey::new_unique();

    let ix = build_link_module_to_repo_instruction(
        PROGRAM_ID,
        signer,
        module_key,
        repo_key,
        Some(previous_repo),
        LinkModuleToRepoArgs {
            is_primary: true,
            notes: None,
        },
    )
    .unwrap();

    let (expected_link, _) =
        RegistrySeeds::module_repo_link(&module_key, &repo_key, &PROGRAM_ID);
    let (expected_previous, _) =
        RegistrySeeds::module_repo_link(&module_key, &previous_repo, &PROGRAM_ID);
    assert_eq!(ix.accounts[5].pubkey, expected_link);
    assert_eq!(ix.accounts[6].pubkey, expected_previous);
    assert!(ix.accounts[6].is_writable);
}

#[test]
fn observation_builder_includes_observer_record_on_request() {
    let observer = Pubkey::new_unique();
    let repo_key = Pubkey::new_unique();
    let args = RecordObservationArgs {
        lines_of_code: 1_000,
        files_processed: 10,
        modules_touched: 1,
        revision: "9f2a1c7".into(),
        note: String::new(),
        observed_at: None,
        started_at: None,
        finished_at: None,
    };

    let own_repo =
        build_record_observation_instruction(PROGRAM_ID, observer, repo_key, false, args.clone())
            .unwrap();
    assert_eq!(own_repo.accounts[5].pubkey, PROGRAM_ID);

    let delegated =
        build_record_observation_instruction(PROGRAM_ID, observer, repo_key, true, args).unwrap();
    let (expected_record, _) = RegistrySeeds::authority_record(&observer, &PROGRAM_ID);
    assert_eq!(delegated.accounts[5].pubkey, expected_record);
}

#[test]
fn version_string_round_trip() {
    let version = parse_version("1.4.2").unwrap();
    assert_eq!(version, SemanticVersion::new(1, 4, 2));
    assert_eq!(format_version(&version), "1.4.2");

    assert!(parse_version("1.4").is_err());
    assert!(parse_version("1.4.2.9").is_err());
    assert!(parse_version("1.x.2").is_err());
}
