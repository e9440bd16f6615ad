use anchor_lang::prelude::*;

use crate::errors::RegistryError;
use crate::events::ObservationRecorded;
use crate::pda::{assert_derivation, RegistrySeeds};
use crate::state::{AuthorityRecord, Config, Lifecycle, Metrics, Repo};
use crate::validation::{
    validate_not_future, validate_observation_payload, validate_str, validate_time_order,
    MAX_FILES_PER_OBSERVATION, MAX_LOC_PER_OBSERVATION, MAX_MODULES_PER_OBSERVATION,
    MAX_NOTE_LEN, MAX_REVISION_LEN,
};

/// Arguments for the `record_observation` instruction
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct RecordObservationArgs {
    /// Lines of code processed in this run
    pub lines_of_code: u64,
    /// Files processed in this run
    pub files_processed: u32,
    /// Modules detected or touched; may be zero for metadata-only runs
    pub modules_touched: u32,
    /// Commit or revision identifier, e.g. "9f2a1c7"
    pub revision: String,
    /// Short free-form description of the run
    pub note: String,
    /// When the observation was taken; defaults to the current clock
    pub observed_at: Option<i64>,
    /// Optional run window, both ends or neither
    pub started_at: Option<i64>,
    pub finished_at: Option<i64>,
}

#[derive(Accounts)]
pub struct RecordObservation<'info> {
    pub observer: Signer<'info>,

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
        mut,
        seeds = [RegistrySeeds::REPO, repo.repo_key.as_ref()],
        bump = repo.bump
    )]
    pub repo: Account<'info, Repo>,

    /// Role record for the observer; required when the observer is not
    /// the repo authority
    pub observer_record: Option<Account<'info, AuthorityRecord>>,
}

pub fn handle(ctx: Context<RecordObservation>, args: RecordObservationArgs) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    ctx.accounts.lifecycle.assert_writes_allowed()?;
    ctx.accounts.config.assert_active()?;

    let observer = ctx.accounts.observer.key();
    let repo = &mut ctx.accounts.repo;
    repo.assert_active()?;

    // The repo authority may always observe; anyone else needs the repo
    // to allow observation plus an Operator or Admin role record
    if observer != repo.authority {
        require!(repo.allow_observation, RegistryError::InvalidAuthority);
        let record = ctx
            .accounts
            .observer_record
            .as_ref()
            .ok_or(RegistryError::InvalidAuthority)?;
        let (expected, _) = RegistrySeeds::authority_record(&observer, ctx.program_id);
        assert_derivation(&expected, &record.key())?;
        require!(record.can_observe(), RegistryError::InvalidAuthority);
    }

    // Numeric bounds
    require!(args.lines_of_code > 0, RegistryError::ValueOutOfRange);
    require!(
        args.lines_of_code <= MAX_LOC_PER_OBSERVATION,
        RegistryError::ObservationDataTooLarge
    );
    require!(args.files_processed > 0, RegistryError::ValueOutOfRange);
    require!(
        args.files_processed <= MAX_FILES_PER_OBSERVATION,
        RegistryError::ObservationDataTooLarge
    );
    require!(
        args.modules_touched <= MAX_MODULES_PER_OBSERVATION,
        RegistryError::ObservationDataTooLarge
    );

    // Free-form payload
    validate_str(&args.revision, MAX_REVISION_LEN)?;
    validate_str(&args.note, MAX_NOTE_LEN)?;
    validate_observation_payload(&args.revision, &args.note)?;

    // Caller-supplied timestamps
    if let Some(ts) = args.observed_at {
        validate_not_future(now, ts)?;
    }
    match (args.started_at, args.finished_at) {
        (Some(start), Some(end)) => {
            validate_not_future(now, start)?;
            validate_not_future(now, end)?;
            validate_time_order(start, end)?;
        }
        (None, None) => {}
        // A half-open window is malformed
        _ => return err!(RegistryError::InvalidTimeRange),
    }

    let observed_at = args.observed_at.unwrap_or(now);
    repo.record_observation(
        args.lines_of_code,
        args.files_processed,
        observer,
        observed_at,
        now,
    )?;
    ctx.accounts
        .metrics
        .record_observation(args.lines_of_code, args.files_processed, now)?;

    emit!(ObservationRecorded {
        repo: repo.key(),
        observer,
        lines_of_code: args.lines_of_code,
        files_processed: args.files_processed,
        modules_touched: args.modules_touched,
        revision: args.revision,
        observed_at,
    });

    Ok(())
}
