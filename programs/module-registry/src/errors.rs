use anchor_lang::prelude::*;

/// Error types for the module registry program
///
/// Every failed instruction surfaces exactly one of these codes and leaves
/// all touched accounts unchanged. Codes are stable; off-chain tooling keys
/// on them to distinguish authorization failures from input-shape failures.
#[error_code]
pub enum RegistryError {
    // --- Authorization Errors

    #[msg("Signer does not match the configured admin")]
    InvalidAdmin,

    #[msg("Signer does not match the record authority")]
    InvalidAuthority,

    #[msg("Only the fork owner can perform this action")]
    InvalidForkOwner,

    // --- Account Addressing Errors

    #[msg("Account address does not match its derived PDA")]
    InvalidPda,

    // --- Input Validation Errors

    #[msg("Fee basis points out of allowed range")]
    InvalidFeeBps,

    #[msg("Numeric value out of allowed range")]
    ValueOutOfRange,

    #[msg("Required string is empty")]
    StringEmpty,

    #[msg("String exceeds maximum allowed length")]
    StringTooLong,

    #[msg("Observation payload exceeds configured limits")]
    ObservationDataTooLarge,

    #[msg("Metadata format is invalid")]
    MetadataInvalid,

    // --- Lifecycle Errors

    #[msg("Deployment is write-locked or inactive")]
    DeploymentInactive,

    // --- Time Validation Errors

    #[msg("Timestamp is ahead of the current clock")]
    TimestampInFuture,

    #[msg("Time range start is after its end")]
    InvalidTimeRange,

    // --- Internal Errors

    #[msg("Internal error: unexpected state")]
    InternalError,
}
