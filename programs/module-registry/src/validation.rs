// Input validation layer for registry instruction processing
//
// Every instruction accepts client-provided strings, counters and timestamps.
// All of it flows through these validators before any account is mutated, so
// a rejected instruction leaves state byte-for-byte unchanged. Validation is
// limited to simple bounds and shape checks to keep compute costs low.
use anchor_lang::prelude::*;

use crate::errors::RegistryError;

// --- String length caps (bytes)

/// Maximum length for human-readable names, labels and categories
pub const MAX_NAME_LEN: usize = 64;

/// Maximum length for repository URLs and metadata/changelog URIs
pub const MAX_URI_LEN: usize = 256;

/// Maximum length for comma-separated tag strings
pub const MAX_TAGS_LEN: usize = 128;

/// Maximum length for free-form descriptions and extra JSON payloads
pub const MAX_DESCRIPTION_LEN: usize = 512;

/// Maximum length for observation notes and link notes
pub const MAX_NOTE_LEN: usize = 256;

/// Maximum length for an observation revision identifier
pub const MAX_REVISION_LEN: usize = 64;

/// Combined byte budget for the free-form part of one observation
/// (revision plus note)
pub const MAX_OBSERVATION_PAYLOAD: usize = 320;

// --- Observation numeric bounds

/// Upper bound on lines of code reported by a single observation
pub const MAX_LOC_PER_OBSERVATION: u64 = 10_000_000;

/// Upper bound on files processed by a single observation
pub const MAX_FILES_PER_OBSERVATION: u32 = 100_000;

/// Upper bound on modules touched by a single observation
pub const MAX_MODULES_PER_OBSERVATION: u32 = 10_000;

// --- Fee bounds

/// Basis point denominator (100%); also the inclusive fee_bps maximum
pub const MAX_FEE_BPS: u16 = 10_000;

/// Require a string to be non-empty and within `max_len` bytes
pub fn validate_required_str(value: &str, max_len: usize) -> Result<()> {
    require!(!value.is_empty(), RegistryError::StringEmpty);
    validate_str(value, max_len)
}

/// Require a (possibly empty) string to be within `max_len` bytes
pub fn validate_str(value: &str, max_len: usize) -> Result<()> {
    require!(value.len() <= max_len, RegistryError::StringTooLong);
    Ok(())
}

/// Require a fee value to be at most `MAX_FEE_BPS`
pub fn validate_fee_bps(fee_bps: u16) -> Result<()> {
    require!(fee_bps <= MAX_FEE_BPS, RegistryError::InvalidFeeBps);
    Ok(())
}

/// Require a caller-supplied timestamp to not be ahead of the current clock
pub fn validate_not_future(now: i64, ts: i64) -> Result<()> {
    require!(ts <= now, RegistryError::TimestampInFuture);
    Ok(())
}

/// Require a (start, end) time range to be ordered
pub fn validate_time_order(start: i64, end: i64) -> Result<()> {
    require!(start <= end, RegistryError::InvalidTimeRange);
    Ok(())
}

/// Validate the free-form payload of an observation against the combined
/// byte budget. Individual field caps are checked separately.
pub fn validate_observation_payload(revision: &str, note: &str) -> Result<()> {
    require!(
        revision.len() + note.len() <= MAX_OBSERVATION_PAYLOAD,
        RegistryError::ObservationDataTooLarge
    );
    Ok(())
}

/// Basic shape check for extra JSON metadata.
///
/// Not a parser: the payload must be empty or a braces-delimited object with
/// balanced quotes. Full validation belongs to off-chain consumers.
pub fn validate_json_shape(value: &str) -> Result<()> {
    if value.is_empty() {
        return Ok(());
    }
    let bytes = value.as_bytes();
    let shaped = bytes.first() == Some(&b'{') && bytes.last() == Some(&b'}');
    require!(shaped, RegistryError::MetadataInvalid);

    let quotes = bytes.iter().filter(|b| **b == b'"').count();
    require!(quotes % 2 == 0, RegistryError::MetadataInvalid);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_strings() {
        assert!(validate_required_str("core", MAX_NAME_LEN).is_ok());
        assert!(validate_required_str("", MAX_NAME_LEN).is_err());
        assert!(validate_required_str(&"x".repeat(65), MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_optional_strings_may_be_empty() {
        assert!(validate_str("", MAX_TAGS_LEN).is_ok());
        assert!(validate_str(&"t".repeat(MAX_TAGS_LEN), MAX_TAGS_LEN).is_ok());
        assert!(validate_str(&"t".repeat(MAX_TAGS_LEN + 1), MAX_TAGS_LEN).is_err());
    }

    #[test]
    fn test_fee_bps_bounds() {
        assert!(validate_fee_bps(0).is_ok());
        assert!(validate_fee_bps(10_000).is_ok());
        assert!(validate_fee_bps(10_001).is_err());
    }

    #[test]
    fn test_time_checks() {
        assert!(validate_not_future(100, 100).is_ok());
        assert!(validate_not_future(100, 101).is_err());
        assert!(validate_time_order(10, 20).is_ok());
        assert!(validate_time_order(20, 10).is_err());
    }

    #[test]
    fn test_observation_payload_budget() {
        let revision = "r".repeat(64);
        assert!(validate_observation_payload(&revision, &"n".repeat(256)).is_ok());
        assert!(validate_observation_payload(&revision, &"n".repeat(257)).is_err());
    }

    #[test]
    fn test_json_shape() {
        assert!(validate_json_shape("").is_ok());
        assert!(validate_json_shape("{}").is_ok());
        assert!(validate_json_shape(r#"{"k":"v"}"#).is_ok());
        assert!(validate_json_shape("not json").is_err());
        assert!(validate_json_shape(r#"{"k":"v}"#).is_err());
    }
}
