// ABOUTME: Input validation for the submitted backup settings form
// ABOUTME: Counter clamping and filetype checks against the available codecs

use autobackup_core::{Filetype, FiletypeParseError};
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error(transparent)]
    UnknownFiletype(#[from] FiletypeParseError),

    #[error("Filetype {0} is not available in this environment")]
    UnavailableFiletype(Filetype),
}

/// Validate a submitted filetype against the codecs detected for this request
pub fn validate_filetype(
    value: &str,
    available: &BTreeSet<Filetype>,
) -> Result<Filetype, ValidationError> {
    let filetype = value.parse::<Filetype>()?;

    if available.contains(&filetype) {
        Ok(filetype)
    } else {
        Err(ValidationError::UnavailableFiletype(filetype))
    }
}

/// Resolve the filetype to store, falling back to plain text
pub fn resolve_filetype(value: &str, available: &BTreeSet<Filetype>) -> Filetype {
    validate_filetype(value, available).unwrap_or_else(|e| {
        warn!(value = %value, error = %e, "Rejected submitted filetype, storing text");
        Filetype::Text
    })
}

/// Counters are non-negative; negative input clamps to zero
pub fn counter_value(field: &str, value: i64) -> u32 {
    match u32::try_from(value) {
        Ok(counter) => counter,
        Err(_) if value < 0 => {
            warn!(field = %field, value, "Negative counter submitted, clamping to 0");
            0
        }
        Err(_) => {
            warn!(field = %field, value, "Counter too large, clamping");
            u32::MAX
        }
    }
}

/// Checkbox-style fields submit 0 or 1; any non-zero value is set
pub fn flag_value(value: i64) -> bool {
    value != 0
}
