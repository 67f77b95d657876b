//! Input validation for stash.
//!
//! All validators return `StashError::Validation` on failure.

use crate::error::{StashError, StashResult};

/// Maximum alias length in characters
pub const MAX_ALIAS_LENGTH: usize = 100;

/// Maximum length of a single free-text filter term
pub const MAX_FILTER_LENGTH: usize = 500;

/// Validate an alias.
///
/// Aliases must contain at least one character that is neither
/// whitespace nor a digit, so an alias can never shadow a numeric id.
/// Length is capped at [`MAX_ALIAS_LENGTH`] characters.
pub fn validate_alias(alias: &str) -> StashResult<()> {
    if !alias.chars().any(|c| !c.is_whitespace() && !c.is_ascii_digit()) {
        return Err(StashError::validation(
            "alias",
            "must contain a non-numeric, non-whitespace character",
        ));
    }

    if alias.chars().count() > MAX_ALIAS_LENGTH {
        return Err(StashError::validation(
            "alias",
            format!("cannot exceed {} characters", MAX_ALIAS_LENGTH),
        ));
    }

    Ok(())
}

/// Validate a free-text filter term.
pub fn validate_filter(filter: &str) -> StashResult<()> {
    if filter.len() > MAX_FILTER_LENGTH {
        return Err(StashError::validation(
            "filter",
            format!(
                "cannot exceed {} characters (got {})",
                MAX_FILTER_LENGTH,
                filter.len()
            ),
        ));
    }
    Ok(())
}
