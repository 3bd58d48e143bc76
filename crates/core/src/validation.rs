//! Input limits shared by the API and service layers.

use crate::error::CoreError;

/// Maximum length of a note attached to a quote or counter-offer.
pub const MAX_NOTE_LENGTH: usize = 1_000;

/// Maximum length of a single thread message.
pub const MAX_MESSAGE_LENGTH: usize = 4_000;

/// Maximum length of the staff-only notes field.
pub const MAX_ADMIN_NOTES_LENGTH: usize = 10_000;

/// Default page size for list endpoints.
pub const DEFAULT_PAGE_SIZE: i64 = 25;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Trim a message body and check it is non-empty and within limits.
pub fn normalize_message(text: &str) -> Result<String, CoreError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Message text must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Message text must be at most {MAX_MESSAGE_LENGTH} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional note; blank notes become `None`.
pub fn normalize_note(note: Option<&str>) -> Result<Option<String>, CoreError> {
    let Some(trimmed) = note.map(str::trim).filter(|n| !n.is_empty()) else {
        return Ok(None);
    };
    if trimmed.chars().count() > MAX_NOTE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Note must be at most {MAX_NOTE_LENGTH} characters"
        )));
    }
    Ok(Some(trimmed.to_string()))
}

/// Clamp a user-provided limit to `[1, max]`, falling back to `default`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}
