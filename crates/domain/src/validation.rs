// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

/// Minimum number of characters in a participant biography.
pub const MIN_ABOUT_LENGTH: usize = 50;

/// Longest name, email, voter name or payment reference, in characters.
pub const MAX_TEXT_LENGTH: usize = 255;

/// Longest participant biography, in characters.
///
/// A `TEXT` column holds 65,535 bytes and `utf8mb4` needs up to four bytes
/// per character.
pub const MAX_ABOUT_LENGTH: usize = 16_383;

/// Longest photo URL, in characters.
pub const MAX_PHOTO_URL_LENGTH: usize = 2048;

/// Validates that a required text field is not blank.
///
/// Returns the trimmed value.
///
/// # Errors
///
/// Returns `DomainError::MissingField` if the value is empty after trimming.
pub fn validate_required(field: &'static str, value: &str) -> Result<String, DomainError> {
    let trimmed: &str = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

/// Validates that a value fits its column.
///
/// # Errors
///
/// Returns `DomainError::FieldTooLong` if `value` has more than `max`
/// characters.
pub fn validate_max_length(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), DomainError> {
    let actual: usize = value.chars().count();
    if actual > max {
        return Err(DomainError::FieldTooLong { field, max, actual });
    }
    Ok(())
}

/// Validates that a required text field is present and fits its column.
///
/// Returns the trimmed value.
///
/// # Errors
///
/// Returns `DomainError::MissingField` for a blank value or
/// `DomainError::FieldTooLong` for an oversized one.
pub fn validate_text(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<String, DomainError> {
    let trimmed: String = validate_required(field, value)?;
    validate_max_length(field, &trimmed, max)?;
    Ok(trimmed)
}

/// Validates that a contest starts strictly before it ends.
///
/// # Errors
///
/// Returns `DomainError::InvalidDateRange` if `start_date >= end_date`.
pub fn validate_contest_dates(
    start_date: OffsetDateTime,
    end_date: OffsetDateTime,
) -> Result<(), DomainError> {
    if start_date >= end_date {
        return Err(DomainError::InvalidDateRange {
            start_date,
            end_date,
        });
    }
    Ok(())
}

/// Parses a contest date.
///
/// Accepts RFC 3339 timestamps and plain `YYYY-MM-DD` calendar dates,
/// the latter interpreted as midnight UTC.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if neither format matches.
pub fn parse_contest_date(raw: &str) -> Result<OffsetDateTime, DomainError> {
    let trimmed: &str = raw.trim();
    if let Ok(timestamp) = OffsetDateTime::parse(trimmed, &Rfc3339) {
        return Ok(timestamp);
    }

    let calendar = format_description!("[year]-[month]-[day]");
    Date::parse(trimmed, &calendar)
        .map(|date| date.midnight().assume_utc())
        .map_err(|e| DomainError::DateParseError {
            date_string: raw.to_string(),
            error: e.to_string(),
        })
}

/// Validates a requested vote count and narrows it to the stored width.
///
/// # Errors
///
/// Returns `DomainError::InvalidVoteCount` if the count is below one or
/// exceeds `u32::MAX`.
pub fn validate_vote_count(count: i64) -> Result<u32, DomainError> {
    if count < 1 {
        return Err(DomainError::InvalidVoteCount(count));
    }
    u32::try_from(count).map_err(|_| DomainError::InvalidVoteCount(count))
}

/// Performs a syntactic email check.
///
/// The address must contain exactly one `@`, a non-empty local part and
/// a domain with an interior dot. Whitespace is not allowed.
///
/// # Errors
///
/// Returns `DomainError::InvalidEmail` if any of these conditions fail.
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    let invalid = || DomainError::InvalidEmail(email.to_string());

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };

    if local.is_empty() {
        return Err(invalid());
    }

    match domain.find('.') {
        Some(_) if !domain.starts_with('.') && !domain.ends_with('.') => Ok(()),
        _ => Err(invalid()),
    }
}

/// Validates the biography length.
///
/// # Errors
///
/// Returns `DomainError::AboutTooShort` if fewer than
/// [`MIN_ABOUT_LENGTH`] characters are supplied, or
/// `DomainError::FieldTooLong` above [`MAX_ABOUT_LENGTH`].
pub fn validate_about(about: &str) -> Result<(), DomainError> {
    let trimmed: &str = about.trim();
    let actual: usize = trimmed.chars().count();
    if actual < MIN_ABOUT_LENGTH {
        return Err(DomainError::AboutTooShort {
            min: MIN_ABOUT_LENGTH,
            actual,
        });
    }
    validate_max_length("about", trimmed, MAX_ABOUT_LENGTH)
}
