// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::OffsetDateTime;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A contest identifier is not a positive integer.
    InvalidContestId(String),
    /// A participant code name is empty or malformed.
    InvalidCodeName(String),
    /// A payment reference is empty or malformed.
    InvalidPaymentReference(String),
    /// A required field was missing or blank.
    MissingField(&'static str),
    /// A field is longer than its stored column allows.
    FieldTooLong {
        /// The offending field.
        field: &'static str,
        /// The maximum length in characters.
        max: usize,
        /// The actual length in characters.
        actual: usize,
    },
    /// Contest start date is not strictly before the end date.
    InvalidDateRange {
        /// The requested start date.
        start_date: OffsetDateTime,
        /// The requested end date.
        end_date: OffsetDateTime,
    },
    /// Failed to parse a date from a string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Vote count is not a positive integer.
    InvalidVoteCount(i64),
    /// Email address is syntactically invalid.
    InvalidEmail(String),
    /// Participant biography is too short.
    AboutTooShort {
        /// The required minimum length in characters.
        min: usize,
        /// The actual length in characters.
        actual: usize,
    },
    /// The participant has already been evicted.
    ParticipantAlreadyEvicted {
        /// The participant's code name.
        code_name: String,
    },
    /// Votes cannot be recorded for an evicted participant.
    ParticipantEvicted {
        /// The participant's code name.
        code_name: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidContestId(raw) => {
                write!(f, "Valid contestId is required, got '{raw}'")
            }
            Self::InvalidCodeName(msg) => write!(f, "Invalid code name: {msg}"),
            Self::InvalidPaymentReference(msg) => write!(f, "Invalid payment reference: {msg}"),
            Self::MissingField(field) => write!(f, "{field} is required"),
            Self::FieldTooLong { field, max, actual } => {
                write!(f, "{field} must be at most {max} characters, got {actual}")
            }
            Self::InvalidDateRange {
                start_date,
                end_date,
            } => {
                write!(
                    f,
                    "End date must be after start date (start: {start_date}, end: {end_date})"
                )
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::InvalidVoteCount(count) => {
                write!(f, "voteCount must be a positive integer, got {count}")
            }
            Self::InvalidEmail(email) => write!(f, "Invalid email address: '{email}'"),
            Self::AboutTooShort { min, actual } => {
                write!(
                    f,
                    "About must be at least {min} characters, got {actual}"
                )
            }
            Self::ParticipantAlreadyEvicted { code_name } => {
                write!(f, "Participant {code_name} is already evicted")
            }
            Self::ParticipantEvicted { code_name } => {
                write!(
                    f,
                    "Participant {code_name} has been evicted and cannot receive votes"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
