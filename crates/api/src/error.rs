// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use contest_vote::CoreError;
use contest_vote_domain::DomainError;
use thiserror::Error;

/// API-level errors.
///
/// These are distinct from domain and core errors and represent the API
/// contract. The server maps each variant onto one HTTP status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Invalid input was provided.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    #[error("{resource_type} not found: {message}")]
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// What was looked up.
        message: String,
    },
    /// A uniqueness or lifecycle rule rejected the request.
    #[error("{message}")]
    Conflict {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// An internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    pub(crate) fn invalid(field: &str, message: String) -> Self {
        Self::InvalidInput {
            field: field.to_string(),
            message,
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::InvalidContestId(_) => ApiError::invalid("contestId", message),
        DomainError::InvalidCodeName(_) => ApiError::invalid("codeName", message),
        DomainError::InvalidPaymentReference(_) => ApiError::invalid("paymentReference", message),
        DomainError::MissingField(field) | DomainError::FieldTooLong { field, .. } => {
            ApiError::invalid(field, message)
        }
        DomainError::InvalidDateRange { .. } => ApiError::invalid("endDate", message),
        DomainError::DateParseError { .. } => ApiError::invalid("date", message),
        DomainError::InvalidVoteCount(_) => ApiError::invalid("voteCount", message),
        DomainError::InvalidEmail(_) => ApiError::invalid("email", message),
        DomainError::AboutTooShort { .. } => ApiError::invalid("about", message),
        DomainError::ParticipantAlreadyEvicted { .. } => ApiError::Conflict {
            rule: String::from("already_evicted"),
            message,
        },
        DomainError::ParticipantEvicted { .. } => ApiError::Conflict {
            rule: String::from("participant_evicted"),
            message,
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked
/// directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::Validation(domain_err) => translate_domain_error(domain_err),
        CoreError::NotFound { entity, key } => ApiError::ResourceNotFound {
            resource_type: entity.to_string(),
            message: key,
        },
        CoreError::Conflict(kind) => ApiError::Conflict {
            rule: kind.rule().to_string(),
            message: kind.to_string(),
        },
        CoreError::Store(message) => ApiError::Internal { message },
    }
}
