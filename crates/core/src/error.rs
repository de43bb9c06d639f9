// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::store::{StoreError, UniqueConstraint};
use contest_vote_domain::DomainError;
use thiserror::Error;

/// The specific rule behind a conflict.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConflictKind {
    #[error("Email already exists")]
    DuplicateEmail,
    #[error("Code name already exists")]
    DuplicateCodeName,
    #[error("Payment reference already exists")]
    DuplicatePaymentReference,
    #[error("Participant {code_name} is already evicted")]
    AlreadyEvicted { code_name: String },
    #[error("Participant {code_name} has been evicted and cannot receive votes")]
    ParticipantEvicted { code_name: String },
}

impl ConflictKind {
    /// Stable rule name used by the API layer.
    #[must_use]
    pub const fn rule(&self) -> &'static str {
        match self {
            Self::DuplicateEmail => "unique_email",
            Self::DuplicateCodeName => "unique_code_name",
            Self::DuplicatePaymentReference => "unique_payment_reference",
            Self::AlreadyEvicted { .. } => "already_evicted",
            Self::ParticipantEvicted { .. } => "participant_evicted",
        }
    }
}

/// Errors surfaced by the registries and the vote ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Malformed or missing input.
    #[error(transparent)]
    Validation(DomainError),
    /// A referenced contest or participant does not exist.
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },
    /// A uniqueness or lifecycle rule rejected the operation.
    #[error(transparent)]
    Conflict(ConflictKind),
    /// Infrastructure failure.
    #[error("Store error: {0}")]
    Store(String),
}

impl CoreError {
    pub(crate) fn contest_not_found(key: impl ToString) -> Self {
        Self::NotFound {
            entity: "Contest",
            key: key.to_string(),
        }
    }

    pub(crate) fn participant_not_found(key: impl ToString) -> Self {
        Self::NotFound {
            entity: "Participant",
            key: key.to_string(),
        }
    }
}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::ParticipantAlreadyEvicted { code_name } => {
                Self::Conflict(ConflictKind::AlreadyEvicted { code_name })
            }
            DomainError::ParticipantEvicted { code_name } => {
                Self::Conflict(ConflictKind::ParticipantEvicted { code_name })
            }
            other => Self::Validation(other),
        }
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation(UniqueConstraint::ParticipantEmail) => {
                Self::Conflict(ConflictKind::DuplicateEmail)
            }
            StoreError::UniqueViolation(UniqueConstraint::ParticipantCodeName) => {
                Self::Conflict(ConflictKind::DuplicateCodeName)
            }
            StoreError::UniqueViolation(UniqueConstraint::PaymentReference) => {
                Self::Conflict(ConflictKind::DuplicatePaymentReference)
            }
            StoreError::UniqueViolation(UniqueConstraint::Other(detail)) => {
                Self::Store(format!("Unexpected unique violation: {detail}"))
            }
            StoreError::NotFound { entity, key } => Self::NotFound { entity, key },
            StoreError::ParticipantEvicted { participant_id } => {
                Self::Conflict(ConflictKind::ParticipantEvicted {
                    code_name: format!("#{participant_id}"),
                })
            }
            StoreError::Backend(msg) => Self::Store(msg),
        }
    }
}
