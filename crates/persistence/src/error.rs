// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use contest_vote::{StoreError, UniqueConstraint};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// A unique index rejected a write.
    UniqueViolation(UniqueConstraint),
    /// A foreign key rejected a write.
    ForeignKeyViolation(String),
    /// The requested contest was not found.
    ContestNotFound(i64),
    /// The requested participant was not found.
    ParticipantNotFound(String),
    /// The participant was evicted before the vote could be recorded.
    ParticipantEvicted { participant_id: i64 },
    /// A stored column held a value that cannot be decoded.
    InvalidStoredValue(String),
    /// The requested resource was not found.
    NotFound(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::UniqueViolation(constraint) => {
                write!(f, "Unique constraint violated: {constraint}")
            }
            Self::ForeignKeyViolation(msg) => write!(f, "Foreign key violation: {msg}"),
            Self::ContestNotFound(id) => write!(f, "Contest not found: {id}"),
            Self::ParticipantNotFound(key) => write!(f, "Participant not found: {key}"),
            Self::ParticipantEvicted { participant_id } => {
                write!(f, "Participant {participant_id} is evicted")
            }
            Self::InvalidStoredValue(msg) => write!(f, "Invalid stored value: {msg}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

/// Maps a backend unique-violation message onto the index it names.
///
/// `SQLite` reports `UNIQUE constraint failed: participants.email`;
/// `MySQL` and `MariaDB` report `Duplicate entry '...' for key
/// 'uq_participants_email'`. Only the key part of the `MySQL` message is
/// inspected so that the duplicated value cannot influence the match.
#[must_use]
pub fn classify_unique_violation(message: &str) -> UniqueConstraint {
    let scope: &str = message
        .rsplit_once("for key")
        .map_or(message, |(_, key)| key);

    if scope.contains("payment_reference") {
        UniqueConstraint::PaymentReference
    } else if scope.contains("code_name") {
        UniqueConstraint::ParticipantCodeName
    } else if scope.contains("email") {
        UniqueConstraint::ParticipantEmail
    } else {
        UniqueConstraint::Other(message.to_string())
    }
}

impl From<DieselError> for PersistenceError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => Self::NotFound("Record not found".to_string()),
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::UniqueViolation(classify_unique_violation(info.message()))
            }
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
                Self::ForeignKeyViolation(info.message().to_string())
            }
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<PersistenceError> for StoreError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::UniqueViolation(constraint) => Self::UniqueViolation(constraint),
            PersistenceError::ContestNotFound(id) => Self::NotFound {
                entity: "Contest",
                key: id.to_string(),
            },
            PersistenceError::ParticipantNotFound(key) => Self::NotFound {
                entity: "Participant",
                key,
            },
            PersistenceError::ParticipantEvicted { participant_id } => {
                Self::ParticipantEvicted { participant_id }
            }
            other => Self::Backend(other.to_string()),
        }
    }
}
