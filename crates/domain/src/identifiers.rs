// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::validation::{MAX_TEXT_LENGTH, validate_max_length};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Prefix carried by every generated participant code name.
pub const CODE_NAME_PREFIX: &str = "CW";

/// Prefix carried by every synthesized admin payment reference.
pub const ADMIN_REFERENCE_PREFIX: &str = "VOTE_";

/// The store-assigned identifier of a contest.
///
/// Externally supplied identifiers must be positive decimal integers.
/// Anything else is rejected before a query is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContestId(i64);

impl ContestId {
    /// Wraps a store-assigned identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Parses an externally supplied contest identifier.
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidContestId` if the value is not a
    /// positive integer.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        match raw.trim().parse::<i64>() {
            Ok(value) if value > 0 => Ok(Self(value)),
            _ => Err(DomainError::InvalidContestId(raw.to_string())),
        }
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl FromStr for ContestId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for ContestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A participant's public, globally unique code name (e.g. `CW001`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CodeName(String);

impl CodeName {
    /// Parses an externally supplied code name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCodeName` if the value is blank.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed: &str = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidCodeName(String::from(
                "code name cannot be empty",
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Formats a code name from a sequence number.
    ///
    /// Numbers below 1000 are zero-padded to three digits.
    #[must_use]
    pub fn from_sequence(sequence: u32) -> Self {
        Self(format!("{CODE_NAME_PREFIX}{sequence:03}"))
    }

    /// Returns the numeric suffix if this code name follows the
    /// generated `CW<digits>` pattern.
    #[must_use]
    pub fn sequence(&self) -> Option<u32> {
        let digits: &str = self.0.strip_prefix(CODE_NAME_PREFIX)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse::<u32>().ok()
    }

    /// Computes the code name that follows the most recently created
    /// participant in a contest.
    ///
    /// Starts at `CW001` when there is no prior participant or the prior
    /// code name does not follow the generated pattern.
    #[must_use]
    pub fn next_after(latest: Option<&Self>) -> Self {
        let next: u32 = latest
            .and_then(Self::sequence)
            .map_or(1, |sequence| sequence.saturating_add(1));
        Self::from_sequence(next)
    }

    /// Returns the code name as a string slice.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CodeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A payment reference that makes a vote idempotent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaymentReference(String);

impl PaymentReference {
    /// Parses a payment reference supplied by a payment flow.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPaymentReference` if the value is blank,
    /// or `DomainError::FieldTooLong` if it does not fit the stored column.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed: &str = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidPaymentReference(String::from(
                "payment reference cannot be empty",
            )));
        }
        validate_max_length("paymentReference", trimmed, MAX_TEXT_LENGTH)?;
        Ok(Self(trimmed.to_string()))
    }

    /// Synthesizes a fresh `VOTE_<uuid-v4>` reference for an admin vote.
    #[must_use]
    pub fn generate_admin() -> Self {
        Self(format!("{ADMIN_REFERENCE_PREFIX}{}", Uuid::new_v4()))
    }

    /// Returns the reference as a string slice.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PaymentReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
