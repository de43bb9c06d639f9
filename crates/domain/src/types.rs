// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::identifiers::{CodeName, ContestId, PaymentReference};
use crate::validation::{
    MAX_ABOUT_LENGTH, MAX_PHOTO_URL_LENGTH, MAX_TEXT_LENGTH, validate_contest_dates,
    validate_max_length, validate_text, validate_vote_count,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Lifecycle state of a participant.
///
/// The only transition is `Active` → `Evicted`. It cannot be undone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ParticipantStatus {
    /// Competing and able to receive votes.
    #[default]
    Active,
    /// Removed from competition. Keeps accumulated votes, receives no more.
    Evicted,
}

impl ParticipantStatus {
    /// Maps the stored eviction flag onto a status.
    #[must_use]
    pub const fn from_evicted(evicted: bool) -> Self {
        if evicted { Self::Evicted } else { Self::Active }
    }

    #[must_use]
    pub const fn is_evicted(&self) -> bool {
        matches!(self, Self::Evicted)
    }

    /// Checks if a transition from this state to another is valid.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!((self, target), (Self::Active, Self::Evicted))
    }

    /// Applies the eviction transition.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ParticipantAlreadyEvicted` if the participant
    /// is already evicted.
    pub fn evict(self, code_name: &CodeName) -> Result<Self, DomainError> {
        if self.can_transition_to(Self::Evicted) {
            Ok(Self::Evicted)
        } else {
            Err(DomainError::ParticipantAlreadyEvicted {
                code_name: code_name.to_string(),
            })
        }
    }

    /// Checks that a participant in this state may still receive votes.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ParticipantEvicted` when evicted.
    pub fn ensure_can_receive_votes(self, code_name: &CodeName) -> Result<(), DomainError> {
        if self.is_evicted() {
            return Err(DomainError::ParticipantEvicted {
                code_name: code_name.to_string(),
            });
        }
        Ok(())
    }
}

/// A validated request to create a contest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContest {
    name: String,
    start_date: OffsetDateTime,
    end_date: OffsetDateTime,
}

impl NewContest {
    /// Creates a new contest request.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or too long, or the start
    /// date is not strictly before the end date.
    pub fn new(
        name: &str,
        start_date: OffsetDateTime,
        end_date: OffsetDateTime,
    ) -> Result<Self, DomainError> {
        let name: String = validate_text("name", name, MAX_TEXT_LENGTH)?;
        validate_contest_dates(start_date, end_date)?;
        Ok(Self {
            name,
            start_date,
            end_date,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn start_date(&self) -> OffsetDateTime {
        self.start_date
    }

    #[must_use]
    pub const fn end_date(&self) -> OffsetDateTime {
        self.end_date
    }
}

/// A persisted contest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contest {
    pub contest_id: ContestId,
    pub name: String,
    pub start_date: OffsetDateTime,
    pub end_date: OffsetDateTime,
    /// Creation timestamp as recorded by the store.
    pub created_at: String,
}

/// Partial update of a contest. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContestPatch {
    pub name: Option<String>,
    pub start_date: Option<OffsetDateTime>,
    pub end_date: Option<OffsetDateTime>,
}

impl Contest {
    /// Produces the contest that results from applying a patch.
    ///
    /// Dates are validated against the merged result, so an update that
    /// only moves one end of the range is still checked against the
    /// stored other end.
    ///
    /// # Errors
    ///
    /// Returns an error if a supplied name is blank or too long, or the
    /// merged range is not strictly increasing.
    pub fn apply(&self, patch: &ContestPatch) -> Result<Self, DomainError> {
        let name: String = match &patch.name {
            Some(name) => validate_text("name", name, MAX_TEXT_LENGTH)?,
            None => self.name.clone(),
        };
        let start_date: OffsetDateTime = patch.start_date.unwrap_or(self.start_date);
        let end_date: OffsetDateTime = patch.end_date.unwrap_or(self.end_date);
        validate_contest_dates(start_date, end_date)?;

        Ok(Self {
            contest_id: self.contest_id,
            name,
            start_date,
            end_date,
            created_at: self.created_at.clone(),
        })
    }
}

fn photo_url(raw: Option<&str>) -> Result<Option<String>, DomainError> {
    let Some(url) = raw.map(str::trim).filter(|url| !url.is_empty()) else {
        return Ok(None);
    };
    validate_max_length("photo", url, MAX_PHOTO_URL_LENGTH)?;
    Ok(Some(url.to_string()))
}

/// A validated request to create a participant.
///
/// The photo, if any, has already been uploaded; only its URL is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewParticipant {
    full_name: String,
    email: String,
    about: String,
    photo: Option<String>,
}

impl NewParticipant {
    /// Creates a new participant request.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingField` if the name, email or about
    /// text is blank, or `DomainError::FieldTooLong` if any field exceeds
    /// its stored width.
    pub fn new(
        full_name: &str,
        email: &str,
        about: &str,
        photo: Option<&str>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            full_name: validate_text("fullName", full_name, MAX_TEXT_LENGTH)?,
            email: validate_text("email", email, MAX_TEXT_LENGTH)?,
            about: validate_text("about", about, MAX_ABOUT_LENGTH)?,
            photo: photo_url(photo)?,
        })
    }

    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn about(&self) -> &str {
        &self.about
    }

    #[must_use]
    pub fn photo(&self) -> Option<&str> {
        self.photo.as_deref()
    }
}

/// A persisted participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Store-assigned identifier used as the vote foreign key.
    pub participant_id: i64,
    pub code_name: CodeName,
    pub full_name: String,
    pub email: String,
    pub about: String,
    pub photo: Option<String>,
    pub contest_id: ContestId,
    pub status: ParticipantStatus,
    pub created_at: String,
}

/// Partial update of a participant.
///
/// `None` and blank strings both leave a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantPatch {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub about: Option<String>,
    pub photo: Option<String>,
}

fn patched(
    field: &'static str,
    current: &str,
    requested: Option<&String>,
    max: usize,
) -> Result<String, DomainError> {
    match requested.map(|value| value.trim()).filter(|value| !value.is_empty()) {
        Some(value) => {
            validate_max_length(field, value, max)?;
            Ok(value.to_string())
        }
        None => Ok(current.to_string()),
    }
}

impl Participant {
    /// Produces the participant that results from applying a patch.
    ///
    /// Identity, contest and status are never touched by a patch.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::FieldTooLong` if a supplied value exceeds its
    /// stored width.
    pub fn apply(&self, patch: &ParticipantPatch) -> Result<Self, DomainError> {
        let photo: Option<String> =
            photo_url(patch.photo.as_deref())?.or_else(|| self.photo.clone());

        Ok(Self {
            participant_id: self.participant_id,
            code_name: self.code_name.clone(),
            full_name: patched(
                "fullName",
                &self.full_name,
                patch.full_name.as_ref(),
                MAX_TEXT_LENGTH,
            )?,
            email: patched("email", &self.email, patch.email.as_ref(), MAX_TEXT_LENGTH)?,
            about: patched("about", &self.about, patch.about.as_ref(), MAX_ABOUT_LENGTH)?,
            photo,
            contest_id: self.contest_id,
            status: self.status,
            created_at: self.created_at.clone(),
        })
    }

    /// Returns this participant's photo if `updated` no longer references it.
    #[must_use]
    pub fn replaced_photo(&self, updated: &Self) -> Option<&str> {
        match (&self.photo, &updated.photo) {
            (Some(old), Some(new)) if old == new => None,
            (Some(old), _) => Some(old.as_str()),
            (None, _) => None,
        }
    }

    #[must_use]
    pub const fn is_evicted(&self) -> bool {
        self.status.is_evicted()
    }
}

/// A validated vote ready to be recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVote {
    contest_id: ContestId,
    participant_id: i64,
    vote_count: u32,
    voter_name: String,
    payment_reference: Option<PaymentReference>,
}

impl NewVote {
    /// Creates a new vote.
    ///
    /// # Errors
    ///
    /// Returns an error if the vote count is below one or the voter name
    /// is blank or too long.
    pub fn new(
        contest_id: ContestId,
        participant_id: i64,
        vote_count: i64,
        voter_name: &str,
        payment_reference: Option<PaymentReference>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            contest_id,
            participant_id,
            vote_count: validate_vote_count(vote_count)?,
            voter_name: validate_text("voterName", voter_name, MAX_TEXT_LENGTH)?,
            payment_reference,
        })
    }

    #[must_use]
    pub const fn contest_id(&self) -> ContestId {
        self.contest_id
    }

    #[must_use]
    pub const fn participant_id(&self) -> i64 {
        self.participant_id
    }

    #[must_use]
    pub const fn vote_count(&self) -> u32 {
        self.vote_count
    }

    #[must_use]
    pub fn voter_name(&self) -> &str {
        &self.voter_name
    }

    #[must_use]
    pub const fn payment_reference(&self) -> Option<&PaymentReference> {
        self.payment_reference.as_ref()
    }
}

/// A recorded vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub vote_id: i64,
    pub contest_id: ContestId,
    pub participant_id: i64,
    pub vote_count: u32,
    pub voter_name: String,
    pub payment_reference: Option<String>,
    pub created_at: String,
}
