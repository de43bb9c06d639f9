// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The transactional store contract.

use contest_vote_domain::{
    CodeName, Contest, ContestId, NewContest, NewParticipant, NewVote, Participant, Vote,
};
use thiserror::Error;

/// Unique indexes whose violation is meaningful to the registries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UniqueConstraint {
    /// `participants.email`
    ParticipantEmail,
    /// `participants.code_name`
    ParticipantCodeName,
    /// `votes.payment_reference`
    PaymentReference,
    /// Any other unique index, identified by the backend message.
    Other(String),
}

impl std::fmt::Display for UniqueConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ParticipantEmail => write!(f, "participants.email"),
            Self::ParticipantCodeName => write!(f, "participants.code_name"),
            Self::PaymentReference => write!(f, "votes.payment_reference"),
            Self::Other(detail) => write!(f, "{detail}"),
        }
    }
}

/// Store failures, normalized so no backend type crosses into the core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(UniqueConstraint),
    /// A row expected to exist was not found inside a transaction.
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },
    /// The eviction re-check inside the vote transaction failed.
    #[error("Participant {participant_id} is evicted")]
    ParticipantEvicted { participant_id: i64 },
    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Rows removed by a contest cascade delete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContestDeletion {
    pub participants_removed: usize,
    pub votes_removed: usize,
    /// Photo URLs held by the removed participants, collected before removal.
    pub photos: Vec<String>,
}

/// Durable storage for contests, participants and votes.
///
/// Implementations must enforce uniqueness of participant email, participant
/// code name and non-null payment reference, and must run every cascade and
/// the vote insert inside a single transaction.
pub trait ContestStore {
    /// Inserts a contest and returns it with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn insert_contest(&mut self, contest: &NewContest) -> Result<Contest, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn find_contest(&mut self, contest_id: ContestId) -> Result<Option<Contest>, StoreError>;

    /// Lists all contests, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn list_contests(&mut self) -> Result<Vec<Contest>, StoreError>;

    /// Overwrites the mutable fields of a contest.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the contest no longer exists.
    fn update_contest(&mut self, contest: &Contest) -> Result<Contest, StoreError>;

    /// Atomically removes every vote and participant of a contest, then the
    /// contest itself.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the contest does not exist. Nothing
    /// is removed on error.
    fn delete_contest_cascade(&mut self, contest_id: ContestId)
    -> Result<ContestDeletion, StoreError>;

    /// Returns the code name of the most recently created participant in a
    /// contest.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn latest_code_name(&mut self, contest_id: ContestId) -> Result<Option<CodeName>, StoreError>;

    /// # Errors
    ///
    /// Returns `StoreError::UniqueViolation` on duplicate email or code name.
    fn insert_participant(
        &mut self,
        contest_id: ContestId,
        code_name: &CodeName,
        participant: &NewParticipant,
    ) -> Result<Participant, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn find_participant(&mut self, code_name: &CodeName) -> Result<Option<Participant>, StoreError>;

    /// Lists a contest's participants: active before evicted, each group
    /// newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn list_participants(&mut self, contest_id: ContestId)
    -> Result<Vec<Participant>, StoreError>;

    /// Overwrites name, email, about and photo of a participant.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UniqueViolation` on duplicate email.
    fn update_participant(&mut self, participant: &Participant)
    -> Result<Participant, StoreError>;

    /// Flips the eviction flag, touching only a currently active row.
    ///
    /// Returns `false` when no row was changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn mark_evicted(&mut self, participant_id: i64) -> Result<bool, StoreError>;

    /// Atomically removes a participant's votes and then the participant.
    ///
    /// Returns the number of votes removed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the participant does not exist.
    fn delete_participant_cascade(&mut self, participant_id: i64) -> Result<usize, StoreError>;

    /// Records a vote after re-checking, in the same transaction, that the
    /// participant exists and is not evicted.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ParticipantEvicted`, `StoreError::NotFound`, or
    /// `StoreError::UniqueViolation` on a reused payment reference.
    fn insert_vote(&mut self, vote: &NewVote) -> Result<Vote, StoreError>;

    /// Lists a participant's votes in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn list_votes_for_participant(&mut self, participant_id: i64)
    -> Result<Vec<Vote>, StoreError>;

    /// Returns `(participant_id, vote_count)` for every vote in a contest.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn contest_vote_counts(&mut self, contest_id: ContestId)
    -> Result<Vec<(i64, u32)>, StoreError>;
}
