// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::{ConflictKind, CoreError};
use crate::lookup::{require_contest, require_participant_in_contest};
use crate::store::{ContestStore, StoreError};
use contest_vote_domain::{
    CodeName, ContestId, MAX_TEXT_LENGTH, NewVote, Participant, ParticipantResult,
    PaymentReference, Vote, tally_results, validate_text, validate_vote_count,
};
use tracing::info;

/// Voter name recorded on admin votes when none is supplied.
pub const DEFAULT_ADMIN_VOTER: &str = "Admin";

/// Records votes and aggregates totals.
pub struct VoteLedger<'a, S: ContestStore> {
    store: &'a mut S,
}

impl<'a, S: ContestStore> VoteLedger<'a, S> {
    pub const fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    /// Records a vote for a participant.
    ///
    /// A supplied payment reference makes the vote idempotent: a second
    /// vote with the same reference is rejected and counts nothing. A blank
    /// reference is recorded as no reference.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a non-positive count, a blank or
    /// oversized voter name, or an oversized reference; `CoreError::NotFound`
    /// if the contest or participant is absent or the participant is in
    /// another contest; `CoreError::Conflict` if the participant is evicted
    /// or the reference was already used.
    pub fn record_vote(
        &mut self,
        contest_id: ContestId,
        code_name: &CodeName,
        vote_count: i64,
        voter_name: &str,
        payment_reference: Option<&str>,
    ) -> Result<Vote, CoreError> {
        let reference: Option<PaymentReference> = payment_reference
            .filter(|raw| !raw.trim().is_empty())
            .map(PaymentReference::parse)
            .transpose()?;
        self.insert(contest_id, code_name, vote_count, voter_name, reference)
    }

    /// Records an admin-issued vote with a synthesized `VOTE_<uuid>`
    /// reference. A blank or absent voter name becomes `"Admin"`.
    ///
    /// # Errors
    ///
    /// Same as [`VoteLedger::record_vote`].
    pub fn add_admin_vote(
        &mut self,
        contest_id: ContestId,
        code_name: &CodeName,
        vote_count: i64,
        voter_name: Option<&str>,
    ) -> Result<Vote, CoreError> {
        let voter_name: &str = voter_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_ADMIN_VOTER);
        let reference: PaymentReference = PaymentReference::generate_admin();
        self.insert(contest_id, code_name, vote_count, voter_name, Some(reference))
    }

    /// Returns every participant of a contest with its vote total, in
    /// listing order.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the contest does not exist.
    pub fn results(&mut self, contest_id: ContestId) -> Result<Vec<ParticipantResult>, CoreError> {
        require_contest(self.store, contest_id)?;
        let participants: Vec<Participant> = self.store.list_participants(contest_id)?;
        let counts: Vec<(i64, u32)> = self.store.contest_vote_counts(contest_id)?;
        Ok(tally_results(&participants, &counts))
    }

    fn insert(
        &mut self,
        contest_id: ContestId,
        code_name: &CodeName,
        vote_count: i64,
        voter_name: &str,
        reference: Option<PaymentReference>,
    ) -> Result<Vote, CoreError> {
        validate_vote_count(vote_count)?;
        validate_text("voterName", voter_name, MAX_TEXT_LENGTH)?;

        require_contest(self.store, contest_id)?;
        let participant: Participant =
            require_participant_in_contest(self.store, contest_id, code_name)?;
        participant.status.ensure_can_receive_votes(code_name)?;

        let new_vote: NewVote = NewVote::new(
            contest_id,
            participant.participant_id,
            vote_count,
            voter_name,
            reference,
        )?;

        let vote: Vote = self.store.insert_vote(&new_vote).map_err(|err| match err {
            StoreError::ParticipantEvicted { .. } => {
                CoreError::Conflict(ConflictKind::ParticipantEvicted {
                    code_name: code_name.to_string(),
                })
            }
            other => CoreError::from(other),
        })?;

        info!(
            contest_id = contest_id.value(),
            code_name = %code_name,
            vote_count = vote.vote_count,
            vote_id = vote.vote_id,
            "Recorded vote"
        );
        Ok(vote)
    }
}
