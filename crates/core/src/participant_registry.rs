// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::{ConflictKind, CoreError};
use crate::lookup::{require_contest, require_participant};
use crate::media::{MediaStore, cleanup_photo};
use crate::store::ContestStore;
use contest_vote_domain::{
    CodeName, ContestId, NewParticipant, Participant, ParticipantPatch, ParticipantStatus, Vote,
};
use tracing::{debug, info};

/// A participant together with every vote recorded for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantDetails {
    pub participant: Participant,
    pub votes: Vec<Vote>,
}

/// Participant lifecycle operations.
pub struct ParticipantRegistry<'a, S: ContestStore> {
    store: &'a mut S,
}

impl<'a, S: ContestStore> ParticipantRegistry<'a, S> {
    pub const fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    /// Creates a participant with the next code name in its contest.
    ///
    /// The code name follows the most recently created participant of the
    /// contest. Two concurrent creates may compute the same code name; the
    /// loser gets `ConflictKind::DuplicateCodeName` and is not retried.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for blank fields, `CoreError::NotFound`
    /// if the contest does not exist, or `CoreError::Conflict` on a duplicate
    /// email or code name.
    pub fn create(
        &mut self,
        contest_id: ContestId,
        full_name: &str,
        email: &str,
        about: &str,
        photo: Option<&str>,
    ) -> Result<Participant, CoreError> {
        let new_participant: NewParticipant = NewParticipant::new(full_name, email, about, photo)?;
        require_contest(self.store, contest_id)?;

        let latest: Option<CodeName> = self.store.latest_code_name(contest_id)?;
        let code_name: CodeName = CodeName::next_after(latest.as_ref());

        let participant: Participant =
            self.store
                .insert_participant(contest_id, &code_name, &new_participant)?;

        info!(
            contest_id = contest_id.value(),
            code_name = %participant.code_name,
            participant_id = participant.participant_id,
            "Created participant"
        );
        Ok(participant)
    }

    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn get_by_code_name(
        &mut self,
        code_name: &CodeName,
    ) -> Result<Option<Participant>, CoreError> {
        debug!(code_name = %code_name, "Looking up participant");
        Ok(self.store.find_participant(code_name)?)
    }

    /// Looks up a participant and returns it only if it belongs to the
    /// given contest.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn get_by_contest_and_code_name(
        &mut self,
        contest_id: ContestId,
        code_name: &CodeName,
    ) -> Result<Option<Participant>, CoreError> {
        Ok(self
            .store
            .find_participant(code_name)?
            .filter(|participant| participant.contest_id == contest_id))
    }

    /// Returns a participant with its recorded votes.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn get_with_votes(
        &mut self,
        code_name: &CodeName,
    ) -> Result<Option<ParticipantDetails>, CoreError> {
        let Some(participant) = self.store.find_participant(code_name)? else {
            return Ok(None);
        };
        let votes: Vec<Vote> = self
            .store
            .list_votes_for_participant(participant.participant_id)?;
        Ok(Some(ParticipantDetails { participant, votes }))
    }

    /// Lists a contest's participants, active first, each group newest first.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the contest does not exist.
    pub fn list_by_contest(&mut self, contest_id: ContestId) -> Result<Vec<Participant>, CoreError> {
        require_contest(self.store, contest_id)?;
        Ok(self.store.list_participants(contest_id)?)
    }

    /// Applies a partial update.
    ///
    /// A replaced photo is removed from `media` after the update commits.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the participant does not exist,
    /// `CoreError::Validation` if a merged field is too long, or
    /// `CoreError::Conflict` if the new email belongs to someone else.
    pub fn update(
        &mut self,
        code_name: &CodeName,
        patch: &ParticipantPatch,
        media: &dyn MediaStore,
    ) -> Result<Participant, CoreError> {
        let existing: Participant = require_participant(self.store, code_name)?;
        let merged: Participant = existing.apply(patch)?;
        let updated: Participant = self.store.update_participant(&merged)?;

        if let Some(old_photo) = existing.replaced_photo(&updated) {
            cleanup_photo(media, old_photo);
        }

        info!(code_name = %code_name, "Updated participant");
        Ok(updated)
    }

    /// Evicts a participant. Eviction is permanent.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the participant does not exist, or
    /// `ConflictKind::AlreadyEvicted` if it was evicted earlier, including
    /// by a concurrent request.
    pub fn evict(&mut self, code_name: &CodeName) -> Result<Participant, CoreError> {
        let mut participant: Participant = require_participant(self.store, code_name)?;
        let evicted: ParticipantStatus = participant.status.evict(code_name)?;

        if !self.store.mark_evicted(participant.participant_id)? {
            return Err(CoreError::Conflict(ConflictKind::AlreadyEvicted {
                code_name: code_name.to_string(),
            }));
        }

        participant.status = evicted;
        info!(code_name = %code_name, "Evicted participant");
        Ok(participant)
    }

    /// Deletes a participant with all of its votes and returns how many
    /// votes were removed. The photo is removed from `media` after the
    /// cascade commits.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the participant does not exist.
    pub fn delete(
        &mut self,
        code_name: &CodeName,
        media: &dyn MediaStore,
    ) -> Result<usize, CoreError> {
        let participant: Participant = require_participant(self.store, code_name)?;
        let votes_removed: usize = self
            .store
            .delete_participant_cascade(participant.participant_id)?;

        if let Some(photo) = participant.photo.as_deref() {
            cleanup_photo(media, photo);
        }

        info!(code_name = %code_name, votes_removed, "Deleted participant");
        Ok(votes_removed)
    }
}
