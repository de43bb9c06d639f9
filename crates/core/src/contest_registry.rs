// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::lookup::require_contest;
use crate::media::{MediaStore, cleanup_photo};
use crate::store::{ContestDeletion, ContestStore};
use contest_vote_domain::{Contest, ContestId, ContestPatch, NewContest};
use time::OffsetDateTime;
use tracing::{debug, info};

/// Create, read, update and delete operations for contests.
pub struct ContestRegistry<'a, S: ContestStore> {
    store: &'a mut S,
}

impl<'a, S: ContestStore> ContestRegistry<'a, S> {
    pub const fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    /// Creates a contest.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the name is blank or the start
    /// date is not strictly before the end date.
    pub fn create(
        &mut self,
        name: &str,
        start_date: OffsetDateTime,
        end_date: OffsetDateTime,
    ) -> Result<Contest, CoreError> {
        let new_contest: NewContest = NewContest::new(name, start_date, end_date)?;
        let contest: Contest = self.store.insert_contest(&new_contest)?;

        info!(
            contest_id = contest.contest_id.value(),
            name = %contest.name,
            "Created contest"
        );
        Ok(contest)
    }

    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn get(&mut self, contest_id: ContestId) -> Result<Option<Contest>, CoreError> {
        debug!(contest_id = contest_id.value(), "Looking up contest");
        Ok(self.store.find_contest(contest_id)?)
    }

    /// Lists all contests, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn list(&mut self) -> Result<Vec<Contest>, CoreError> {
        Ok(self.store.list_contests()?)
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the contest does not exist, or
    /// `CoreError::Validation` if the merged dates are out of order.
    pub fn update(
        &mut self,
        contest_id: ContestId,
        patch: &ContestPatch,
    ) -> Result<Contest, CoreError> {
        let existing: Contest = require_contest(self.store, contest_id)?;
        let merged: Contest = existing.apply(patch)?;
        let updated: Contest = self.store.update_contest(&merged)?;

        info!(contest_id = contest_id.value(), "Updated contest");
        Ok(updated)
    }

    /// Deletes a contest with all of its participants and votes.
    ///
    /// Participant photos are removed from `media` after the cascade
    /// commits.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the contest does not exist.
    pub fn delete(
        &mut self,
        contest_id: ContestId,
        media: &dyn MediaStore,
    ) -> Result<ContestDeletion, CoreError> {
        require_contest(self.store, contest_id)?;
        let deletion: ContestDeletion = self.store.delete_contest_cascade(contest_id)?;

        for url in &deletion.photos {
            cleanup_photo(media, url);
        }

        info!(
            contest_id = contest_id.value(),
            participants_removed = deletion.participants_removed,
            votes_removed = deletion.votes_removed,
            "Deleted contest"
        );
        Ok(deletion)
    }
}
