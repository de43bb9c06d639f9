// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::store::ContestStore;
use contest_vote_domain::{CodeName, Contest, ContestId, Participant};

pub fn require_contest<S: ContestStore>(
    store: &mut S,
    contest_id: ContestId,
) -> Result<Contest, CoreError> {
    store
        .find_contest(contest_id)?
        .ok_or_else(|| CoreError::contest_not_found(contest_id))
}

pub fn require_participant<S: ContestStore>(
    store: &mut S,
    code_name: &CodeName,
) -> Result<Participant, CoreError> {
    store
        .find_participant(code_name)?
        .ok_or_else(|| CoreError::participant_not_found(code_name))
}

/// A participant that exists under a different contest is reported as absent.
pub fn require_participant_in_contest<S: ContestStore>(
    store: &mut S,
    contest_id: ContestId,
    code_name: &CodeName,
) -> Result<Participant, CoreError> {
    store
        .find_participant(code_name)?
        .filter(|participant| participant.contest_id == contest_id)
        .ok_or_else(|| {
            CoreError::participant_not_found(format!("{code_name} in contest {contest_id}"))
        })
}
