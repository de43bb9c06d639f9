// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use std::sync::Mutex;

use contest_vote::{MediaError, MediaStore};
use contest_vote_persistence::Persistence;

use crate::{
    ContestResponse, CreateContestRequest, CreateParticipantRequest, ParticipantResponse,
    RecordVoteRequest, create_contest, create_participant,
};

pub const VALID_ABOUT: &str =
    "Loves long walks, loud music and winning every single contest entered so far.";

/// Media host that remembers which photos it was asked to delete.
#[derive(Debug, Default)]
pub struct RecordingMediaStore {
    pub deleted: Mutex<Vec<String>>,
}

impl RecordingMediaStore {
    pub fn deleted_urls(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

impl MediaStore for RecordingMediaStore {
    fn delete_by_url(&self, url: &str) -> Result<(), MediaError> {
        self.deleted.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().unwrap()
}

pub fn create_contest_request(name: &str) -> CreateContestRequest {
    CreateContestRequest {
        name: name.to_string(),
        start_date: String::from("2026-03-01"),
        end_date: String::from("2026-03-31T23:59:00Z"),
    }
}

pub fn create_participant_request(email: &str, photo: Option<&str>) -> CreateParticipantRequest {
    CreateParticipantRequest {
        full_name: String::from("Ada Obi"),
        email: email.to_string(),
        about: VALID_ABOUT.to_string(),
        photo: photo.map(str::to_string),
    }
}

pub fn vote_request(code_name: &str, vote_count: i64, reference: Option<&str>) -> RecordVoteRequest {
    RecordVoteRequest {
        participant_code_name: code_name.to_string(),
        vote_count,
        email: None,
        voter_name: String::from("Fan"),
        payment_reference: reference.map(str::to_string),
    }
}

pub fn create_test_contest(persistence: &mut Persistence) -> ContestResponse {
    create_contest(persistence, &create_contest_request("Summer Search")).unwrap()
}

pub fn create_test_participant(
    persistence: &mut Persistence,
    contest: &ContestResponse,
    email: &str,
) -> ParticipantResponse {
    create_participant(
        persistence,
        &contest.id.to_string(),
        &create_participant_request(email, None),
    )
    .unwrap()
}
