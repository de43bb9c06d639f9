// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod initialization_tests;

use contest_vote_domain::{
    CodeName, Contest, ContestId, NewContest, NewParticipant, NewVote, Participant,
    PaymentReference, Vote,
};
use time::OffsetDateTime;
use time::macros::datetime;

use crate::Persistence;

pub const VALID_ABOUT: &str =
    "Former lifeguard who now teaches swimming to children on weekends and holidays.";

pub fn create_test_start_date() -> OffsetDateTime {
    datetime!(2026-03-01 0:00 UTC)
}

pub fn create_test_end_date() -> OffsetDateTime {
    datetime!(2026-03-31 23:59 UTC)
}

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database should initialize")
}

pub fn create_test_contest(persistence: &mut Persistence, name: &str) -> Contest {
    let contest: NewContest =
        NewContest::new(name, create_test_start_date(), create_test_end_date()).unwrap();
    persistence.create_contest(&contest).unwrap()
}

pub fn create_test_participant(
    persistence: &mut Persistence,
    contest_id: ContestId,
    sequence: u32,
    email: &str,
    photo: Option<&str>,
) -> Participant {
    let participant: NewParticipant =
        NewParticipant::new("Test Participant", email, VALID_ABOUT, photo).unwrap();
    persistence
        .create_participant(contest_id, &CodeName::from_sequence(sequence), &participant)
        .unwrap()
}

pub fn create_test_vote(
    persistence: &mut Persistence,
    participant: &Participant,
    vote_count: i64,
    reference: Option<&str>,
) -> Vote {
    let reference: Option<PaymentReference> =
        reference.map(|r| PaymentReference::parse(r).unwrap());
    let vote: NewVote = NewVote::new(
        participant.contest_id,
        participant.participant_id,
        vote_count,
        "Test Voter",
        reference,
    )
    .unwrap();
    persistence.create_vote(&vote).unwrap()
}
