// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use contest_vote_persistence::Persistence;

use crate::{
    AdminVoteRequest, ApiError, ContestResponse, ParticipantResponse, ParticipantResultResponse,
    RecordVoteRequest, VoteResponse, add_admin_vote, evict_participant, get_results, record_vote,
};

use super::helpers::{
    create_test_contest, create_test_participant, create_test_persistence, vote_request,
};

fn setup() -> (Persistence, ContestResponse, ParticipantResponse, ParticipantResponse) {
    let mut persistence: Persistence = create_test_persistence();
    let contest: ContestResponse = create_test_contest(&mut persistence);
    let a: ParticipantResponse =
        create_test_participant(&mut persistence, &contest, "a@example.com");
    let b: ParticipantResponse =
        create_test_participant(&mut persistence, &contest, "b@example.com");
    (persistence, contest, a, b)
}

#[test]
fn test_record_vote_returns_stored_vote() {
    let (mut persistence, contest, a, _b) = setup();

    let vote: VoteResponse = record_vote(
        &mut persistence,
        &contest.id.to_string(),
        &vote_request(&a.code_name, 5, Some("PAY-001")),
    )
    .unwrap();

    assert_eq!(vote.contest_id, contest.id);
    assert_eq!(vote.participant_id, a.id);
    assert_eq!(vote.vote_count, 5);
    assert_eq!(vote.payment_reference.as_deref(), Some("PAY-001"));
}

#[test]
fn test_blank_payment_reference_is_stored_as_none() {
    let (mut persistence, contest, a, _b) = setup();
    let contest_id: String = contest.id.to_string();

    let first: VoteResponse =
        record_vote(&mut persistence, &contest_id, &vote_request(&a.code_name, 1, Some(" ")))
            .unwrap();
    let second: VoteResponse =
        record_vote(&mut persistence, &contest_id, &vote_request(&a.code_name, 2, Some("")))
            .unwrap();

    assert_eq!(first.payment_reference, None);
    assert_eq!(second.payment_reference, None);
}

#[test]
fn test_results_total_votes_per_participant() {
    let (mut persistence, contest, a, b) = setup();
    let contest_id: String = contest.id.to_string();

    record_vote(&mut persistence, &contest_id, &vote_request(&a.code_name, 5, Some("T-1"))).unwrap();
    record_vote(&mut persistence, &contest_id, &vote_request(&a.code_name, 2, Some("T-2"))).unwrap();
    record_vote(&mut persistence, &contest_id, &vote_request(&b.code_name, 1, None)).unwrap();

    let results: Vec<ParticipantResultResponse> =
        get_results(&mut persistence, &contest_id).unwrap();
    assert_eq!(results.len(), 2);
    let total_for = |code: &str| {
        results
            .iter()
            .find(|r| r.code_name == code)
            .map(|r| r.total_votes)
    };
    assert_eq!(total_for(&a.code_name), Some(7));
    assert_eq!(total_for(&b.code_name), Some(1));
}

#[test]
fn test_duplicate_payment_reference_is_conflict() {
    let (mut persistence, contest, a, b) = setup();
    let contest_id: String = contest.id.to_string();
    record_vote(&mut persistence, &contest_id, &vote_request(&a.code_name, 5, Some("T-1"))).unwrap();

    let result: Result<VoteResponse, ApiError> =
        record_vote(&mut persistence, &contest_id, &vote_request(&b.code_name, 5, Some("T-1")));
    assert!(matches!(
        result,
        Err(ApiError::Conflict { ref rule, .. }) if rule == "unique_payment_reference"
    ));
}

#[test]
fn test_vote_for_evicted_participant_is_conflict() {
    let (mut persistence, contest, a, _b) = setup();
    evict_participant(&mut persistence, &a.code_name).unwrap();

    let result: Result<VoteResponse, ApiError> = record_vote(
        &mut persistence,
        &contest.id.to_string(),
        &vote_request(&a.code_name, 1, None),
    );
    assert!(matches!(
        result,
        Err(ApiError::Conflict { ref rule, .. }) if rule == "participant_evicted"
    ));
}

#[test]
fn test_record_vote_validates_request_fields() {
    let (mut persistence, contest, a, _b) = setup();
    let contest_id: String = contest.id.to_string();

    let zero: Result<VoteResponse, ApiError> =
        record_vote(&mut persistence, &contest_id, &vote_request(&a.code_name, 0, None));
    assert!(matches!(
        zero,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "voteCount"
    ));

    let bad_email: RecordVoteRequest = RecordVoteRequest {
        email: Some(String::from("fan-at-example")),
        ..vote_request(&a.code_name, 1, None)
    };
    let result: Result<VoteResponse, ApiError> =
        record_vote(&mut persistence, &contest_id, &bad_email);
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "email"
    ));

    let no_voter: RecordVoteRequest = RecordVoteRequest {
        voter_name: String::from(" "),
        ..vote_request(&a.code_name, 1, None)
    };
    let result: Result<VoteResponse, ApiError> =
        record_vote(&mut persistence, &contest_id, &no_voter);
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "voterName"
    ));
}

#[test]
fn test_vote_for_unknown_code_name_is_not_found() {
    let (mut persistence, contest, _a, _b) = setup();
    let result: Result<VoteResponse, ApiError> = record_vote(
        &mut persistence,
        &contest.id.to_string(),
        &vote_request("CW777", 1, None),
    );
    assert!(matches!(
        result,
        Err(ApiError::ResourceNotFound { ref resource_type, .. }) if resource_type == "Participant"
    ));
}

#[test]
fn test_admin_vote_uses_synthesized_reference() {
    let (mut persistence, contest, a, _b) = setup();
    let request: AdminVoteRequest = AdminVoteRequest {
        vote_count: 10,
        voter_name: Some(String::from("Ops")),
    };

    let vote: VoteResponse =
        add_admin_vote(&mut persistence, &contest.id.to_string(), &a.code_name, &request).unwrap();
    assert_eq!(vote.voter_name, "Ops");
    assert!(vote.payment_reference.unwrap().starts_with("VOTE_"));
}

#[test]
fn test_results_for_missing_contest_is_not_found() {
    let mut persistence: Persistence = create_test_persistence();
    let result: Result<Vec<ParticipantResultResponse>, ApiError> =
        get_results(&mut persistence, "12");
    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}
