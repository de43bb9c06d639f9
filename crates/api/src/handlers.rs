// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handlers.
//!
//! Each handler parses raw path identifiers, validates the request body,
//! runs one registry or ledger operation, and converts the result into a
//! response DTO. Handlers are generic over the store so they can run
//! against any [`ContestStore`].

use contest_vote::{
    ContestDeletion, ContestRegistry, ContestStore, MediaStore, ParticipantDetails,
    ParticipantRegistry, VoteLedger,
};
use contest_vote_domain::{
    CodeName, Contest, ContestId, ContestPatch, Participant, ParticipantPatch, ParticipantResult,
    Vote,
};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::debug;

use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::request_response::{
    AdminVoteRequest, ContestResponse, CreateContestRequest, CreateParticipantRequest,
    DeleteContestResponse, DeleteParticipantResponse, ParticipantResponse,
    ParticipantResultResponse, RecordVoteRequest, UpdateContestRequest, UpdateParticipantRequest,
    VoteResponse,
};
use crate::validation::{
    ValidContest, validate_create_contest, validate_create_participant, validate_record_vote,
    validate_update_contest, validate_update_participant,
};

// ============================================================================
// Conversions
// ============================================================================

fn format_date(value: OffsetDateTime) -> Result<String, ApiError> {
    value.format(&Rfc3339).map_err(|e| ApiError::Internal {
        message: format!("Failed to format date: {e}"),
    })
}

fn parse_contest_id(raw: &str) -> Result<ContestId, ApiError> {
    ContestId::parse(raw).map_err(translate_domain_error)
}

fn parse_code_name(raw: &str) -> Result<CodeName, ApiError> {
    CodeName::parse(raw).map_err(translate_domain_error)
}

fn participant_not_found(code_name: &CodeName) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: String::from("Participant"),
        message: code_name.to_string(),
    }
}

fn to_contest_response(contest: &Contest) -> Result<ContestResponse, ApiError> {
    Ok(ContestResponse {
        id: contest.contest_id.value(),
        name: contest.name.clone(),
        start_date: format_date(contest.start_date)?,
        end_date: format_date(contest.end_date)?,
        created_at: contest.created_at.clone(),
    })
}

fn to_vote_response(vote: Vote) -> VoteResponse {
    VoteResponse {
        id: vote.vote_id,
        contest_id: vote.contest_id.value(),
        participant_id: vote.participant_id,
        vote_count: vote.vote_count,
        voter_name: vote.voter_name,
        payment_reference: vote.payment_reference,
        created_at: vote.created_at,
    }
}

fn to_participant_response(
    participant: Participant,
    votes: Option<Vec<Vote>>,
) -> ParticipantResponse {
    let evicted: bool = participant.is_evicted();
    ParticipantResponse {
        id: participant.participant_id,
        code_name: participant.code_name.to_string(),
        full_name: participant.full_name,
        email: participant.email,
        about: participant.about,
        photo: participant.photo,
        contest_id: participant.contest_id.value(),
        evicted,
        created_at: participant.created_at,
        votes: votes.map(|votes| votes.into_iter().map(to_vote_response).collect()),
    }
}

fn to_result_response(result: ParticipantResult) -> ParticipantResultResponse {
    ParticipantResultResponse {
        code_name: result.code_name.to_string(),
        name: result.name,
        total_votes: result.total_votes,
        evicted: result.evicted,
    }
}

// ============================================================================
// Contests
// ============================================================================

/// Lists every contest, newest first.
///
/// # Errors
///
/// Returns `ApiError::Internal` if the store fails.
pub fn list_contests<S: ContestStore>(
    store: &mut S,
) -> Result<Vec<ContestResponse>, ApiError> {
    let contests: Vec<Contest> = ContestRegistry::new(store)
        .list()
        .map_err(translate_core_error)?;
    contests.iter().map(to_contest_response).collect()
}

/// Creates a contest.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the name is blank, a date does not
/// parse, or the start date is not before the end date.
pub fn create_contest<S: ContestStore>(
    store: &mut S,
    request: &CreateContestRequest,
) -> Result<ContestResponse, ApiError> {
    let valid: ValidContest = validate_create_contest(request)?;
    let contest: Contest = ContestRegistry::new(store)
        .create(&valid.name, valid.start_date, valid.end_date)
        .map_err(translate_core_error)?;
    to_contest_response(&contest)
}

/// Applies a partial update to a contest.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for a malformed id or body, or
/// `ApiError::ResourceNotFound` if the contest does not exist.
pub fn update_contest<S: ContestStore>(
    store: &mut S,
    contest_id: &str,
    request: &UpdateContestRequest,
) -> Result<ContestResponse, ApiError> {
    let contest_id: ContestId = parse_contest_id(contest_id)?;
    let patch: ContestPatch = validate_update_contest(request)?;
    let contest: Contest = ContestRegistry::new(store)
        .update(contest_id, &patch)
        .map_err(translate_core_error)?;
    to_contest_response(&contest)
}

/// Deletes a contest with its participants and votes.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the contest does not exist.
pub fn delete_contest<S: ContestStore>(
    store: &mut S,
    media: &dyn MediaStore,
    contest_id: &str,
) -> Result<DeleteContestResponse, ApiError> {
    let contest_id: ContestId = parse_contest_id(contest_id)?;
    let deletion: ContestDeletion = ContestRegistry::new(store)
        .delete(contest_id, media)
        .map_err(translate_core_error)?;

    Ok(DeleteContestResponse {
        contest_id: contest_id.value(),
        participants_removed: deletion.participants_removed,
        votes_removed: deletion.votes_removed,
    })
}

// ============================================================================
// Participants
// ============================================================================

/// Lists a contest's participants.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the contest does not exist.
pub fn list_participants<S: ContestStore>(
    store: &mut S,
    contest_id: &str,
) -> Result<Vec<ParticipantResponse>, ApiError> {
    let contest_id: ContestId = parse_contest_id(contest_id)?;
    let participants: Vec<Participant> = ParticipantRegistry::new(store)
        .list_by_contest(contest_id)
        .map_err(translate_core_error)?;

    Ok(participants
        .into_iter()
        .map(|participant| to_participant_response(participant, None))
        .collect())
}

/// Returns a participant of a specific contest, with its votes.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the contest does not exist or
/// the participant is not part of it.
pub fn get_contest_participant<S: ContestStore>(
    store: &mut S,
    contest_id: &str,
    code_name: &str,
) -> Result<ParticipantResponse, ApiError> {
    let contest_id: ContestId = parse_contest_id(contest_id)?;
    let code_name: CodeName = parse_code_name(code_name)?;

    if ContestRegistry::new(store)
        .get(contest_id)
        .map_err(translate_core_error)?
        .is_none()
    {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Contest"),
            message: contest_id.to_string(),
        });
    }

    let mut registry = ParticipantRegistry::new(store);
    let participant: Participant = registry
        .get_by_contest_and_code_name(contest_id, &code_name)
        .map_err(translate_core_error)?
        .ok_or_else(|| participant_not_found(&code_name))?;
    let details: ParticipantDetails = registry
        .get_with_votes(&participant.code_name)
        .map_err(translate_core_error)?
        .ok_or_else(|| participant_not_found(&code_name))?;

    Ok(to_participant_response(details.participant, Some(details.votes)))
}

/// Returns a participant by code name, with its votes.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if no participant has this code
/// name.
pub fn get_participant<S: ContestStore>(
    store: &mut S,
    code_name: &str,
) -> Result<ParticipantResponse, ApiError> {
    let code_name: CodeName = parse_code_name(code_name)?;
    let details: ParticipantDetails = ParticipantRegistry::new(store)
        .get_with_votes(&code_name)
        .map_err(translate_core_error)?
        .ok_or_else(|| participant_not_found(&code_name))?;

    Ok(to_participant_response(details.participant, Some(details.votes)))
}

/// Registers a participant in a contest.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for an invalid body,
/// `ApiError::ResourceNotFound` if the contest does not exist, or
/// `ApiError::Conflict` on a duplicate email or code name.
pub fn create_participant<S: ContestStore>(
    store: &mut S,
    contest_id: &str,
    request: &CreateParticipantRequest,
) -> Result<ParticipantResponse, ApiError> {
    let contest_id: ContestId = parse_contest_id(contest_id)?;
    validate_create_participant(request)?;

    let participant: Participant = ParticipantRegistry::new(store)
        .create(
            contest_id,
            &request.full_name,
            &request.email,
            &request.about,
            request.photo.as_deref(),
        )
        .map_err(translate_core_error)?;

    Ok(to_participant_response(participant, None))
}

/// Applies a partial update to a participant.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the participant does not exist,
/// or `ApiError::Conflict` if the new email is taken.
pub fn update_participant<S: ContestStore>(
    store: &mut S,
    media: &dyn MediaStore,
    code_name: &str,
    request: &UpdateParticipantRequest,
) -> Result<ParticipantResponse, ApiError> {
    let code_name: CodeName = parse_code_name(code_name)?;
    let patch: ParticipantPatch = validate_update_participant(request)?;

    let participant: Participant = ParticipantRegistry::new(store)
        .update(&code_name, &patch, media)
        .map_err(translate_core_error)?;

    Ok(to_participant_response(participant, None))
}

/// Deletes a participant and its votes.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the participant does not exist.
pub fn delete_participant<S: ContestStore>(
    store: &mut S,
    media: &dyn MediaStore,
    code_name: &str,
) -> Result<DeleteParticipantResponse, ApiError> {
    let code_name: CodeName = parse_code_name(code_name)?;
    let votes_removed: usize = ParticipantRegistry::new(store)
        .delete(&code_name, media)
        .map_err(translate_core_error)?;

    Ok(DeleteParticipantResponse {
        code_name: code_name.to_string(),
        votes_removed,
    })
}

/// Evicts a participant.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the participant does not exist,
/// or `ApiError::Conflict` if it is already evicted.
pub fn evict_participant<S: ContestStore>(
    store: &mut S,
    code_name: &str,
) -> Result<ParticipantResponse, ApiError> {
    let code_name: CodeName = parse_code_name(code_name)?;
    let participant: Participant = ParticipantRegistry::new(store)
        .evict(&code_name)
        .map_err(translate_core_error)?;

    Ok(to_participant_response(participant, None))
}

// ============================================================================
// Votes
// ============================================================================

/// Records a paid vote.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for an invalid body,
/// `ApiError::ResourceNotFound` if the contest or participant is missing,
/// or `ApiError::Conflict` if the participant is evicted or the payment
/// reference was already used.
pub fn record_vote<S: ContestStore>(
    store: &mut S,
    contest_id: &str,
    request: &RecordVoteRequest,
) -> Result<VoteResponse, ApiError> {
    let contest_id: ContestId = parse_contest_id(contest_id)?;
    let code_name: CodeName = validate_record_vote(request)?;
    debug!(
        code_name = %code_name,
        has_reference = request.payment_reference.is_some(),
        "Validated paid vote request"
    );

    let vote: Vote = VoteLedger::new(store)
        .record_vote(
            contest_id,
            &code_name,
            request.vote_count,
            &request.voter_name,
            request.payment_reference.as_deref(),
        )
        .map_err(translate_core_error)?;

    Ok(to_vote_response(vote))
}

/// Adds admin-issued votes, which need no payment reference.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the count is below one,
/// `ApiError::ResourceNotFound` if the contest or participant is missing,
/// or `ApiError::Conflict` if the participant is evicted.
pub fn add_admin_vote<S: ContestStore>(
    store: &mut S,
    contest_id: &str,
    code_name: &str,
    request: &AdminVoteRequest,
) -> Result<VoteResponse, ApiError> {
    let contest_id: ContestId = parse_contest_id(contest_id)?;
    let code_name: CodeName = parse_code_name(code_name)?;

    let vote: Vote = VoteLedger::new(store)
        .add_admin_vote(
            contest_id,
            &code_name,
            request.vote_count,
            request.voter_name.as_deref(),
        )
        .map_err(translate_core_error)?;

    Ok(to_vote_response(vote))
}

/// Returns vote totals for every participant of a contest.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the contest does not exist.
pub fn get_results<S: ContestStore>(
    store: &mut S,
    contest_id: &str,
) -> Result<Vec<ParticipantResultResponse>, ApiError> {
    let contest_id: ContestId = parse_contest_id(contest_id)?;
    let results: Vec<ParticipantResult> = VoteLedger::new(store)
        .results(contest_id)
        .map_err(translate_core_error)?;

    Ok(results.into_iter().map(to_result_response).collect())
}
