// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request validation performed before any registry call.
//!
//! Each failure names the offending JSON field.

use contest_vote_domain::{
    CodeName, ContestPatch, DomainError, ParticipantPatch, parse_contest_date, validate_about,
    validate_email, validate_required, validate_vote_count,
};
use time::OffsetDateTime;

use crate::error::ApiError;
use crate::request_response::{
    CreateContestRequest, CreateParticipantRequest, RecordVoteRequest, UpdateContestRequest,
    UpdateParticipantRequest,
};

fn field_error(field: &str) -> impl FnOnce(DomainError) -> ApiError {
    move |err| ApiError::invalid(field, err.to_string())
}

fn parse_date(field: &str, raw: &str) -> Result<OffsetDateTime, ApiError> {
    parse_contest_date(raw).map_err(field_error(field))
}

/// A contest request whose name and dates have been checked and parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidContest {
    pub name: String,
    pub start_date: OffsetDateTime,
    pub end_date: OffsetDateTime,
}

/// # Errors
///
/// Returns `ApiError::InvalidInput` if the name is blank or a date does
/// not parse. Date ordering is checked by the registry.
pub fn validate_create_contest(request: &CreateContestRequest) -> Result<ValidContest, ApiError> {
    Ok(ValidContest {
        name: validate_required("name", &request.name).map_err(field_error("name"))?,
        start_date: parse_date("startDate", &request.start_date)?,
        end_date: parse_date("endDate", &request.end_date)?,
    })
}

/// Converts an update request into a patch, parsing any supplied dates.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if a supplied name is blank or a
/// supplied date does not parse.
pub fn validate_update_contest(request: &UpdateContestRequest) -> Result<ContestPatch, ApiError> {
    let name: Option<String> = request
        .name
        .as_deref()
        .map(|name| validate_required("name", name).map_err(field_error("name")))
        .transpose()?;
    let start_date: Option<OffsetDateTime> = request
        .start_date
        .as_deref()
        .map(|raw| parse_date("startDate", raw))
        .transpose()?;
    let end_date: Option<OffsetDateTime> = request
        .end_date
        .as_deref()
        .map(|raw| parse_date("endDate", raw))
        .transpose()?;

    Ok(ContestPatch {
        name,
        start_date,
        end_date,
    })
}

/// # Errors
///
/// Returns `ApiError::InvalidInput` if the name is blank, the email is
/// malformed, or the about text is shorter than the minimum.
pub fn validate_create_participant(request: &CreateParticipantRequest) -> Result<(), ApiError> {
    validate_required("fullName", &request.full_name).map_err(field_error("fullName"))?;
    validate_email(request.email.trim()).map_err(field_error("email"))?;
    validate_about(&request.about).map_err(field_error("about"))?;
    Ok(())
}

fn supplied(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Converts an update request into a patch.
///
/// Blank fields mean "unchanged" and are not validated; supplied values
/// follow the same rules as registration.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if a supplied email is malformed or a
/// supplied about text is too short.
pub fn validate_update_participant(
    request: &UpdateParticipantRequest,
) -> Result<ParticipantPatch, ApiError> {
    let email: Option<String> = supplied(request.email.as_deref());
    if let Some(email) = &email {
        validate_email(email).map_err(field_error("email"))?;
    }
    let about: Option<String> = supplied(request.about.as_deref());
    if let Some(about) = &about {
        validate_about(about).map_err(field_error("about"))?;
    }

    Ok(ParticipantPatch {
        full_name: supplied(request.full_name.as_deref()),
        email,
        about,
        photo: supplied(request.photo.as_deref()),
    })
}

/// Checks a paid-vote request and returns the target participant.
///
/// The voter email is only checked here. Votes have no email column, so
/// the value goes no further.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the code name or voter name is
/// blank, the count is below one, or a supplied voter email is malformed.
pub fn validate_record_vote(request: &RecordVoteRequest) -> Result<CodeName, ApiError> {
    let code_name: CodeName =
        CodeName::parse(&request.participant_code_name).map_err(field_error("participantCodeName"))?;
    validate_vote_count(request.vote_count).map_err(field_error("voteCount"))?;
    validate_required("voterName", &request.voter_name).map_err(field_error("voterName"))?;
    if let Some(email) = supplied(request.email.as_deref()) {
        validate_email(&email).map_err(field_error("email"))?;
    }
    Ok(code_name)
}
