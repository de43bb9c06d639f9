// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the contest vote backend.
//!
//! This crate owns the JSON contract: request and response DTOs, request
//! validation, and the translation of domain and core errors into
//! [`ApiError`]. It is transport-agnostic; the server crate maps
//! [`ApiError`] variants onto HTTP status codes.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod handlers;
mod request_response;
mod validation;

#[cfg(test)]
mod tests;

pub use error::{ApiError, translate_core_error, translate_domain_error};
pub use handlers::{
    add_admin_vote, create_contest, create_participant, delete_contest, delete_participant,
    evict_participant, get_contest_participant, get_participant, get_results, list_contests,
    list_participants, record_vote, update_contest, update_participant,
};
pub use request_response::{
    AdminVoteRequest, ContestResponse, CreateContestRequest, CreateParticipantRequest,
    DeleteContestResponse, DeleteParticipantResponse, HeartbeatResponse, ParticipantResponse,
    ParticipantResultResponse, RecordVoteRequest, UpdateContestRequest, UpdateParticipantRequest,
    VoteResponse,
};
pub use validation::{
    ValidContest, validate_create_contest, validate_create_participant, validate_record_vote,
    validate_update_contest, validate_update_participant,
};
