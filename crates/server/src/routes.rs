// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP handlers and the router.
//!
//! Each handler locks the shared persistence for the duration of one API
//! call and maps [`contest_vote_api::ApiError`] onto a status code through
//! [`HttpError`].

use axum::{
    Json, Router,
    extract::{Path, State as AxumState, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, patch, post, put},
};
use contest_vote_api::{
    AdminVoteRequest, ContestResponse, CreateContestRequest, CreateParticipantRequest,
    DeleteContestResponse, DeleteParticipantResponse, HeartbeatResponse, ParticipantResponse,
    ParticipantResultResponse, RecordVoteRequest, UpdateContestRequest, UpdateParticipantRequest,
    VoteResponse, add_admin_vote, create_contest, create_participant, delete_contest,
    delete_participant, evict_participant, get_contest_participant, get_participant, get_results,
    list_contests, list_participants, record_vote, update_contest, update_participant,
};
use tracing::{debug, info};

use crate::AppState;
use crate::error::HttpError;

/// Unwraps a JSON body, turning a malformed payload into a 400.
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, HttpError> {
    payload.map(|Json(body)| body).map_err(|rejection| HttpError {
        status: StatusCode::BAD_REQUEST,
        message: rejection.body_text(),
    })
}

// ============================================================================
// Contests
// ============================================================================

/// Handler for GET `/contests`.
async fn handle_list_contests(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<ContestResponse>>, HttpError> {
    debug!("Handling list_contests request");

    let mut persistence = app_state.persistence.lock().await;
    let contests: Vec<ContestResponse> = list_contests(&mut *persistence)?;
    drop(persistence);

    Ok(Json(contests))
}

/// Handler for POST `/contests`.
async fn handle_create_contest(
    AxumState(app_state): AxumState<AppState>,
    payload: Result<Json<CreateContestRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ContestResponse>), HttpError> {
    let req: CreateContestRequest = json_body(payload)?;
    info!(name = %req.name, "Handling create_contest request");

    let mut persistence = app_state.persistence.lock().await;
    let contest: ContestResponse = create_contest(&mut *persistence, &req)?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(contest)))
}

/// Handler for PUT `/contests/{contest_id}`.
async fn handle_update_contest(
    AxumState(app_state): AxumState<AppState>,
    Path(contest_id): Path<String>,
    payload: Result<Json<UpdateContestRequest>, JsonRejection>,
) -> Result<Json<ContestResponse>, HttpError> {
    let req: UpdateContestRequest = json_body(payload)?;
    info!(contest_id = %contest_id, "Handling update_contest request");

    let mut persistence = app_state.persistence.lock().await;
    let contest: ContestResponse = update_contest(&mut *persistence, &contest_id, &req)?;
    drop(persistence);

    Ok(Json(contest))
}

/// Handler for DELETE `/contests/{contest_id}`.
async fn handle_delete_contest(
    AxumState(app_state): AxumState<AppState>,
    Path(contest_id): Path<String>,
) -> Result<StatusCode, HttpError> {
    info!(contest_id = %contest_id, "Handling delete_contest request");

    let mut persistence = app_state.persistence.lock().await;
    let deletion: DeleteContestResponse =
        delete_contest(&mut *persistence, app_state.media.as_ref(), &contest_id)?;
    drop(persistence);

    debug!(
        participants_removed = deletion.participants_removed,
        votes_removed = deletion.votes_removed,
        "Contest delete complete"
    );
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Participants
// ============================================================================

/// Handler for GET `/contests/{contest_id}/participants`.
async fn handle_list_participants(
    AxumState(app_state): AxumState<AppState>,
    Path(contest_id): Path<String>,
) -> Result<Json<Vec<ParticipantResponse>>, HttpError> {
    debug!(contest_id = %contest_id, "Handling list_participants request");

    let mut persistence = app_state.persistence.lock().await;
    let participants: Vec<ParticipantResponse> = list_participants(&mut *persistence, &contest_id)?;
    drop(persistence);

    Ok(Json(participants))
}

/// Handler for GET `/contests/{contest_id}/participants/{code_name}`.
async fn handle_get_contest_participant(
    AxumState(app_state): AxumState<AppState>,
    Path((contest_id, code_name)): Path<(String, String)>,
) -> Result<Json<ParticipantResponse>, HttpError> {
    debug!(contest_id = %contest_id, code_name = %code_name, "Handling get_contest_participant request");

    let mut persistence = app_state.persistence.lock().await;
    let participant: ParticipantResponse =
        get_contest_participant(&mut *persistence, &contest_id, &code_name)?;
    drop(persistence);

    Ok(Json(participant))
}

/// Handler for POST `/contests/{contest_id}/participants`.
async fn handle_create_participant(
    AxumState(app_state): AxumState<AppState>,
    Path(contest_id): Path<String>,
    payload: Result<Json<CreateParticipantRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ParticipantResponse>), HttpError> {
    let req: CreateParticipantRequest = json_body(payload)?;
    info!(contest_id = %contest_id, "Handling create_participant request");

    let mut persistence = app_state.persistence.lock().await;
    let participant: ParticipantResponse =
        create_participant(&mut *persistence, &contest_id, &req)?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(participant)))
}

/// Handler for GET `/contests/participants/{code_name}`.
async fn handle_get_participant(
    AxumState(app_state): AxumState<AppState>,
    Path(code_name): Path<String>,
) -> Result<Json<ParticipantResponse>, HttpError> {
    debug!(code_name = %code_name, "Handling get_participant request");

    let mut persistence = app_state.persistence.lock().await;
    let participant: ParticipantResponse = get_participant(&mut *persistence, &code_name)?;
    drop(persistence);

    Ok(Json(participant))
}

/// Handler for PUT `/contests/participants/{code_name}`.
async fn handle_update_participant(
    AxumState(app_state): AxumState<AppState>,
    Path(code_name): Path<String>,
    payload: Result<Json<UpdateParticipantRequest>, JsonRejection>,
) -> Result<Json<ParticipantResponse>, HttpError> {
    let req: UpdateParticipantRequest = json_body(payload)?;
    info!(code_name = %code_name, "Handling update_participant request");

    let mut persistence = app_state.persistence.lock().await;
    let participant: ParticipantResponse = update_participant(
        &mut *persistence,
        app_state.media.as_ref(),
        &code_name,
        &req,
    )?;
    drop(persistence);

    Ok(Json(participant))
}

/// Handler for DELETE `/contests/participants/{code_name}`.
async fn handle_delete_participant(
    AxumState(app_state): AxumState<AppState>,
    Path(code_name): Path<String>,
) -> Result<StatusCode, HttpError> {
    info!(code_name = %code_name, "Handling delete_participant request");

    let mut persistence = app_state.persistence.lock().await;
    let deletion: DeleteParticipantResponse =
        delete_participant(&mut *persistence, app_state.media.as_ref(), &code_name)?;
    drop(persistence);

    debug!(votes_removed = deletion.votes_removed, "Participant delete complete");
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for PATCH `/contests/participants/evict/{code_name}`.
async fn handle_evict_participant(
    AxumState(app_state): AxumState<AppState>,
    Path(code_name): Path<String>,
) -> Result<Json<ParticipantResponse>, HttpError> {
    info!(code_name = %code_name, "Handling evict_participant request");

    let mut persistence = app_state.persistence.lock().await;
    let participant: ParticipantResponse = evict_participant(&mut *persistence, &code_name)?;
    drop(persistence);

    Ok(Json(participant))
}

// ============================================================================
// Votes
// ============================================================================

/// Handler for POST `/contests/{contest_id}/votes`.
async fn handle_record_vote(
    AxumState(app_state): AxumState<AppState>,
    Path(contest_id): Path<String>,
    payload: Result<Json<RecordVoteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<VoteResponse>), HttpError> {
    let req: RecordVoteRequest = json_body(payload)?;
    info!(
        contest_id = %contest_id,
        code_name = %req.participant_code_name,
        vote_count = req.vote_count,
        "Handling record_vote request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let vote: VoteResponse = record_vote(&mut *persistence, &contest_id, &req)?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(vote)))
}

/// Handler for POST `/contests/{contest_id}/participants/{code_name}/votes`.
async fn handle_add_admin_vote(
    AxumState(app_state): AxumState<AppState>,
    Path((contest_id, code_name)): Path<(String, String)>,
    payload: Result<Json<AdminVoteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<VoteResponse>), HttpError> {
    let req: AdminVoteRequest = json_body(payload)?;
    info!(
        contest_id = %contest_id,
        code_name = %code_name,
        vote_count = req.vote_count,
        "Handling add_admin_vote request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let vote: VoteResponse = add_admin_vote(&mut *persistence, &contest_id, &code_name, &req)?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(vote)))
}

/// Handler for GET `/contests/{contest_id}/results`.
async fn handle_get_results(
    AxumState(app_state): AxumState<AppState>,
    Path(contest_id): Path<String>,
) -> Result<Json<Vec<ParticipantResultResponse>>, HttpError> {
    debug!(contest_id = %contest_id, "Handling get_results request");

    let mut persistence = app_state.persistence.lock().await;
    let results: Vec<ParticipantResultResponse> = get_results(&mut *persistence, &contest_id)?;
    drop(persistence);

    Ok(Json(results))
}

/// Handler for GET `/heartbeat-endpoint`.
async fn handle_heartbeat() -> Json<HeartbeatResponse> {
    Json(HeartbeatResponse::alive())
}

pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/contests",
            get(handle_list_contests).post(handle_create_contest),
        )
        .route(
            "/contests/{contest_id}",
            put(handle_update_contest).delete(handle_delete_contest),
        )
        .route(
            "/contests/{contest_id}/participants",
            get(handle_list_participants).post(handle_create_participant),
        )
        .route(
            "/contests/{contest_id}/participants/{code_name}",
            get(handle_get_contest_participant),
        )
        .route(
            "/contests/{contest_id}/participants/{code_name}/votes",
            post(handle_add_admin_vote),
        )
        .route("/contests/{contest_id}/votes", post(handle_record_vote))
        .route("/contests/{contest_id}/results", get(handle_get_results))
        .route(
            "/contests/participants/{code_name}",
            get(handle_get_participant)
                .put(handle_update_participant)
                .delete(handle_delete_participant),
        )
        .route(
            "/contests/participants/evict/{code_name}",
            patch(handle_evict_participant),
        )
        .route("/heartbeat-endpoint", get(handle_heartbeat))
        .with_state(app_state)
}
