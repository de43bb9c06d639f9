// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! JSON field names are camelCase. Dates travel as strings: requests accept
//! RFC 3339 timestamps or `YYYY-MM-DD`, responses always use RFC 3339.

use serde::{Deserialize, Serialize};

/// API request to create a contest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContestRequest {
    pub name: String,
    pub start_date: String,
    pub end_date: String,
}

/// API request to update a contest. Omitted fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContestRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestResponse {
    pub id: i64,
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub created_at: String,
}

/// Summary of a contest deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteContestResponse {
    pub contest_id: i64,
    pub participants_removed: usize,
    pub votes_removed: usize,
}

/// API request to register a participant.
///
/// `photo` is the URL of an image already uploaded to the media host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateParticipantRequest {
    pub full_name: String,
    pub email: String,
    pub about: String,
    #[serde(default)]
    pub photo: Option<String>,
}

/// API request to update a participant.
///
/// Omitted or blank fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateParticipantRequest {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantResponse {
    pub id: i64,
    pub code_name: String,
    pub full_name: String,
    pub email: String,
    pub about: String,
    pub photo: Option<String>,
    pub contest_id: i64,
    pub evicted: bool,
    pub created_at: String,
    /// Present only on single-participant reads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub votes: Option<Vec<VoteResponse>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteParticipantResponse {
    pub code_name: String,
    pub votes_removed: usize,
}

/// API request to record a paid vote.
///
/// The payment reference is trusted as given; verification with the
/// payment provider happens before this request is made.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordVoteRequest {
    pub participant_code_name: String,
    pub vote_count: i64,
    /// Voter contact sent by payment clients. Checked for shape when
    /// present, never stored.
    #[serde(default)]
    pub email: Option<String>,
    pub voter_name: String,
    #[serde(default)]
    pub payment_reference: Option<String>,
}

/// API request to add admin-issued votes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminVoteRequest {
    pub vote_count: i64,
    #[serde(default)]
    pub voter_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteResponse {
    pub id: i64,
    pub contest_id: i64,
    pub participant_id: i64,
    pub vote_count: u32,
    pub voter_name: String,
    pub payment_reference: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantResultResponse {
    pub code_name: String,
    pub name: String,
    pub total_votes: u64,
    pub evicted: bool,
}

/// Liveness check body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartbeatResponse {
    pub success: bool,
    pub message: String,
}

impl HeartbeatResponse {
    #[must_use]
    pub fn alive() -> Self {
        Self {
            success: true,
            message: String::from("Service is alive"),
        }
    }
}
