// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and their conversion into domain records.

use contest_vote_domain::{
    CodeName, Contest, ContestId, Participant, ParticipantStatus, Vote,
};
use diesel::prelude::*;
use num_traits::ToPrimitive;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::diesel_schema::{contests, participants, votes};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = contests)]
pub struct ContestRow {
    pub contest_id: i64,
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub created_at: String,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = participants)]
pub struct ParticipantRow {
    pub participant_id: i64,
    pub contest_id: i64,
    pub code_name: String,
    pub full_name: String,
    pub email: String,
    pub about: String,
    pub photo: Option<String>,
    pub evicted: i32,
    pub created_at: String,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = votes)]
pub struct VoteRow {
    pub vote_id: i64,
    pub contest_id: i64,
    pub participant_id: i64,
    pub vote_count: i64,
    pub voter_name: String,
    pub payment_reference: Option<String>,
    pub created_at: String,
}

/// Formats a timestamp the way every date column is stored.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be represented as RFC 3339.
pub fn format_timestamp(value: OffsetDateTime) -> Result<String, PersistenceError> {
    value
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::InvalidStoredValue(format!("timestamp: {e}")))
}

/// The current UTC time, formatted for storage.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be formatted.
pub fn now_timestamp() -> Result<String, PersistenceError> {
    format_timestamp(OffsetDateTime::now_utc())
}

fn parse_timestamp(column: &str, value: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(value, &Rfc3339)
        .map_err(|e| PersistenceError::InvalidStoredValue(format!("{column} '{value}': {e}")))
}

/// Converts a stored vote count into its domain width.
///
/// # Errors
///
/// Returns an error if the stored value is negative or too large.
pub fn vote_count_from_row(value: i64) -> Result<u32, PersistenceError> {
    value.to_u32().ok_or_else(|| {
        PersistenceError::InvalidStoredValue(format!("vote_count {value} out of range"))
    })
}

impl ContestRow {
    /// # Errors
    ///
    /// Returns an error if a stored date is not RFC 3339.
    pub fn into_contest(self) -> Result<Contest, PersistenceError> {
        Ok(Contest {
            contest_id: ContestId::new(self.contest_id),
            start_date: parse_timestamp("start_date", &self.start_date)?,
            end_date: parse_timestamp("end_date", &self.end_date)?,
            name: self.name,
            created_at: self.created_at,
        })
    }
}

impl ParticipantRow {
    /// # Errors
    ///
    /// Returns an error if the stored code name is blank.
    pub fn into_participant(self) -> Result<Participant, PersistenceError> {
        let code_name: CodeName = CodeName::parse(&self.code_name)
            .map_err(|e| PersistenceError::InvalidStoredValue(e.to_string()))?;

        Ok(Participant {
            participant_id: self.participant_id,
            code_name,
            full_name: self.full_name,
            email: self.email,
            about: self.about,
            photo: self.photo,
            contest_id: ContestId::new(self.contest_id),
            status: ParticipantStatus::from_evicted(self.evicted != 0),
            created_at: self.created_at,
        })
    }
}

impl VoteRow {
    /// # Errors
    ///
    /// Returns an error if the stored count does not fit the domain width.
    pub fn into_vote(self) -> Result<Vote, PersistenceError> {
        Ok(Vote {
            vote_id: self.vote_id,
            contest_id: ContestId::new(self.contest_id),
            participant_id: self.participant_id,
            vote_count: vote_count_from_row(self.vote_count)?,
            voter_name: self.voter_name,
            payment_reference: self.payment_reference,
            created_at: self.created_at,
        })
    }
}
