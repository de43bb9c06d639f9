// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use contest_vote_domain::Participant;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;

use crate::data_models::ParticipantRow;
use crate::diesel_schema::participants;
use crate::error::PersistenceError;

backend_fn! {
/// Looks up a participant by code name.
///
/// Code names are unique across all contests, so no contest filter is
/// needed.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row cannot be decoded.
pub fn find_participant_by_code_name(
    conn: &mut _,
    code_name: &str,
) -> Result<Option<Participant>, PersistenceError> {
    debug!("Looking up participant {}", code_name);

    let row: Option<ParticipantRow> = participants::table
        .filter(participants::code_name.eq(code_name))
        .select(ParticipantRow::as_select())
        .first(conn)
        .optional()?;

    row.map(ParticipantRow::into_participant).transpose()
}
}

backend_fn! {
/// Lists a contest's participants, active ones first and newest first
/// within each group.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row cannot be decoded.
pub fn list_participants(
    conn: &mut _,
    contest_id: i64,
) -> Result<Vec<Participant>, PersistenceError> {
    let rows: Vec<ParticipantRow> = participants::table
        .filter(participants::contest_id.eq(contest_id))
        .order((participants::evicted.asc(), participants::participant_id.desc()))
        .select(ParticipantRow::as_select())
        .load(conn)?;

    debug!("Loaded {} participants for contest {}", rows.len(), contest_id);
    rows.into_iter().map(ParticipantRow::into_participant).collect()
}
}

backend_fn! {
/// Returns the code name of the newest participant in a contest.
///
/// Row ids are assigned in insertion order, so the highest id is the most
/// recently created participant.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn latest_code_name(conn: &mut _, contest_id: i64) -> Result<Option<String>, PersistenceError> {
    let code_name: Option<String> = participants::table
        .filter(participants::contest_id.eq(contest_id))
        .order(participants::participant_id.desc())
        .select(participants::code_name)
        .first(conn)
        .optional()?;

    Ok(code_name)
}
}
