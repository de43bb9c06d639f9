// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use contest_vote_domain::Vote;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;

use crate::data_models::{VoteRow, vote_count_from_row};
use crate::diesel_schema::votes;
use crate::error::PersistenceError;

backend_fn! {
/// Lists a participant's votes in the order they were cast.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row cannot be decoded.
pub fn list_votes_for_participant(
    conn: &mut _,
    participant_id: i64,
) -> Result<Vec<Vote>, PersistenceError> {
    let rows: Vec<VoteRow> = votes::table
        .filter(votes::participant_id.eq(participant_id))
        .order(votes::vote_id.asc())
        .select(VoteRow::as_select())
        .load(conn)?;

    debug!("Loaded {} votes for participant {}", rows.len(), participant_id);
    rows.into_iter().map(VoteRow::into_vote).collect()
}
}

backend_fn! {
/// Returns `(participant_id, vote_count)` for each vote in a contest.
///
/// Summing happens in the domain layer so the arithmetic does not depend
/// on how each backend types `SUM()`.
///
/// # Errors
///
/// Returns an error if the query fails or a count is out of range.
pub fn contest_vote_counts(
    conn: &mut _,
    contest_id: i64,
) -> Result<Vec<(i64, u32)>, PersistenceError> {
    let rows: Vec<(i64, i64)> = votes::table
        .filter(votes::contest_id.eq(contest_id))
        .select((votes::participant_id, votes::vote_count))
        .load(conn)?;

    rows.into_iter()
        .map(|(participant_id, count)| Ok((participant_id, vote_count_from_row(count)?)))
        .collect()
}
}
