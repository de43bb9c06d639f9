// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use contest_vote_domain::Contest;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;

use crate::data_models::ContestRow;
use crate::diesel_schema::contests;
use crate::error::PersistenceError;

backend_fn! {
/// Looks up a contest by id.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row cannot be decoded.
/// Returns `Ok(None)` if no contest has this id.
pub fn find_contest(conn: &mut _, contest_id: i64) -> Result<Option<Contest>, PersistenceError> {
    debug!("Looking up contest {}", contest_id);

    let row: Option<ContestRow> = contests::table
        .filter(contests::contest_id.eq(contest_id))
        .select(ContestRow::as_select())
        .first(conn)
        .optional()?;

    row.map(ContestRow::into_contest).transpose()
}
}

backend_fn! {
/// Lists every contest, most recently created first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row cannot be decoded.
pub fn list_contests(conn: &mut _) -> Result<Vec<Contest>, PersistenceError> {
    let rows: Vec<ContestRow> = contests::table
        .order(contests::contest_id.desc())
        .select(ContestRow::as_select())
        .load(conn)?;

    debug!("Loaded {} contests", rows.len());
    rows.into_iter().map(ContestRow::into_contest).collect()
}
}
