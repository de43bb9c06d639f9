// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use contest_vote::ContestDeletion;
use contest_vote_domain::Contest;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::ContestRow;
use crate::diesel_schema::{contests, participants, votes};
use crate::error::PersistenceError;

backend_fn! {
/// Inserts a contest row and reads it back.
///
/// Dates are passed already formatted as RFC 3339.
///
/// # Errors
///
/// Returns an error if the insert or read-back fails.
pub fn insert_contest(
    conn: &mut _,
    name: &str,
    start_date: &str,
    end_date: &str,
    created_at: &str,
) -> Result<Contest, PersistenceError> {
    info!("Creating contest '{}'", name);

    diesel::insert_into(contests::table)
        .values((
            contests::name.eq(name),
            contests::start_date.eq(start_date),
            contests::end_date.eq(end_date),
            contests::created_at.eq(created_at),
        ))
        .execute(conn)?;

    let contest_id: i64 = conn.get_last_insert_rowid()?;

    let row: ContestRow = contests::table
        .filter(contests::contest_id.eq(contest_id))
        .select(ContestRow::as_select())
        .first(conn)?;

    row.into_contest()
}
}

backend_fn! {
/// Overwrites a contest's name and dates.
///
/// The row is read back rather than trusting the affected-row count, which
/// `MySQL` reports as zero when nothing changed.
///
/// # Errors
///
/// Returns `PersistenceError::ContestNotFound` if the row does not exist.
pub fn update_contest(
    conn: &mut _,
    contest_id: i64,
    name: &str,
    start_date: &str,
    end_date: &str,
) -> Result<Contest, PersistenceError> {
    info!("Updating contest {}", contest_id);

    diesel::update(contests::table.filter(contests::contest_id.eq(contest_id)))
        .set((
            contests::name.eq(name),
            contests::start_date.eq(start_date),
            contests::end_date.eq(end_date),
        ))
        .execute(conn)?;

    let row: Option<ContestRow> = contests::table
        .filter(contests::contest_id.eq(contest_id))
        .select(ContestRow::as_select())
        .first(conn)
        .optional()?;

    row.ok_or(PersistenceError::ContestNotFound(contest_id))?
        .into_contest()
}
}

backend_fn! {
/// Removes a contest with all of its votes and participants in one
/// transaction.
///
/// Votes are matched both by contest and by participant so a vote can
/// never outlive the participant it references. The photo URLs of the
/// removed participants are returned for cleanup after commit.
///
/// # Errors
///
/// Returns `PersistenceError::ContestNotFound` if the contest does not
/// exist. Nothing is removed on error.
pub fn delete_contest_cascade(
    conn: &mut _,
    contest_id: i64,
) -> Result<ContestDeletion, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let existing: i64 = contests::table
            .filter(contests::contest_id.eq(contest_id))
            .count()
            .get_result(conn)?;
        if existing == 0 {
            return Err(PersistenceError::ContestNotFound(contest_id));
        }

        let members: Vec<(i64, Option<String>)> = participants::table
            .filter(participants::contest_id.eq(contest_id))
            .select((participants::participant_id, participants::photo))
            .load(conn)?;

        let (participant_ids, photos): (Vec<i64>, Vec<Option<String>>) =
            members.into_iter().unzip();
        let photos: Vec<String> = photos
            .into_iter()
            .flatten()
            .filter(|url| !url.trim().is_empty())
            .collect();

        let votes_removed: usize = diesel::delete(
            votes::table.filter(
                votes::contest_id
                    .eq(contest_id)
                    .or(votes::participant_id.eq_any(participant_ids)),
            ),
        )
        .execute(conn)?;

        let participants_removed: usize = diesel::delete(
            participants::table.filter(participants::contest_id.eq(contest_id)),
        )
        .execute(conn)?;

        diesel::delete(contests::table.filter(contests::contest_id.eq(contest_id)))
            .execute(conn)?;

        debug!(
            "Removed {} votes and {} participants with contest {}",
            votes_removed, participants_removed, contest_id
        );

        Ok(ContestDeletion {
            participants_removed,
            votes_removed,
            photos,
        })
    })
}
}
