// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use contest_vote_domain::{NewParticipant, Participant};
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::ParticipantRow;
use crate::diesel_schema::{participants, votes};
use crate::error::PersistenceError;

backend_fn! {
/// Inserts an active participant under the given code name.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the email or code name is
/// already taken, or `PersistenceError::ForeignKeyViolation` if the contest
/// does not exist.
pub fn insert_participant(
    conn: &mut _,
    contest_id: i64,
    code_name: &str,
    participant: &NewParticipant,
    created_at: &str,
) -> Result<Participant, PersistenceError> {
    info!("Creating participant {} in contest {}", code_name, contest_id);

    diesel::insert_into(participants::table)
        .values((
            participants::contest_id.eq(contest_id),
            participants::code_name.eq(code_name),
            participants::full_name.eq(participant.full_name()),
            participants::email.eq(participant.email()),
            participants::about.eq(participant.about()),
            participants::photo.eq(participant.photo()),
            participants::evicted.eq(0),
            participants::created_at.eq(created_at),
        ))
        .execute(conn)?;

    let participant_id: i64 = conn.get_last_insert_rowid()?;

    let row: ParticipantRow = participants::table
        .filter(participants::participant_id.eq(participant_id))
        .select(ParticipantRow::as_select())
        .first(conn)?;

    row.into_participant()
}
}

backend_fn! {
/// Overwrites a participant's profile fields.
///
/// Code name, contest, and eviction state are never written here.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the new email is taken,
/// or `PersistenceError::ParticipantNotFound` if the row is gone.
pub fn update_participant(
    conn: &mut _,
    participant: &Participant,
) -> Result<Participant, PersistenceError> {
    let participant_id: i64 = participant.participant_id;
    info!("Updating participant {}", participant.code_name);

    diesel::update(participants::table.filter(participants::participant_id.eq(participant_id)))
        .set((
            participants::full_name.eq(&participant.full_name),
            participants::email.eq(&participant.email),
            participants::about.eq(&participant.about),
            participants::photo.eq(participant.photo.as_deref()),
        ))
        .execute(conn)?;

    let row: Option<ParticipantRow> = participants::table
        .filter(participants::participant_id.eq(participant_id))
        .select(ParticipantRow::as_select())
        .first(conn)
        .optional()?;

    row.ok_or_else(|| PersistenceError::ParticipantNotFound(participant.code_name.to_string()))?
        .into_participant()
}
}

backend_fn! {
/// Sets the eviction flag on an active participant.
///
/// Returns `false` when the participant was already evicted or missing.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn mark_evicted(conn: &mut _, participant_id: i64) -> Result<bool, PersistenceError> {
    let changed: usize = diesel::update(
        participants::table
            .filter(participants::participant_id.eq(participant_id))
            .filter(participants::evicted.eq(0)),
    )
    .set(participants::evicted.eq(1))
    .execute(conn)?;

    debug!("Eviction of participant {} changed {} rows", participant_id, changed);
    Ok(changed == 1)
}
}

backend_fn! {
/// Removes a participant and every vote cast for them in one transaction.
///
/// Returns the number of votes removed.
///
/// # Errors
///
/// Returns `PersistenceError::ParticipantNotFound` if the participant does
/// not exist. Nothing is removed on error.
pub fn delete_participant_cascade(
    conn: &mut _,
    participant_id: i64,
) -> Result<usize, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let existing: i64 = participants::table
            .filter(participants::participant_id.eq(participant_id))
            .count()
            .get_result(conn)?;
        if existing == 0 {
            return Err(PersistenceError::ParticipantNotFound(format!(
                "#{participant_id}"
            )));
        }

        let votes_removed: usize =
            diesel::delete(votes::table.filter(votes::participant_id.eq(participant_id)))
                .execute(conn)?;

        diesel::delete(participants::table.filter(participants::participant_id.eq(participant_id)))
            .execute(conn)?;

        info!(
            "Deleted participant {} and {} votes",
            participant_id, votes_removed
        );
        Ok(votes_removed)
    })
}
}
