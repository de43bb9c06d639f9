// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use contest_vote_domain::{NewVote, PaymentReference, Vote};
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::VoteRow;
use crate::diesel_schema::{participants, votes};
use crate::error::PersistenceError;

backend_fn! {
/// Records a vote if its participant still exists and is active.
///
/// The eviction check and the insert share a transaction, so an eviction
/// committed before this transaction starts is always observed.
///
/// # Errors
///
/// Returns `PersistenceError::ParticipantNotFound`,
/// `PersistenceError::ParticipantEvicted`, or
/// `PersistenceError::UniqueViolation` for a reused payment reference.
pub fn insert_vote(
    conn: &mut _,
    vote: &NewVote,
    created_at: &str,
) -> Result<Vote, PersistenceError> {
    let participant_id: i64 = vote.participant_id();

    conn.transaction::<_, PersistenceError, _>(|conn| {
        let evicted: Option<i32> = participants::table
            .filter(participants::participant_id.eq(participant_id))
            .select(participants::evicted)
            .first(conn)
            .optional()?;

        match evicted {
            None => {
                return Err(PersistenceError::ParticipantNotFound(format!(
                    "#{participant_id}"
                )));
            }
            Some(flag) if flag != 0 => {
                return Err(PersistenceError::ParticipantEvicted { participant_id });
            }
            Some(_) => {}
        }

        diesel::insert_into(votes::table)
            .values((
                votes::contest_id.eq(vote.contest_id().value()),
                votes::participant_id.eq(participant_id),
                votes::vote_count.eq(i64::from(vote.vote_count())),
                votes::voter_name.eq(vote.voter_name()),
                votes::payment_reference.eq(vote.payment_reference().map(PaymentReference::value)),
                votes::created_at.eq(created_at),
            ))
            .execute(conn)?;

        let vote_id: i64 = conn.get_last_insert_rowid()?;
        info!(
            "Recorded {} votes for participant {} as vote {}",
            vote.vote_count(),
            participant_id,
            vote_id
        );

        let row: VoteRow = votes::table
            .filter(votes::vote_id.eq(vote_id))
            .select(VoteRow::as_select())
            .first(conn)?;

        row.into_vote()
    })
}
}
