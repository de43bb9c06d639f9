// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Contest Vote backend.
//!
//! Stores contests, participants, and votes through Diesel and implements
//! [`contest_vote::ContestStore`] on top of them.
//!
//! ## Database Backend Support
//!
//! - **`SQLite`** (default): development, the server's default database, and
//!   every standard test, usually as an isolated in-memory database
//! - **`MariaDB`/`MySQL`**: compiled in unconditionally, validated only by
//!   the opt-in tests run through `cargo xtask test-mariadb`
//!
//! ### Migration Strategy
//!
//! SQL syntax differs between the backends, so there are two migration
//! directories describing the same schema:
//!
//! - `migrations/`: `SQLite`
//! - `migrations_mysql/`: `MySQL`/`MariaDB`
//!
//! ### Timestamps
//!
//! All date columns hold RFC 3339 text produced in Rust, so both backends
//! store byte-identical values and no column relies on a database default.
//!
//! ## Testing
//!
//! - `cargo test` runs against `SQLite` only
//! - Backend validation tests are marked `#[ignore]` and need infrastructure
//!   provided by `xtask`

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
#![allow(clippy::multiple_crate_versions)]

use contest_vote::{ContestDeletion, ContestStore, StoreError};
use contest_vote_domain::{
    CodeName, Contest, ContestId, NewContest, NewParticipant, NewVote, Participant, Vote,
};
use diesel::{MysqlConnection, SqliteConnection};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of unique names for in-memory databases.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generates a `_sqlite` and a `_mysql` copy of a statement function.
///
/// Diesel needs a concrete connection type at compile time, so a single
/// body is duplicated with the connection type substituted:
///
/// ```ignore
/// backend_fn! {
///     pub fn find_contest(conn: &mut _, contest_id: i64) -> Result<Option<Contest>, PersistenceError> {
///         // body using conn
///     }
/// }
/// ```
///
/// expands to `find_contest_sqlite(&mut SqliteConnection, i64)` and
/// `find_contest_mysql(&mut MysqlConnection, i64)`. The macro performs no
/// dispatch; `Persistence` matches on its connection to pick one.
macro_rules! backend_fn {
    (
        $(#[$meta:meta])*
        $vis:vis fn $name:ident (
            $conn:ident : &mut _
            $(, $param:ident : $param_ty:ty)* $(,)?
        ) -> $ret:ty
        $body:block
    ) => {
        pastey::paste! {
            $(#[$meta])*
            $vis fn [<$name _sqlite>] (
                $conn: &mut SqliteConnection
                $(, $param : $param_ty)*
            ) -> $ret
            $body

            $(#[$meta])*
            $vis fn [<$name _mysql>] (
                $conn: &mut MysqlConnection
                $(, $param : $param_ty)*
            ) -> $ret
            $body
        }
    };
}

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::{PersistenceError, classify_unique_violation};

use backend::PersistenceBackend;
use data_models::{format_timestamp, now_timestamp};

/// The live database connection, fixed at construction.
pub enum BackendConnection {
    Sqlite(SqliteConnection),
    Mysql(MysqlConnection),
}

/// Diesel-backed [`ContestStore`].
///
/// Holds a single connection; callers that share it across tasks wrap the
/// whole adapter in a mutex.
pub struct Persistence {
    pub(crate) conn: BackendConnection,
}

impl Persistence {
    /// Opens a fresh, isolated in-memory `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_contest_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn: BackendConnection::Sqlite(conn),
        })
    }

    /// Opens (or creates) a file-backed `SQLite` database in WAL mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn: BackendConnection::Sqlite(conn),
        })
    }

    /// Connects to a `MySQL`/`MariaDB` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be reached or migrated.
    pub fn new_with_mysql(database_url: &str) -> Result<Self, PersistenceError> {
        let mut conn: MysqlConnection = backend::mysql::initialize_database(database_url)?;
        backend::mysql::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn: BackendConnection::Mysql(conn),
        })
    }

    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => conn.verify_foreign_key_enforcement(),
            BackendConnection::Mysql(conn) => conn.verify_foreign_key_enforcement(),
        }
    }

    // ========================================================================
    // Contests
    // ========================================================================

    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_contest(&mut self, contest: &NewContest) -> Result<Contest, PersistenceError> {
        let start_date: String = format_timestamp(contest.start_date())?;
        let end_date: String = format_timestamp(contest.end_date())?;
        let created_at: String = now_timestamp()?;

        match &mut self.conn {
            BackendConnection::Sqlite(conn) => mutations::insert_contest_sqlite(
                conn,
                contest.name(),
                &start_date,
                &end_date,
                &created_at,
            ),
            BackendConnection::Mysql(conn) => mutations::insert_contest_mysql(
                conn,
                contest.name(),
                &start_date,
                &end_date,
                &created_at,
            ),
        }
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_contest(&mut self, contest_id: ContestId) -> Result<Option<Contest>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::find_contest_sqlite(conn, contest_id.value()),
            BackendConnection::Mysql(conn) => queries::find_contest_mysql(conn, contest_id.value()),
        }
    }

    /// Lists contests, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_contests(&mut self) -> Result<Vec<Contest>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => queries::list_contests_sqlite(conn),
            BackendConnection::Mysql(conn) => queries::list_contests_mysql(conn),
        }
    }

    /// # Errors
    ///
    /// Returns `PersistenceError::ContestNotFound` if the contest is gone.
    pub fn save_contest(&mut self, contest: &Contest) -> Result<Contest, PersistenceError> {
        let contest_id: i64 = contest.contest_id.value();
        let start_date: String = format_timestamp(contest.start_date)?;
        let end_date: String = format_timestamp(contest.end_date)?;

        match &mut self.conn {
            BackendConnection::Sqlite(conn) => mutations::update_contest_sqlite(
                conn,
                contest_id,
                &contest.name,
                &start_date,
                &end_date,
            ),
            BackendConnection::Mysql(conn) => mutations::update_contest_mysql(
                conn,
                contest_id,
                &contest.name,
                &start_date,
                &end_date,
            ),
        }
    }

    /// # Errors
    ///
    /// Returns `PersistenceError::ContestNotFound` if the contest does not
    /// exist.
    pub fn remove_contest(
        &mut self,
        contest_id: ContestId,
    ) -> Result<ContestDeletion, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::delete_contest_cascade_sqlite(conn, contest_id.value())
            }
            BackendConnection::Mysql(conn) => {
                mutations::delete_contest_cascade_mysql(conn, contest_id.value())
            }
        }
    }

    // ========================================================================
    // Participants
    // ========================================================================

    /// # Errors
    ///
    /// Returns an error if the query fails or the stored value is invalid.
    pub fn get_latest_code_name(
        &mut self,
        contest_id: ContestId,
    ) -> Result<Option<CodeName>, PersistenceError> {
        let raw: Option<String> = match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                queries::latest_code_name_sqlite(conn, contest_id.value())?
            }
            BackendConnection::Mysql(conn) => {
                queries::latest_code_name_mysql(conn, contest_id.value())?
            }
        };

        raw.map(|value| {
            CodeName::parse(&value).map_err(|e| PersistenceError::InvalidStoredValue(e.to_string()))
        })
        .transpose()
    }

    /// # Errors
    ///
    /// Returns `PersistenceError::UniqueViolation` on a duplicate email or
    /// code name.
    pub fn create_participant(
        &mut self,
        contest_id: ContestId,
        code_name: &CodeName,
        participant: &NewParticipant,
    ) -> Result<Participant, PersistenceError> {
        let created_at: String = now_timestamp()?;

        match &mut self.conn {
            BackendConnection::Sqlite(conn) => mutations::insert_participant_sqlite(
                conn,
                contest_id.value(),
                code_name.value(),
                participant,
                &created_at,
            ),
            BackendConnection::Mysql(conn) => mutations::insert_participant_mysql(
                conn,
                contest_id.value(),
                code_name.value(),
                participant,
                &created_at,
            ),
        }
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_participant(
        &mut self,
        code_name: &CodeName,
    ) -> Result<Option<Participant>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                queries::find_participant_by_code_name_sqlite(conn, code_name.value())
            }
            BackendConnection::Mysql(conn) => {
                queries::find_participant_by_code_name_mysql(conn, code_name.value())
            }
        }
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_participants(
        &mut self,
        contest_id: ContestId,
    ) -> Result<Vec<Participant>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                queries::list_participants_sqlite(conn, contest_id.value())
            }
            BackendConnection::Mysql(conn) => {
                queries::list_participants_mysql(conn, contest_id.value())
            }
        }
    }

    /// # Errors
    ///
    /// Returns `PersistenceError::UniqueViolation` on a duplicate email.
    pub fn save_participant(
        &mut self,
        participant: &Participant,
    ) -> Result<Participant, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => mutations::update_participant_sqlite(conn, participant),
            BackendConnection::Mysql(conn) => mutations::update_participant_mysql(conn, participant),
        }
    }

    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn evict_participant(&mut self, participant_id: i64) -> Result<bool, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => mutations::mark_evicted_sqlite(conn, participant_id),
            BackendConnection::Mysql(conn) => mutations::mark_evicted_mysql(conn, participant_id),
        }
    }

    /// # Errors
    ///
    /// Returns `PersistenceError::ParticipantNotFound` if the participant
    /// does not exist.
    pub fn remove_participant(&mut self, participant_id: i64) -> Result<usize, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                mutations::delete_participant_cascade_sqlite(conn, participant_id)
            }
            BackendConnection::Mysql(conn) => {
                mutations::delete_participant_cascade_mysql(conn, participant_id)
            }
        }
    }

    // ========================================================================
    // Votes
    // ========================================================================

    /// # Errors
    ///
    /// Returns `PersistenceError::ParticipantEvicted`,
    /// `PersistenceError::ParticipantNotFound`, or
    /// `PersistenceError::UniqueViolation` on a reused payment reference.
    pub fn create_vote(&mut self, vote: &NewVote) -> Result<Vote, PersistenceError> {
        let created_at: String = now_timestamp()?;

        match &mut self.conn {
            BackendConnection::Sqlite(conn) => mutations::insert_vote_sqlite(conn, vote, &created_at),
            BackendConnection::Mysql(conn) => mutations::insert_vote_mysql(conn, vote, &created_at),
        }
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_votes_for_participant(
        &mut self,
        participant_id: i64,
    ) -> Result<Vec<Vote>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                queries::list_votes_for_participant_sqlite(conn, participant_id)
            }
            BackendConnection::Mysql(conn) => {
                queries::list_votes_for_participant_mysql(conn, participant_id)
            }
        }
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_contest_vote_counts(
        &mut self,
        contest_id: ContestId,
    ) -> Result<Vec<(i64, u32)>, PersistenceError> {
        match &mut self.conn {
            BackendConnection::Sqlite(conn) => {
                queries::contest_vote_counts_sqlite(conn, contest_id.value())
            }
            BackendConnection::Mysql(conn) => {
                queries::contest_vote_counts_mysql(conn, contest_id.value())
            }
        }
    }
}

impl ContestStore for Persistence {
    fn insert_contest(&mut self, contest: &NewContest) -> Result<Contest, StoreError> {
        Ok(self.create_contest(contest)?)
    }

    fn find_contest(&mut self, contest_id: ContestId) -> Result<Option<Contest>, StoreError> {
        Ok(self.get_contest(contest_id)?)
    }

    fn list_contests(&mut self) -> Result<Vec<Contest>, StoreError> {
        Ok(self.get_contests()?)
    }

    fn update_contest(&mut self, contest: &Contest) -> Result<Contest, StoreError> {
        Ok(self.save_contest(contest)?)
    }

    fn delete_contest_cascade(
        &mut self,
        contest_id: ContestId,
    ) -> Result<ContestDeletion, StoreError> {
        Ok(self.remove_contest(contest_id)?)
    }

    fn latest_code_name(&mut self, contest_id: ContestId) -> Result<Option<CodeName>, StoreError> {
        Ok(self.get_latest_code_name(contest_id)?)
    }

    fn insert_participant(
        &mut self,
        contest_id: ContestId,
        code_name: &CodeName,
        participant: &NewParticipant,
    ) -> Result<Participant, StoreError> {
        Ok(self.create_participant(contest_id, code_name, participant)?)
    }

    fn find_participant(&mut self, code_name: &CodeName) -> Result<Option<Participant>, StoreError> {
        Ok(self.get_participant(code_name)?)
    }

    fn list_participants(
        &mut self,
        contest_id: ContestId,
    ) -> Result<Vec<Participant>, StoreError> {
        Ok(self.get_participants(contest_id)?)
    }

    fn update_participant(&mut self, participant: &Participant) -> Result<Participant, StoreError> {
        Ok(self.save_participant(participant)?)
    }

    fn mark_evicted(&mut self, participant_id: i64) -> Result<bool, StoreError> {
        Ok(self.evict_participant(participant_id)?)
    }

    fn delete_participant_cascade(&mut self, participant_id: i64) -> Result<usize, StoreError> {
        Ok(self.remove_participant(participant_id)?)
    }

    fn insert_vote(&mut self, vote: &NewVote) -> Result<Vote, StoreError> {
        Ok(self.create_vote(vote)?)
    }

    fn list_votes_for_participant(
        &mut self,
        participant_id: i64,
    ) -> Result<Vec<Vote>, StoreError> {
        Ok(self.get_votes_for_participant(participant_id)?)
    }

    fn contest_vote_counts(
        &mut self,
        contest_id: ContestId,
    ) -> Result<Vec<(i64, u32)>, StoreError> {
        Ok(self.get_contest_vote_counts(contest_id)?)
    }
}
