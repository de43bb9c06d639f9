// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing statements.
//!
//! - `contests`: contest insert, update, and cascading delete
//! - `participants`: participant insert, update, eviction, and cascading delete
//! - `votes`: the guarded vote insert
//!
//! Multi-statement operations run inside `Connection::transaction`, so a
//! failure at any step leaves the database as it was. Inserted rows are
//! read back through `PersistenceBackend::get_last_insert_rowid`.

pub mod contests;
pub mod participants;
pub mod votes;

pub use contests::{
    delete_contest_cascade_mysql, delete_contest_cascade_sqlite, insert_contest_mysql,
    insert_contest_sqlite, update_contest_mysql, update_contest_sqlite,
};
pub use participants::{
    delete_participant_cascade_mysql, delete_participant_cascade_sqlite,
    insert_participant_mysql, insert_participant_sqlite, mark_evicted_mysql,
    mark_evicted_sqlite, update_participant_mysql, update_participant_sqlite,
};
pub use votes::{insert_vote_mysql, insert_vote_sqlite};
