// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only statements.
//!
//! - `contests`: contest lookup and listing
//! - `participants`: participant lookup, listing, and code-name sequencing
//! - `votes`: vote history and per-contest tallies
//!
//! Every function is generated twice by `backend_fn!`, once suffixed
//! `_sqlite` and once `_mysql`. `Persistence` picks the variant matching
//! its connection.

pub mod contests;
pub mod participants;
pub mod votes;

pub use contests::{
    find_contest_mysql, find_contest_sqlite, list_contests_mysql, list_contests_sqlite,
};
pub use participants::{
    find_participant_by_code_name_mysql, find_participant_by_code_name_sqlite,
    latest_code_name_mysql, latest_code_name_sqlite, list_participants_mysql,
    list_participants_sqlite,
};
pub use votes::{
    contest_vote_counts_mysql, contest_vote_counts_sqlite, list_votes_for_participant_mysql,
    list_votes_for_participant_sqlite,
};
