// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

//! Contest, participant and vote services.
//!
//! Registries validate input, consult the [`ContestStore`] for existence and
//! uniqueness, and hand photo cleanup to a [`MediaStore`] once the primary
//! mutation has committed.

mod contest_registry;
mod error;
mod lookup;
mod media;
mod participant_registry;
mod store;
mod vote_ledger;

#[cfg(test)]
mod tests;

pub use contest_registry::ContestRegistry;
pub use error::{ConflictKind, CoreError};
pub use media::{MediaError, MediaStore, NoopMediaStore, cleanup_photo};
pub use participant_registry::{ParticipantDetails, ParticipantRegistry};
pub use store::{ContestDeletion, ContestStore, StoreError, UniqueConstraint};
pub use vote_ledger::{DEFAULT_ADMIN_VOTER, VoteLedger};
