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

mod error;
mod identifiers;
mod results;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use identifiers::{
    ADMIN_REFERENCE_PREFIX, CODE_NAME_PREFIX, CodeName, ContestId, PaymentReference,
};
pub use results::{ParticipantResult, tally_results};
pub use types::{
    Contest, ContestPatch, NewContest, NewParticipant, NewVote, Participant, ParticipantPatch,
    ParticipantStatus, Vote,
};
pub use validation::{
    MAX_ABOUT_LENGTH, MAX_PHOTO_URL_LENGTH, MAX_TEXT_LENGTH, MIN_ABOUT_LENGTH, parse_contest_date,
    validate_about, validate_contest_dates, validate_email, validate_max_length, validate_required,
    validate_text, validate_vote_count,
};
