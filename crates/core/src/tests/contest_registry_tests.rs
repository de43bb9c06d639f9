// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    InMemoryStore, RecordingMediaStore, create_contest, create_participant, march_end,
    march_start,
};
use crate::{ContestDeletion, ContestRegistry, CoreError, VoteLedger};
use contest_vote_domain::{Contest, ContestId, ContestPatch, DomainError};
use time::macros::datetime;

#[test]
fn test_create_contest_persists_record() {
    let mut store: InMemoryStore = InMemoryStore::default();

    let contest: Contest = ContestRegistry::new(&mut store)
        .create("Spring Showcase", march_start(), march_end())
        .unwrap();

    assert_eq!(contest.name, "Spring Showcase");
    assert_eq!(store.contests.len(), 1);
}

#[test]
fn test_create_contest_rejects_inverted_dates() {
    let mut store: InMemoryStore = InMemoryStore::default();

    let result: Result<Contest, CoreError> =
        ContestRegistry::new(&mut store).create("Finals", march_end(), march_start());

    assert!(matches!(
        result,
        Err(CoreError::Validation(DomainError::InvalidDateRange { .. }))
    ));
    assert!(store.contests.is_empty());
}

#[test]
fn test_create_contest_rejects_blank_name() {
    let mut store: InMemoryStore = InMemoryStore::default();

    let result: Result<Contest, CoreError> =
        ContestRegistry::new(&mut store).create("  ", march_start(), march_end());

    assert!(matches!(
        result,
        Err(CoreError::Validation(DomainError::MissingField("name")))
    ));
}

#[test]
fn test_get_missing_contest_returns_none() {
    let mut store: InMemoryStore = InMemoryStore::default();

    let found: Option<Contest> = ContestRegistry::new(&mut store)
        .get(ContestId::new(99))
        .unwrap();
    assert!(found.is_none());
}

#[test]
fn test_list_contests_newest_first() {
    let mut store: InMemoryStore = InMemoryStore::default();
    let first: Contest = create_contest(&mut store);
    let second: Contest = create_contest(&mut store);

    let contests: Vec<Contest> = ContestRegistry::new(&mut store).list().unwrap();
    assert_eq!(contests[0].contest_id, second.contest_id);
    assert_eq!(contests[1].contest_id, first.contest_id);
}

#[test]
fn test_update_contest_merges_patch() {
    let mut store: InMemoryStore = InMemoryStore::default();
    let contest: Contest = create_contest(&mut store);

    let patch: ContestPatch = ContestPatch {
        end_date: Some(datetime!(2026-04-30 0:00 UTC)),
        ..ContestPatch::default()
    };
    let updated: Contest = ContestRegistry::new(&mut store)
        .update(contest.contest_id, &patch)
        .unwrap();

    assert_eq!(updated.name, contest.name);
    assert_eq!(updated.start_date, contest.start_date);
    assert_eq!(updated.end_date, datetime!(2026-04-30 0:00 UTC));
}

#[test]
fn test_update_contest_rejects_start_after_stored_end() {
    let mut store: InMemoryStore = InMemoryStore::default();
    let contest: Contest = create_contest(&mut store);

    let patch: ContestPatch = ContestPatch {
        start_date: Some(datetime!(2026-05-01 0:00 UTC)),
        ..ContestPatch::default()
    };
    let result: Result<Contest, CoreError> =
        ContestRegistry::new(&mut store).update(contest.contest_id, &patch);

    assert!(matches!(
        result,
        Err(CoreError::Validation(DomainError::InvalidDateRange { .. }))
    ));
    assert_eq!(store.contests[0].start_date, march_start());
}

#[test]
fn test_update_missing_contest_is_not_found() {
    let mut store: InMemoryStore = InMemoryStore::default();

    let result: Result<Contest, CoreError> = ContestRegistry::new(&mut store)
        .update(ContestId::new(5), &ContestPatch::default());
    assert!(matches!(
        result,
        Err(CoreError::NotFound {
            entity: "Contest",
            ..
        })
    ));
}

#[test]
fn test_delete_contest_cascades_and_cleans_photos() {
    let mut store: InMemoryStore = InMemoryStore::default();
    let contest: Contest = create_contest(&mut store);
    let a = create_participant(
        &mut store,
        contest.contest_id,
        "a@example.com",
        Some("https://cdn/a.png"),
    );
    create_participant(&mut store, contest.contest_id, "b@example.com", None);
    VoteLedger::new(&mut store)
        .add_admin_vote(contest.contest_id, &a.code_name, 3, None)
        .unwrap();

    let media: RecordingMediaStore = RecordingMediaStore::default();
    let deletion: ContestDeletion = ContestRegistry::new(&mut store)
        .delete(contest.contest_id, &media)
        .unwrap();

    assert_eq!(deletion.participants_removed, 2);
    assert_eq!(deletion.votes_removed, 1);
    assert_eq!(media.deleted_urls(), vec![String::from("https://cdn/a.png")]);
    assert!(store.contests.is_empty());
    assert!(store.participants.is_empty());
    assert!(store.votes.is_empty());
}

#[test]
fn test_delete_contest_ignores_media_failures() {
    let mut store: InMemoryStore = InMemoryStore::default();
    let contest: Contest = create_contest(&mut store);
    create_participant(
        &mut store,
        contest.contest_id,
        "a@example.com",
        Some("https://cdn/a.png"),
    );

    let media: RecordingMediaStore = RecordingMediaStore::failing();
    let result: Result<ContestDeletion, CoreError> =
        ContestRegistry::new(&mut store).delete(contest.contest_id, &media);

    assert!(result.is_ok());
    assert_eq!(media.deleted_urls().len(), 1);
    assert!(store.contests.is_empty());
}

#[test]
fn test_delete_missing_contest_is_not_found() {
    let mut store: InMemoryStore = InMemoryStore::default();
    let media: RecordingMediaStore = RecordingMediaStore::default();

    let result: Result<ContestDeletion, CoreError> =
        ContestRegistry::new(&mut store).delete(ContestId::new(1), &media);
    assert!(matches!(result, Err(CoreError::NotFound { .. })));
}
