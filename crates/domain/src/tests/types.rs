// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    CodeName, Contest, ContestId, ContestPatch, DomainError, MAX_PHOTO_URL_LENGTH, MAX_TEXT_LENGTH,
    NewContest, NewParticipant, NewVote, Participant, ParticipantPatch, ParticipantStatus,
    PaymentReference,
};
use time::OffsetDateTime;
use time::macros::datetime;

fn create_test_contest() -> Contest {
    Contest {
        contest_id: ContestId::new(1),
        name: String::from("Spring Showcase"),
        start_date: datetime!(2026-03-01 0:00 UTC),
        end_date: datetime!(2026-03-31 0:00 UTC),
        created_at: String::from("2026-01-01 00:00:00"),
    }
}

fn create_test_participant(photo: Option<&str>) -> Participant {
    Participant {
        participant_id: 10,
        code_name: CodeName::from_sequence(1),
        full_name: String::from("Ada Obi"),
        email: String::from("ada@example.com"),
        about: String::from("A singer from Lagos with a decade of choir experience."),
        photo: photo.map(str::to_string),
        contest_id: ContestId::new(1),
        status: ParticipantStatus::Active,
        created_at: String::from("2026-01-02 00:00:00"),
    }
}

#[test]
fn test_status_transitions() {
    assert!(ParticipantStatus::Active.can_transition_to(ParticipantStatus::Evicted));
    assert!(!ParticipantStatus::Evicted.can_transition_to(ParticipantStatus::Active));
    assert!(!ParticipantStatus::Evicted.can_transition_to(ParticipantStatus::Evicted));
    assert!(!ParticipantStatus::Active.can_transition_to(ParticipantStatus::Active));
}

#[test]
fn test_evict_is_one_way() {
    let code: CodeName = CodeName::from_sequence(3);
    let evicted: ParticipantStatus = ParticipantStatus::Active.evict(&code).unwrap();
    assert_eq!(evicted, ParticipantStatus::Evicted);

    let again: Result<ParticipantStatus, DomainError> = evicted.evict(&code);
    assert!(matches!(
        again,
        Err(DomainError::ParticipantAlreadyEvicted { .. })
    ));
}

#[test]
fn test_evicted_cannot_receive_votes() {
    let code: CodeName = CodeName::from_sequence(3);
    assert!(ParticipantStatus::Active.ensure_can_receive_votes(&code).is_ok());
    assert!(matches!(
        ParticipantStatus::Evicted.ensure_can_receive_votes(&code),
        Err(DomainError::ParticipantEvicted { .. })
    ));
}

#[test]
fn test_from_evicted_flag() {
    assert_eq!(ParticipantStatus::from_evicted(false), ParticipantStatus::Active);
    assert_eq!(ParticipantStatus::from_evicted(true), ParticipantStatus::Evicted);
}

#[test]
fn test_new_contest_rejects_blank_name() {
    let result: Result<NewContest, DomainError> = NewContest::new(
        "  ",
        datetime!(2026-03-01 0:00 UTC),
        datetime!(2026-03-31 0:00 UTC),
    );
    assert!(matches!(result, Err(DomainError::MissingField("name"))));
}

#[test]
fn test_new_contest_rejects_equal_dates() {
    let instant: OffsetDateTime = datetime!(2026-03-01 0:00 UTC);
    let result: Result<NewContest, DomainError> = NewContest::new("Finals", instant, instant);
    assert!(matches!(result, Err(DomainError::InvalidDateRange { .. })));
}

#[test]
fn test_new_contest_trims_name() {
    let contest: NewContest = NewContest::new(
        " Finals ",
        datetime!(2026-03-01 0:00 UTC),
        datetime!(2026-03-31 0:00 UTC),
    )
    .unwrap();
    assert_eq!(contest.name(), "Finals");
}

#[test]
fn test_contest_patch_validates_merged_dates() {
    let contest: Contest = create_test_contest();
    let patch: ContestPatch = ContestPatch {
        end_date: Some(datetime!(2026-02-01 0:00 UTC)),
        ..ContestPatch::default()
    };

    let result: Result<Contest, DomainError> = contest.apply(&patch);
    assert!(matches!(result, Err(DomainError::InvalidDateRange { .. })));
}

#[test]
fn test_contest_patch_leaves_unspecified_fields() {
    let contest: Contest = create_test_contest();
    let patch: ContestPatch = ContestPatch {
        name: Some(String::from("Summer Showcase")),
        ..ContestPatch::default()
    };

    let updated: Contest = contest.apply(&patch).unwrap();
    assert_eq!(updated.name, "Summer Showcase");
    assert_eq!(updated.start_date, contest.start_date);
    assert_eq!(updated.end_date, contest.end_date);
    assert_eq!(updated.contest_id, contest.contest_id);
}

#[test]
fn test_new_participant_requires_fields() {
    assert!(matches!(
        NewParticipant::new("", "a@b.co", "about", None),
        Err(DomainError::MissingField("fullName"))
    ));
    assert!(matches!(
        NewParticipant::new("Ada", " ", "about", None),
        Err(DomainError::MissingField("email"))
    ));
    assert!(matches!(
        NewParticipant::new("Ada", "a@b.co", "", None),
        Err(DomainError::MissingField("about"))
    ));
}

#[test]
fn test_new_participant_drops_blank_photo() {
    let participant: NewParticipant =
        NewParticipant::new("Ada", "a@b.co", "about", Some("  ")).unwrap();
    assert_eq!(participant.photo(), None);
}

#[test]
fn test_participant_patch_ignores_blank_strings() {
    let participant: Participant = create_test_participant(None);
    let patch: ParticipantPatch = ParticipantPatch {
        full_name: Some(String::from("   ")),
        email: Some(String::from("new@example.com")),
        about: None,
        photo: Some(String::new()),
    };

    let updated: Participant = participant.apply(&patch).unwrap();
    assert_eq!(updated.full_name, "Ada Obi");
    assert_eq!(updated.email, "new@example.com");
    assert_eq!(updated.about, participant.about);
    assert_eq!(updated.photo, None);
    assert_eq!(updated.code_name, participant.code_name);
}

#[test]
fn test_replaced_photo_detects_change() {
    let participant: Participant = create_test_participant(Some("https://cdn/old.png"));
    let patch: ParticipantPatch = ParticipantPatch {
        photo: Some(String::from("https://cdn/new.png")),
        ..ParticipantPatch::default()
    };

    let updated: Participant = participant.apply(&patch).unwrap();
    assert_eq!(participant.replaced_photo(&updated), Some("https://cdn/old.png"));
}

#[test]
fn test_replaced_photo_same_url_is_kept() {
    let participant: Participant = create_test_participant(Some("https://cdn/old.png"));
    let patch: ParticipantPatch = ParticipantPatch {
        photo: Some(String::from("https://cdn/old.png")),
        ..ParticipantPatch::default()
    };

    let updated: Participant = participant.apply(&patch).unwrap();
    assert_eq!(participant.replaced_photo(&updated), None);
}

#[test]
fn test_new_vote_rejects_non_positive_count() {
    let result: Result<NewVote, DomainError> =
        NewVote::new(ContestId::new(1), 10, 0, "Fan", None);
    assert!(matches!(result, Err(DomainError::InvalidVoteCount(0))));
}

#[test]
fn test_new_vote_rejects_blank_voter() {
    let result: Result<NewVote, DomainError> =
        NewVote::new(ContestId::new(1), 10, 2, " ", None);
    assert!(matches!(result, Err(DomainError::MissingField("voterName"))));
}

#[test]
fn test_new_vote_keeps_reference() {
    let reference: PaymentReference = PaymentReference::parse("T-100").unwrap();
    let vote: NewVote =
        NewVote::new(ContestId::new(1), 10, 5, "Fan", Some(reference.clone())).unwrap();
    assert_eq!(vote.vote_count(), 5);
    assert_eq!(vote.payment_reference(), Some(&reference));
}

#[test]
fn test_new_participant_rejects_oversized_email() {
    let email: String = format!("{}@example.com", "a".repeat(MAX_TEXT_LENGTH));
    assert!(matches!(
        NewParticipant::new("Ada", &email, "about", None),
        Err(DomainError::FieldTooLong { field: "email", .. })
    ));
}

#[test]
fn test_new_participant_rejects_oversized_photo_url() {
    let photo: String = format!("https://cdn.example.com/{}", "p".repeat(MAX_PHOTO_URL_LENGTH));
    assert!(matches!(
        NewParticipant::new("Ada", "ada@example.com", "about", Some(&photo)),
        Err(DomainError::FieldTooLong { field: "photo", .. })
    ));
}

#[test]
fn test_participant_patch_rejects_oversized_name() {
    let participant: Participant = create_test_participant(None);
    let patch: ParticipantPatch = ParticipantPatch {
        full_name: Some("n".repeat(MAX_TEXT_LENGTH + 1)),
        ..ParticipantPatch::default()
    };
    assert!(matches!(
        participant.apply(&patch),
        Err(DomainError::FieldTooLong { field: "fullName", .. })
    ));
}

#[test]
fn test_new_vote_rejects_oversized_voter() {
    let result: Result<NewVote, DomainError> =
        NewVote::new(ContestId::new(1), 10, 2, &"v".repeat(MAX_TEXT_LENGTH + 1), None);
    assert!(matches!(
        result,
        Err(DomainError::FieldTooLong { field: "voterName", .. })
    ));
}
