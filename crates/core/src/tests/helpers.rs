// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory store and recording media host used by the registry tests.

use crate::{ContestDeletion, ContestStore, MediaError, MediaStore, StoreError, UniqueConstraint};
use contest_vote_domain::{
    CodeName, Contest, ContestId, NewContest, NewParticipant, NewVote, Participant,
    ParticipantStatus, Vote,
};
use std::sync::Mutex;
use time::OffsetDateTime;
use time::macros::datetime;

pub const VALID_ABOUT: &str =
    "Sings soprano with the city choir and has performed at three national festivals.";

pub fn march_start() -> OffsetDateTime {
    datetime!(2026-03-01 0:00 UTC)
}

pub fn march_end() -> OffsetDateTime {
    datetime!(2026-03-31 0:00 UTC)
}

/// A store that enforces the same uniqueness and eviction rules as the
/// relational implementation, without transactions.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    pub contests: Vec<Contest>,
    pub participants: Vec<Participant>,
    pub votes: Vec<Vote>,
    next_id: i64,
}

impl InMemoryStore {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    /// Evicts a participant behind the registry's back.
    pub fn force_evict(&mut self, participant_id: i64) {
        for participant in &mut self.participants {
            if participant.participant_id == participant_id {
                participant.status = ParticipantStatus::Evicted;
            }
        }
    }
}

impl ContestStore for InMemoryStore {
    fn insert_contest(&mut self, contest: &NewContest) -> Result<Contest, StoreError> {
        let id: i64 = self.next_id();
        let stored: Contest = Contest {
            contest_id: ContestId::new(id),
            name: contest.name().to_string(),
            start_date: contest.start_date(),
            end_date: contest.end_date(),
            created_at: format!("t{id}"),
        };
        self.contests.push(stored.clone());
        Ok(stored)
    }

    fn find_contest(&mut self, contest_id: ContestId) -> Result<Option<Contest>, StoreError> {
        Ok(self
            .contests
            .iter()
            .find(|c| c.contest_id == contest_id)
            .cloned())
    }

    fn list_contests(&mut self) -> Result<Vec<Contest>, StoreError> {
        let mut contests: Vec<Contest> = self.contests.clone();
        contests.sort_by(|a, b| b.contest_id.cmp(&a.contest_id));
        Ok(contests)
    }

    fn update_contest(&mut self, contest: &Contest) -> Result<Contest, StoreError> {
        let slot: &mut Contest = self
            .contests
            .iter_mut()
            .find(|c| c.contest_id == contest.contest_id)
            .ok_or_else(|| StoreError::NotFound {
                entity: "Contest",
                key: contest.contest_id.to_string(),
            })?;
        slot.name.clone_from(&contest.name);
        slot.start_date = contest.start_date;
        slot.end_date = contest.end_date;
        Ok(slot.clone())
    }

    fn delete_contest_cascade(
        &mut self,
        contest_id: ContestId,
    ) -> Result<ContestDeletion, StoreError> {
        if !self.contests.iter().any(|c| c.contest_id == contest_id) {
            return Err(StoreError::NotFound {
                entity: "Contest",
                key: contest_id.to_string(),
            });
        }

        let photos: Vec<String> = self
            .participants
            .iter()
            .filter(|p| p.contest_id == contest_id)
            .filter_map(|p| p.photo.clone())
            .collect();

        let votes_before: usize = self.votes.len();
        self.votes.retain(|v| v.contest_id != contest_id);
        let participants_before: usize = self.participants.len();
        self.participants.retain(|p| p.contest_id != contest_id);
        self.contests.retain(|c| c.contest_id != contest_id);

        Ok(ContestDeletion {
            participants_removed: participants_before - self.participants.len(),
            votes_removed: votes_before - self.votes.len(),
            photos,
        })
    }

    fn latest_code_name(&mut self, contest_id: ContestId) -> Result<Option<CodeName>, StoreError> {
        Ok(self
            .participants
            .iter()
            .filter(|p| p.contest_id == contest_id)
            .max_by_key(|p| p.participant_id)
            .map(|p| p.code_name.clone()))
    }

    fn insert_participant(
        &mut self,
        contest_id: ContestId,
        code_name: &CodeName,
        participant: &NewParticipant,
    ) -> Result<Participant, StoreError> {
        if self.participants.iter().any(|p| p.email == participant.email()) {
            return Err(StoreError::UniqueViolation(
                UniqueConstraint::ParticipantEmail,
            ));
        }
        if self.participants.iter().any(|p| &p.code_name == code_name) {
            return Err(StoreError::UniqueViolation(
                UniqueConstraint::ParticipantCodeName,
            ));
        }

        let id: i64 = self.next_id();
        let stored: Participant = Participant {
            participant_id: id,
            code_name: code_name.clone(),
            full_name: participant.full_name().to_string(),
            email: participant.email().to_string(),
            about: participant.about().to_string(),
            photo: participant.photo().map(str::to_string),
            contest_id,
            status: ParticipantStatus::Active,
            created_at: format!("t{id}"),
        };
        self.participants.push(stored.clone());
        Ok(stored)
    }

    fn find_participant(&mut self, code_name: &CodeName) -> Result<Option<Participant>, StoreError> {
        Ok(self
            .participants
            .iter()
            .find(|p| &p.code_name == code_name)
            .cloned())
    }

    fn list_participants(
        &mut self,
        contest_id: ContestId,
    ) -> Result<Vec<Participant>, StoreError> {
        let mut participants: Vec<Participant> = self
            .participants
            .iter()
            .filter(|p| p.contest_id == contest_id)
            .cloned()
            .collect();
        participants.sort_by(|a, b| {
            a.is_evicted()
                .cmp(&b.is_evicted())
                .then(b.participant_id.cmp(&a.participant_id))
        });
        Ok(participants)
    }

    fn update_participant(
        &mut self,
        participant: &Participant,
    ) -> Result<Participant, StoreError> {
        if self.participants.iter().any(|p| {
            p.participant_id != participant.participant_id && p.email == participant.email
        }) {
            return Err(StoreError::UniqueViolation(
                UniqueConstraint::ParticipantEmail,
            ));
        }

        let slot: &mut Participant = self
            .participants
            .iter_mut()
            .find(|p| p.participant_id == participant.participant_id)
            .ok_or_else(|| StoreError::NotFound {
                entity: "Participant",
                key: participant.code_name.to_string(),
            })?;
        slot.full_name.clone_from(&participant.full_name);
        slot.email.clone_from(&participant.email);
        slot.about.clone_from(&participant.about);
        slot.photo.clone_from(&participant.photo);
        Ok(slot.clone())
    }

    fn mark_evicted(&mut self, participant_id: i64) -> Result<bool, StoreError> {
        let slot: Option<&mut Participant> = self
            .participants
            .iter_mut()
            .find(|p| p.participant_id == participant_id && !p.is_evicted());
        Ok(slot.is_some_and(|p| {
            p.status = ParticipantStatus::Evicted;
            true
        }))
    }

    fn delete_participant_cascade(&mut self, participant_id: i64) -> Result<usize, StoreError> {
        if !self
            .participants
            .iter()
            .any(|p| p.participant_id == participant_id)
        {
            return Err(StoreError::NotFound {
                entity: "Participant",
                key: participant_id.to_string(),
            });
        }
        let before: usize = self.votes.len();
        self.votes.retain(|v| v.participant_id != participant_id);
        self.participants
            .retain(|p| p.participant_id != participant_id);
        Ok(before - self.votes.len())
    }

    fn insert_vote(&mut self, vote: &NewVote) -> Result<Vote, StoreError> {
        let participant: &Participant = self
            .participants
            .iter()
            .find(|p| p.participant_id == vote.participant_id())
            .ok_or_else(|| StoreError::NotFound {
                entity: "Participant",
                key: vote.participant_id().to_string(),
            })?;
        if participant.is_evicted() {
            return Err(StoreError::ParticipantEvicted {
                participant_id: vote.participant_id(),
            });
        }
        let reference: Option<&str> = vote.payment_reference().map(|r| r.value());
        if reference.is_some()
            && self
                .votes
                .iter()
                .any(|v| v.payment_reference.as_deref() == reference)
        {
            return Err(StoreError::UniqueViolation(
                UniqueConstraint::PaymentReference,
            ));
        }

        let id: i64 = self.next_id();
        let stored: Vote = Vote {
            vote_id: id,
            contest_id: vote.contest_id(),
            participant_id: vote.participant_id(),
            vote_count: vote.vote_count(),
            voter_name: vote.voter_name().to_string(),
            payment_reference: vote.payment_reference().map(|r| r.value().to_string()),
            created_at: format!("t{id}"),
        };
        self.votes.push(stored.clone());
        Ok(stored)
    }

    fn list_votes_for_participant(
        &mut self,
        participant_id: i64,
    ) -> Result<Vec<Vote>, StoreError> {
        Ok(self
            .votes
            .iter()
            .filter(|v| v.participant_id == participant_id)
            .cloned()
            .collect())
    }

    fn contest_vote_counts(
        &mut self,
        contest_id: ContestId,
    ) -> Result<Vec<(i64, u32)>, StoreError> {
        Ok(self
            .votes
            .iter()
            .filter(|v| v.contest_id == contest_id)
            .map(|v| (v.participant_id, v.vote_count))
            .collect())
    }
}

/// Media host that records every deletion request and can be told to fail.
#[derive(Debug, Default)]
pub struct RecordingMediaStore {
    pub deleted: Mutex<Vec<String>>,
    pub fail: bool,
}

impl RecordingMediaStore {
    pub fn failing() -> Self {
        Self {
            deleted: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn deleted_urls(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

impl MediaStore for RecordingMediaStore {
    fn delete_by_url(&self, url: &str) -> Result<(), MediaError> {
        self.deleted.lock().unwrap().push(url.to_string());
        if self.fail {
            return Err(MediaError {
                url: url.to_string(),
                reason: String::from("media host unavailable"),
            });
        }
        Ok(())
    }
}

pub fn create_contest(store: &mut InMemoryStore) -> Contest {
    crate::ContestRegistry::new(store)
        .create("Spring Showcase", march_start(), march_end())
        .unwrap()
}

pub fn create_participant(
    store: &mut InMemoryStore,
    contest_id: ContestId,
    email: &str,
    photo: Option<&str>,
) -> Participant {
    crate::ParticipantRegistry::new(store)
        .create(contest_id, "Ada Obi", email, VALID_ABOUT, photo)
        .unwrap()
}
