// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::identifiers::CodeName;
use crate::types::Participant;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Vote total for a single participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantResult {
    pub code_name: CodeName,
    pub name: String,
    pub total_votes: u64,
    pub evicted: bool,
}

/// Folds per-vote counts into per-participant totals.
///
/// Every participant appears exactly once, in the order given, with a
/// total of zero when no vote references it. Counts for participants not
/// in `participants` are ignored.
#[must_use]
pub fn tally_results(
    participants: &[Participant],
    vote_counts: &[(i64, u32)],
) -> Vec<ParticipantResult> {
    let mut totals: HashMap<i64, u64> = HashMap::new();
    for (participant_id, count) in vote_counts {
        *totals.entry(*participant_id).or_insert(0) += u64::from(*count);
    }

    participants
        .iter()
        .map(|participant| ParticipantResult {
            code_name: participant.code_name.clone(),
            name: participant.full_name.clone(),
            total_votes: totals
                .get(&participant.participant_id)
                .copied()
                .unwrap_or(0),
            evicted: participant.is_evicted(),
        })
        .collect()
}
