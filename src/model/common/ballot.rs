use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BallotId, CandidateId, VoterId};

/// The durable record of one voter's choice. Never mutated once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    pub id: BallotId,
    pub voter_id: VoterId,
    pub candidate_id: CandidateId,
    pub timestamp: DateTime<Utc>,
}
