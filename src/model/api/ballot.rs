use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::common::{Ballot, BallotId, Candidate, CandidateId};

/// The candidate a voter wishes to vote for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRequest {
    pub candidate_id: CandidateId,
}

/// Proof handed back to the voter once their ballot is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub ballot_id: BallotId,
    pub candidate: Candidate,
    pub timestamp: DateTime<Utc>,
}

impl Receipt {
    pub fn new(ballot: Ballot, candidate: Candidate) -> Self {
        Self {
            ballot_id: ballot.id,
            candidate,
            timestamp: ballot.timestamp,
        }
    }
}

/// A voter's recorded ballot and who it was for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterBallot {
    pub ballot: Ballot,
    pub candidate: Candidate,
}

impl From<(Ballot, Candidate)> for VoterBallot {
    fn from((ballot, candidate): (Ballot, Candidate)) -> Self {
        Self { ballot, candidate }
    }
}
