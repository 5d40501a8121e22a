use chrono::{DateTime, Utc};
use mongodb::bson::{self, oid::ObjectId, serde_helpers::chrono_datetime_as_bson_datetime};
use serde::{Deserialize, Serialize};

use crate::model::common::{Ballot, CandidateId, VoterId};

/// A row of the `votes` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotDoc {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub party_id: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub timestamp: DateTime<Utc>,
}

impl BallotDoc {
    /// A fresh ballot with a new ID, stamped with the current time at the
    /// millisecond precision MongoDB stores.
    pub fn new(voter_id: &VoterId, candidate_id: &CandidateId) -> Self {
        Self {
            id: ObjectId::new().to_hex(),
            user_id: voter_id.to_string(),
            party_id: candidate_id.to_string(),
            timestamp: bson::DateTime::now().to_chrono(),
        }
    }
}

impl From<BallotDoc> for Ballot {
    fn from(doc: BallotDoc) -> Self {
        Self {
            id: doc.id.into(),
            voter_id: doc.user_id.into(),
            candidate_id: doc.party_id.into(),
            timestamp: doc.timestamp,
        }
    }
}

impl From<Ballot> for BallotDoc {
    fn from(ballot: Ballot) -> Self {
        Self {
            id: ballot.id.into(),
            user_id: ballot.voter_id.into(),
            party_id: ballot.candidate_id.into(),
            timestamp: ballot.timestamp,
        }
    }
}
