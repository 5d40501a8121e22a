use serde::{Deserialize, Serialize};

use crate::model::common::Voter;

/// A row of the `users` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterDoc {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    /// The public login identifier.
    pub voter_id: String,
    pub has_voted: bool,
}

impl From<VoterDoc> for Voter {
    fn from(doc: VoterDoc) -> Self {
        Self {
            id: doc.id.into(),
            name: doc.name,
            email: doc.email,
            login_id: doc.voter_id,
            has_voted: doc.has_voted,
        }
    }
}

impl From<Voter> for VoterDoc {
    fn from(voter: Voter) -> Self {
        Self {
            id: voter.id.into(),
            name: voter.name,
            email: voter.email,
            voter_id: voter.login_id,
            has_voted: voter.has_voted,
        }
    }
}
