use serde::{Deserialize, Serialize};

use super::CandidateId;

/// A selectable option in an election (a party, in the client's language).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub logo_url: Option<String>,
    pub description: String,
}
