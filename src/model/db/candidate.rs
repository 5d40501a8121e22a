use serde::{Deserialize, Serialize};

use crate::model::common::Candidate;

/// A row of the `parties` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateDoc {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub logo_url: Option<String>,
    pub description: String,
}

impl From<CandidateDoc> for Candidate {
    fn from(doc: CandidateDoc) -> Self {
        Self {
            id: doc.id.into(),
            name: doc.name,
            // The hosted table stored missing logos as empty strings.
            logo_url: doc.logo_url.filter(|url| !url.is_empty()),
            description: doc.description,
        }
    }
}

impl From<Candidate> for CandidateDoc {
    fn from(candidate: Candidate) -> Self {
        Self {
            id: candidate.id.into(),
            name: candidate.name,
            logo_url: candidate.logo_url,
            description: candidate.description,
        }
    }
}
