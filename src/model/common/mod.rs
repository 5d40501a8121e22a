//! The canonical schema shared by every store backing and the API.
//!
//! Store adapters translate to and from these types at their own edge; nothing
//! above the store layer sees a backend-specific shape.

mod ballot;
mod candidate;
mod election;
mod id;
mod voter;

pub use ballot::Ballot;
pub use candidate::Candidate;
pub use election::Election;
pub use id::{BallotId, CandidateId, ElectionId, VoterId};
pub use voter::Voter;
