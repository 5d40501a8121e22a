//! MongoDB document shapes.
//!
//! These mirror the hosted tables the web client was first written against
//! (`users`, `parties`, `votes`, `elections`), including their column names.
//! Conversions to and from the canonical types live here and nowhere else.
//!
//! IDs are stored as plain strings and datetimes in MongoDB's own format.

mod ballot;
mod candidate;
mod election;
mod voter;

pub use ballot::BallotDoc;
pub use candidate::CandidateDoc;
pub use election::ElectionDoc;
pub use voter::VoterDoc;
