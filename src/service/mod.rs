//! The voting workflow and results aggregation, written against the store
//! traits only.

pub mod results;
pub mod voting;

pub use results::{CandidateCount, ResultEntry, ResultsAggregator, ResultsSummary};
pub use voting::VotingService;
