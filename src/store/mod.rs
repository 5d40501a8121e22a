//! Injectable storage for voters, candidates, ballots and elections.
//!
//! The core only ever talks to the traits in this module. Two backings exist:
//! [`MemoryStore`] for tests and local runs, and [`MongoStore`] for production.

use std::collections::HashMap;
use std::ops::Deref;
use std::sync::Arc;

use log::error;
use rocket::{
    http::Status,
    request::{self, FromRequest, Request},
};

use crate::model::common::{Ballot, Candidate, CandidateId, Election, ElectionId, Voter, VoterId};

mod error;
#[cfg(test)]
mod faulty;
mod memory;
mod mongo;
pub mod seed;

pub use error::{StoreError, StoreResult};
#[cfg(test)]
pub use faulty::{Fault, FaultyStore};
pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// Voter records and their has-voted flag.
#[rocket::async_trait]
pub trait IdentityStore: Send + Sync {
    /// Exact, case-sensitive lookup by public login identifier, ignoring
    /// surrounding whitespace.
    async fn find_voter_by_login_id(&self, login_id: &str) -> StoreResult<Option<Voter>>;

    async fn find_voter(&self, voter_id: &VoterId) -> StoreResult<Option<Voter>>;

    /// Persist the has-voted flag and return the updated voter.
    /// Idempotent; fails with [`StoreError::NotFound`] for an unknown voter.
    async fn set_voted(&self, voter_id: &VoterId, has_voted: bool) -> StoreResult<Voter>;
}

/// The candidate catalog and the collection of cast ballots.
#[rocket::async_trait]
pub trait BallotStore: Send + Sync {
    /// All candidates, in the backing's stable catalog order.
    async fn list_candidates(&self) -> StoreResult<Vec<Candidate>>;

    async fn find_candidate(&self, candidate_id: &CandidateId) -> StoreResult<Option<Candidate>>;

    /// Append a fresh ballot stamped with the current time.
    ///
    /// Does not look for earlier ballots by the same voter; that is the
    /// caller's job.
    async fn cast_ballot(&self, voter_id: &VoterId, candidate_id: &CandidateId)
        -> StoreResult<Ballot>;

    async fn list_ballots(&self) -> StoreResult<Vec<Ballot>>;

    async fn list_ballots_by_voter(&self, voter_id: &VoterId) -> StoreResult<Vec<Ballot>>;

    /// Ballot count per candidate. Candidates without ballots are absent.
    async fn tally_by_candidate(&self) -> StoreResult<HashMap<CandidateId, u64>>;
}

/// Read-only access to elections.
#[rocket::async_trait]
pub trait ElectionStore: Send + Sync {
    async fn list_elections(&self) -> StoreResult<Vec<Election>>;

    async fn find_election(&self, election_id: &ElectionId) -> StoreResult<Option<Election>>;

    /// The currently active election, if there is one.
    async fn active_election(&self) -> StoreResult<Option<Election>>;
}

/// Everything the voting workflow needs from a backing.
#[rocket::async_trait]
pub trait VotingStore: IdentityStore + BallotStore + ElectionStore {
    /// Record a ballot and then flag its voter as having voted.
    ///
    /// This default runs the two writes one after the other. If the flag
    /// update fails, the ballot stays recorded and the voter stays unflagged;
    /// the error is returned unchanged. Backings that can do better override
    /// this with an atomic version.
    async fn record_vote(
        &self,
        voter_id: &VoterId,
        candidate_id: &CandidateId,
    ) -> StoreResult<Ballot> {
        let ballot = self.cast_ballot(voter_id, candidate_id).await?;
        if let Err(e) = self.set_voted(voter_id, true).await {
            error!(
                "Ballot {} recorded but voter {voter_id} could not be flagged: {e}",
                ballot.id
            );
            return Err(e);
        }
        Ok(ballot)
    }
}

/// Shared handle on the configured store. Lives in managed state and is
/// available to handlers as a request guard.
#[derive(Clone)]
pub struct Store(Arc<dyn VotingStore>);

impl Store {
    pub fn new(store: impl VotingStore + 'static) -> Self {
        Self(Arc::new(store))
    }
}

impl Deref for Store {
    type Target = dyn VotingStore;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Store {
    type Error = ();

    /// Fails with a server error iff no [`Store`] is managed by the instance.
    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        match req.rocket().state::<Store>() {
            Some(store) => request::Outcome::Success(store.clone()),
            None => {
                error!("No store is managed by this instance");
                request::Outcome::Failure((Status::InternalServerError, ()))
            }
        }
    }
}
