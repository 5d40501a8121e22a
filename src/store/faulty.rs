use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::model::common::{Ballot, Candidate, CandidateId, Election, ElectionId, Voter, VoterId};

use super::{
    BallotStore, ElectionStore, IdentityStore, MemoryStore, StoreError, StoreResult, VotingStore,
};

/// Which store operation should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    CastBallot,
    SetVoted,
    /// Every candidate lookup after the first.
    RepeatCandidateLookup,
}

/// Wraps a [`MemoryStore`], failing one chosen operation and falling back to
/// the sequential [`VotingStore::record_vote`].
pub struct FaultyStore {
    inner: MemoryStore,
    fault: Fault,
    candidate_lookups: AtomicUsize,
}

impl FaultyStore {
    pub fn new(inner: MemoryStore, fault: Fault) -> Self {
        Self {
            inner,
            fault,
            candidate_lookups: AtomicUsize::new(0),
        }
    }

    fn failure() -> StoreError {
        StoreError::Backend("injected failure".to_string())
    }
}

#[rocket::async_trait]
impl IdentityStore for FaultyStore {
    async fn find_voter_by_login_id(&self, login_id: &str) -> StoreResult<Option<Voter>> {
        self.inner.find_voter_by_login_id(login_id).await
    }

    async fn find_voter(&self, voter_id: &VoterId) -> StoreResult<Option<Voter>> {
        self.inner.find_voter(voter_id).await
    }

    async fn set_voted(&self, voter_id: &VoterId, has_voted: bool) -> StoreResult<Voter> {
        if self.fault == Fault::SetVoted {
            return Err(Self::failure());
        }
        self.inner.set_voted(voter_id, has_voted).await
    }
}

#[rocket::async_trait]
impl BallotStore for FaultyStore {
    async fn list_candidates(&self) -> StoreResult<Vec<Candidate>> {
        self.inner.list_candidates().await
    }

    async fn find_candidate(&self, id: &CandidateId) -> StoreResult<Option<Candidate>> {
        let previous = self.candidate_lookups.fetch_add(1, Ordering::SeqCst);
        if self.fault == Fault::RepeatCandidateLookup && previous > 0 {
            return Err(Self::failure());
        }
        self.inner.find_candidate(id).await
    }

    async fn cast_ballot(
        &self,
        voter_id: &VoterId,
        candidate_id: &CandidateId,
    ) -> StoreResult<Ballot> {
        if self.fault == Fault::CastBallot {
            return Err(Self::failure());
        }
        self.inner.cast_ballot(voter_id, candidate_id).await
    }

    async fn list_ballots(&self) -> StoreResult<Vec<Ballot>> {
        self.inner.list_ballots().await
    }

    async fn list_ballots_by_voter(&self, voter_id: &VoterId) -> StoreResult<Vec<Ballot>> {
        self.inner.list_ballots_by_voter(voter_id).await
    }

    async fn tally_by_candidate(&self) -> StoreResult<HashMap<CandidateId, u64>> {
        self.inner.tally_by_candidate().await
    }
}

#[rocket::async_trait]
impl ElectionStore for FaultyStore {
    async fn list_elections(&self) -> StoreResult<Vec<Election>> {
        self.inner.list_elections().await
    }

    async fn find_election(&self, id: &ElectionId) -> StoreResult<Option<Election>> {
        self.inner.find_election(id).await
    }

    async fn active_election(&self) -> StoreResult<Option<Election>> {
        self.inner.active_election().await
    }
}

impl VotingStore for FaultyStore {}
