use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use log::debug;
use mongodb::bson::oid::ObjectId;
use rocket::tokio::sync::RwLock;

use crate::model::common::{
    Ballot, BallotId, Candidate, CandidateId, Election, ElectionId, Voter, VoterId,
};

use super::{
    seed, BallotStore, ElectionStore, IdentityStore, StoreError, StoreResult, VotingStore,
};

#[derive(Debug, Default)]
struct Tables {
    voters: Vec<Voter>,
    candidates: Vec<Candidate>,
    ballots: Vec<Ballot>,
    elections: Vec<Election>,
}

impl Tables {
    fn voter_mut(&mut self, voter_id: &VoterId) -> StoreResult<&mut Voter> {
        self.voters
            .iter_mut()
            .find(|v| &v.id == voter_id)
            .ok_or_else(|| StoreError::not_found(format!("Voter '{voter_id}'")))
    }

    fn new_ballot(&mut self, voter_id: &VoterId, candidate_id: &CandidateId) -> Ballot {
        let ballot = Ballot {
            id: BallotId::new(ObjectId::new().to_hex()),
            voter_id: voter_id.clone(),
            candidate_id: candidate_id.clone(),
            timestamp: Utc::now(),
        };
        self.ballots.push(ballot.clone());
        ballot
    }
}

/// A store held entirely in process memory.
///
/// Clones share the same tables, so a clone handed to a Rocket instance can
/// still be inspected from a test.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with the demo data from [`seed`].
    pub fn seeded() -> Self {
        Self::with_data(
            seed::voters(),
            seed::candidates(),
            seed::ballots(),
            seed::elections(),
        )
    }

    pub fn with_data(
        voters: Vec<Voter>,
        candidates: Vec<Candidate>,
        ballots: Vec<Ballot>,
        elections: Vec<Election>,
    ) -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables {
                voters,
                candidates,
                ballots,
                elections,
            })),
        }
    }

    /// Number of ballots on record.
    pub async fn ballot_count(&self) -> usize {
        self.tables.read().await.ballots.len()
    }
}

#[rocket::async_trait]
impl IdentityStore for MemoryStore {
    async fn find_voter_by_login_id(&self, login_id: &str) -> StoreResult<Option<Voter>> {
        debug!("Looking up voter by login ID '{}'", login_id.trim());
        let tables = self.tables.read().await;
        Ok(tables
            .voters
            .iter()
            .find(|v| v.matches_login_id(login_id))
            .cloned())
    }

    async fn find_voter(&self, voter_id: &VoterId) -> StoreResult<Option<Voter>> {
        let tables = self.tables.read().await;
        Ok(tables.voters.iter().find(|v| &v.id == voter_id).cloned())
    }

    async fn set_voted(&self, voter_id: &VoterId, has_voted: bool) -> StoreResult<Voter> {
        let mut tables = self.tables.write().await;
        let voter = tables.voter_mut(voter_id)?;
        voter.has_voted = has_voted;
        Ok(voter.clone())
    }
}

#[rocket::async_trait]
impl BallotStore for MemoryStore {
    async fn list_candidates(&self) -> StoreResult<Vec<Candidate>> {
        Ok(self.tables.read().await.candidates.clone())
    }

    async fn find_candidate(&self, candidate_id: &CandidateId) -> StoreResult<Option<Candidate>> {
        let tables = self.tables.read().await;
        Ok(tables
            .candidates
            .iter()
            .find(|c| &c.id == candidate_id)
            .cloned())
    }

    async fn cast_ballot(
        &self,
        voter_id: &VoterId,
        candidate_id: &CandidateId,
    ) -> StoreResult<Ballot> {
        Ok(self.tables.write().await.new_ballot(voter_id, candidate_id))
    }

    async fn list_ballots(&self) -> StoreResult<Vec<Ballot>> {
        Ok(self.tables.read().await.ballots.clone())
    }

    async fn list_ballots_by_voter(&self, voter_id: &VoterId) -> StoreResult<Vec<Ballot>> {
        let tables = self.tables.read().await;
        Ok(tables
            .ballots
            .iter()
            .filter(|b| &b.voter_id == voter_id)
            .cloned()
            .collect())
    }

    async fn tally_by_candidate(&self) -> StoreResult<HashMap<CandidateId, u64>> {
        let tables = self.tables.read().await;
        let mut tally = HashMap::new();
        for ballot in tables.ballots.iter() {
            *tally.entry(ballot.candidate_id.clone()).or_insert(0) += 1;
        }
        Ok(tally)
    }
}

#[rocket::async_trait]
impl ElectionStore for MemoryStore {
    async fn list_elections(&self) -> StoreResult<Vec<Election>> {
        Ok(self.tables.read().await.elections.clone())
    }

    async fn find_election(&self, election_id: &ElectionId) -> StoreResult<Option<Election>> {
        let tables = self.tables.read().await;
        Ok(tables
            .elections
            .iter()
            .find(|e| &e.id == election_id)
            .cloned())
    }

    async fn active_election(&self) -> StoreResult<Option<Election>> {
        let tables = self.tables.read().await;
        Ok(tables.elections.iter().find(|e| e.is_active).cloned())
    }
}

#[rocket::async_trait]
impl VotingStore for MemoryStore {
    /// Both writes happen under a single write lock. The flag is re-checked
    /// under that lock, so two concurrent votes by one voter cannot both land.
    async fn record_vote(
        &self,
        voter_id: &VoterId,
        candidate_id: &CandidateId,
    ) -> StoreResult<Ballot> {
        let mut tables = self.tables.write().await;
        if tables.voter_mut(voter_id)?.has_voted {
            return Err(StoreError::Duplicate(format!(
                "Voter '{voter_id}' already has a ballot"
            )));
        }
        let ballot = tables.new_ballot(voter_id, candidate_id);
        tables.voter_mut(voter_id)?.has_voted = true;
        Ok(ballot)
    }
}
