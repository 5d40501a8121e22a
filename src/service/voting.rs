use log::{debug, info, warn};

use crate::error::{Error, Result};
use crate::model::common::{Ballot, Candidate, CandidateId, Voter, VoterId};
use crate::store::{StoreError, VotingStore};

/// Voter login, eligibility and ballot casting over a [`VotingStore`].
///
/// Holds no state of its own: every call reads the store of record.
pub struct VotingService<'s, S: ?Sized> {
    store: &'s S,
}

impl<'s, S> VotingService<'s, S>
where
    S: VotingStore + ?Sized,
{
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// Resolve a login identifier to its voter. Nothing is mutated.
    pub async fn login(&self, login_id: &str) -> Result<Voter> {
        let login_id = login_id.trim();
        if login_id.is_empty() {
            return Err(Error::invalid_input("Login ID must not be empty"));
        }
        match self.store.find_voter_by_login_id(login_id).await? {
            Some(voter) => {
                info!("Voter {} logged in", voter.id);
                Ok(voter)
            }
            None => {
                warn!("Login attempt with unknown ID '{login_id}'");
                Err(Error::not_found(format!("Voter with login ID '{login_id}'")))
            }
        }
    }

    /// Fresh copy of a voter from the store.
    pub async fn voter(&self, voter_id: &VoterId) -> Result<Voter> {
        self.store
            .find_voter(voter_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("Voter '{voter_id}'")))
    }

    /// Cast the voter's single ballot, returning it with the chosen candidate.
    ///
    /// Eligibility is decided by the voter's has-voted flag alone. No ballot
    /// is written unless the voter exists, is eligible, and the candidate is
    /// in the catalog.
    pub async fn cast_vote(
        &self,
        voter_id: &VoterId,
        candidate_id: &CandidateId,
    ) -> Result<(Ballot, Candidate)> {
        if voter_id.is_blank() {
            return Err(Error::invalid_input("Voter ID must not be empty"));
        }
        if candidate_id.is_blank() {
            return Err(Error::invalid_input("Candidate ID must not be empty"));
        }

        // Verify.
        let voter = self.voter(voter_id).await?;

        // Check eligibility.
        if voter.has_voted {
            warn!("Voter {voter_id} tried to vote again");
            return Err(Error::AlreadyVoted(format!("Voter '{voter_id}'")));
        }

        // Check the choice.
        let candidate = self
            .store
            .find_candidate(candidate_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("Candidate '{candidate_id}'")))?;

        // Record and finalize.
        let ballot = match self.store.record_vote(voter_id, candidate_id).await {
            Ok(ballot) => ballot,
            Err(StoreError::Duplicate(msg)) => {
                warn!("Store rejected a second ballot for voter {voter_id}");
                return Err(Error::AlreadyVoted(msg));
            }
            Err(e) => return Err(e.into()),
        };

        info!(
            "Accepted ballot {} from voter {voter_id} for {candidate_id}",
            ballot.id
        );
        Ok((ballot, candidate))
    }

    /// The voter's recorded ballot together with the chosen candidate.
    ///
    /// `None` if the voter has no ballot, or the candidate has since left the
    /// catalog.
    pub async fn voter_ballot(&self, voter_id: &VoterId) -> Result<Option<(Ballot, Candidate)>> {
        let Some(ballot) = self
            .store
            .list_ballots_by_voter(voter_id)
            .await?
            .into_iter()
            .next()
        else {
            debug!("Voter {voter_id} has no ballot on record");
            return Ok(None);
        };
        let candidate = self.store.find_candidate(&ballot.candidate_id).await?;
        Ok(candidate.map(|candidate| (ballot, candidate)))
    }
}
