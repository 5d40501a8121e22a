use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::common::Candidate;
use crate::store::BallotStore;

/// One candidate and the number of ballots cast for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateCount {
    pub candidate: Candidate,
    pub count: u64,
}

/// A results row ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEntry {
    pub candidate: Candidate,
    pub count: u64,
    /// Share of all votes, rounded to the nearest whole percent.
    pub percentage: u64,
}

/// The full results dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultsSummary {
    pub total_votes: u64,
    pub entries: Vec<ResultEntry>,
}

/// `count` as a whole percentage of `total`, halves rounded up.
/// Zero when there are no votes at all.
pub fn percentage(count: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    (count * 200 + total) / (total * 2)
}

/// Stateless view over the ballot store: per-candidate counts joined onto the
/// catalog.
pub struct ResultsAggregator<'s, S: ?Sized> {
    store: &'s S,
}

impl<'s, S> ResultsAggregator<'s, S>
where
    S: BallotStore + ?Sized,
{
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// Every catalog candidate with their ballot count, most votes first.
    /// Candidates without ballots count zero; ties keep catalog order.
    pub async fn compute_results(&self) -> Result<Vec<CandidateCount>> {
        let (results, _) = self.counts().await?;
        Ok(results)
    }

    /// [`Self::compute_results`] with totals and percentages.
    ///
    /// `total_votes` is every ballot on record, including ballots for
    /// candidates no longer in the catalog; those have no entry of their own.
    pub async fn summary(&self) -> Result<ResultsSummary> {
        let (results, orphaned) = self.counts().await?;
        let total_votes = results.iter().map(|r| r.count).sum::<u64>() + orphaned;
        let entries = results
            .into_iter()
            .map(|r| ResultEntry {
                percentage: percentage(r.count, total_votes),
                candidate: r.candidate,
                count: r.count,
            })
            .collect();
        Ok(ResultsSummary {
            total_votes,
            entries,
        })
    }

    /// Catalog counts, sorted, plus the number of ballots for candidates
    /// outside the catalog.
    async fn counts(&self) -> Result<(Vec<CandidateCount>, u64)> {
        let mut tally = self.store.tally_by_candidate().await?;
        let candidates = self.store.list_candidates().await?;

        let mut results = candidates
            .into_iter()
            .map(|candidate| CandidateCount {
                count: tally.remove(&candidate.id).unwrap_or(0),
                candidate,
            })
            .collect::<Vec<_>>();

        // Whatever is left refers to candidates outside the catalog.
        let mut orphaned = 0;
        for (candidate_id, count) in tally {
            warn!("{count} ballot(s) for unknown candidate {candidate_id} have no results entry");
            orphaned += count;
        }

        // Stable, so equal counts stay in catalog order.
        results.sort_by(|a, b| b.count.cmp(&a.count));
        Ok((results, orphaned))
    }
}

#[cfg(test)]
mod tests {
    use crate::model::common::{CandidateId, VoterId};
    use crate::service::VotingService;
    use crate::store::{seed, MemoryStore};

    use super::*;

    fn ids(results: &[CandidateCount]) -> Vec<&str> {
        results.iter().map(|r| r.candidate.id.as_str()).collect()
    }

    #[test]
    fn percentages() {
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(5, 0), 0);
        assert_eq!(percentage(1, 1), 100);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 8), 13); // 12.5 rounds up
        assert_eq!(percentage(1, 200), 1); // 0.5 rounds up
        assert_eq!(percentage(1, 201), 0);
    }

    #[rocket::async_test]
    async fn no_ballots() {
        let store = MemoryStore::with_data(
            seed::voters(),
            seed::candidates(),
            Vec::new(),
            seed::elections(),
        );
        let summary = ResultsAggregator::new(&store).summary().await.unwrap();

        assert_eq!(summary.total_votes, 0);
        assert_eq!(summary.entries.len(), 4);
        assert!(summary.entries.iter().all(|e| e.count == 0 && e.percentage == 0));
        // All tied, so catalog order.
        let order: Vec<_> = summary
            .entries
            .iter()
            .map(|e| e.candidate.id.as_str())
            .collect();
        assert_eq!(order, ["party-1", "party-2", "party-3", "party-4"]);
    }

    #[rocket::async_test]
    async fn sorted_by_count_with_catalog_tie_break() {
        let store = MemoryStore::seeded();
        for (voter, party) in [("user-1", "party-3"), ("user-3", "party-3"), ("user-4", "party-2")] {
            store
                .cast_ballot(&VoterId::from(voter), &CandidateId::from(party))
                .await
                .unwrap();
        }

        let results = ResultsAggregator::new(&store).compute_results().await.unwrap();
        assert_eq!(ids(&results), ["party-3", "party-1", "party-2", "party-4"]);
        let counts: Vec<_> = results.iter().map(|r| r.count).collect();
        assert_eq!(counts, [2, 1, 1, 0]);
    }

    #[rocket::async_test]
    async fn vote_increments_candidate() {
        let store = MemoryStore::seeded();
        let aggregator = ResultsAggregator::new(&store);
        let count_for = |results: &[CandidateCount], id: &str| {
            results
                .iter()
                .find(|r| r.candidate.id.as_str() == id)
                .map(|r| r.count)
                .unwrap()
        };

        let before = count_for(&aggregator.compute_results().await.unwrap(), "party-1");
        VotingService::new(&store)
            .cast_vote(&"user-1".into(), &"party-1".into())
            .await
            .unwrap();
        let after = count_for(&aggregator.compute_results().await.unwrap(), "party-1");
        assert_eq!(after, before + 1);
    }

    #[rocket::async_test]
    async fn totals_match_ballots_and_percentages_sum() {
        let store = MemoryStore::seeded();
        let service = VotingService::new(&store);
        for (voter, party) in [("user-1", "party-2"), ("user-3", "party-4"), ("user-4", "party-4")] {
            service
                .cast_vote(&voter.into(), &party.into())
                .await
                .unwrap();
        }

        let summary = ResultsAggregator::new(&store).summary().await.unwrap();
        assert_eq!(summary.total_votes as usize, store.ballot_count().await);
        let percent: u64 = summary.entries.iter().map(|e| e.percentage).sum();
        // Rounding each entry can drift by up to half a percent per candidate.
        assert!((98..=102).contains(&percent), "percentages sum to {percent}");
    }

    #[rocket::async_test]
    async fn ballots_for_unknown_candidates_count_towards_total() {
        let store = MemoryStore::seeded();
        store
            .cast_ballot(&"user-1".into(), &"party-99".into())
            .await
            .unwrap();

        let aggregator = ResultsAggregator::new(&store);
        let results = aggregator.compute_results().await.unwrap();
        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|r| r.candidate.id.as_str() != "party-99"));

        let summary = aggregator.summary().await.unwrap();
        assert_eq!(summary.entries.len(), 4);
        assert_eq!(summary.total_votes, 2);
        assert_eq!(summary.total_votes as usize, store.ballot_count().await);
        assert_eq!(summary.entries[0].percentage, 50);
    }
}
