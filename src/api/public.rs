use rocket::{serde::json::Json, Route};

use crate::{
    error::{Error, Result},
    model::common::{Candidate, Election, ElectionId},
    service::{ResultsAggregator, ResultsSummary},
    store::{BallotStore, ElectionStore, Store},
};

pub fn routes() -> Vec<Route> {
    routes![candidates, results, elections, active_election, election]
}

#[get("/candidates")]
async fn candidates(store: Store) -> Result<Json<Vec<Candidate>>> {
    Ok(Json(store.list_candidates().await?))
}

#[get("/results")]
async fn results(store: Store) -> Result<Json<ResultsSummary>> {
    let summary = ResultsAggregator::new(&*store).summary().await?;
    Ok(Json(summary))
}

#[get("/elections")]
async fn elections(store: Store) -> Result<Json<Vec<Election>>> {
    Ok(Json(store.list_elections().await?))
}

/// The active election, or `null` if none is running.
#[get("/elections/active")]
async fn active_election(store: Store) -> Result<Json<Option<Election>>> {
    Ok(Json(store.active_election().await?))
}

#[get("/elections/<election_id>")]
async fn election(election_id: ElectionId, store: Store) -> Result<Json<Election>> {
    store
        .find_election(&election_id)
        .await?
        .map(Json)
        .ok_or_else(|| Error::not_found(format!("Election with ID '{election_id}'")))
}

#[cfg(test)]
mod tests {
    use rocket::{
        http::{ContentType, Status},
        local::asynchronous::Client,
        serde::json::serde_json::{self, json},
    };

    use crate::model::api::ballot::Receipt;
    use crate::model::common::CandidateId;

    use super::*;

    #[backend_test]
    async fn list_candidates_in_catalog_order(client: Client) {
        let response = client.get(uri!(candidates)).dispatch().await;
        assert_eq!(Status::Ok, response.status());

        let raw_response = response.into_string().await.unwrap();
        let fetched = serde_json::from_str::<Vec<Candidate>>(&raw_response).unwrap();
        let ids: Vec<_> = fetched.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["party-1", "party-2", "party-3", "party-4"]);
    }

    #[backend_test]
    async fn results_for_seeded_ballots(client: Client) {
        let response = client.get(uri!(results)).dispatch().await;
        assert_eq!(Status::Ok, response.status());

        let raw_response = response.into_string().await.unwrap();
        let summary = serde_json::from_str::<ResultsSummary>(&raw_response).unwrap();
        assert_eq!(summary.total_votes, 1);
        assert_eq!(summary.entries.len(), 4);
        assert_eq!(summary.entries[0].candidate.id, CandidateId::from("party-1"));
        assert_eq!(summary.entries[0].percentage, 100);
        assert!(summary.entries[1..].iter().all(|e| e.count == 0));
    }

    #[backend_test(voter)]
    async fn results_follow_votes(client: Client) {
        let response = client
            .post("/voter/vote")
            .header(ContentType::JSON)
            .body(json!({ "candidate_id": "party-3" }).to_string())
            .dispatch()
            .await;
        assert_eq!(Status::Ok, response.status());
        let raw_response = response.into_string().await.unwrap();
        serde_json::from_str::<Receipt>(&raw_response).unwrap();

        let response = client.get(uri!(results)).dispatch().await;
        let raw_response = response.into_string().await.unwrap();
        let summary = serde_json::from_str::<ResultsSummary>(&raw_response).unwrap();
        assert_eq!(summary.total_votes, 2);
        let ids: Vec<_> = summary
            .entries
            .iter()
            .map(|e| e.candidate.id.as_str())
            .collect();
        // Tied at one vote each, so catalog order.
        assert_eq!(ids, ["party-1", "party-3", "party-2", "party-4"]);
        assert_eq!(summary.entries[0].percentage, 50);
    }

    #[backend_test]
    async fn list_elections(client: Client) {
        let response = client.get(uri!(elections)).dispatch().await;
        assert_eq!(Status::Ok, response.status());

        let raw_response = response.into_string().await.unwrap();
        let fetched = serde_json::from_str::<Vec<Election>>(&raw_response).unwrap();
        assert_eq!(fetched.len(), 2);
        assert_eq!(fetched.iter().filter(|e| e.is_active).count(), 1);
    }

    #[backend_test]
    async fn get_active_election(client: Client) {
        let response = client.get(uri!(active_election)).dispatch().await;
        assert_eq!(Status::Ok, response.status());

        let raw_response = response.into_string().await.unwrap();
        let active = serde_json::from_str::<Option<Election>>(&raw_response)
            .unwrap()
            .unwrap();
        assert_eq!(active.id, ElectionId::from("election-1"));
    }

    #[backend_test]
    async fn get_election_by_id(client: Client) {
        let response = client.get("/elections/election-2").dispatch().await;
        assert_eq!(Status::Ok, response.status());
        let raw_response = response.into_string().await.unwrap();
        let fetched = serde_json::from_str::<Election>(&raw_response).unwrap();
        assert!(!fetched.is_active);

        let response = client.get("/elections/election-9").dispatch().await;
        assert_eq!(Status::NotFound, response.status());
    }
}
