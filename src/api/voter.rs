use rocket::{serde::json::Json, Route};

use crate::{
    error::{Error, Result},
    model::{
        api::{
            auth::AuthToken,
            ballot::{Receipt, VoteRequest, VoterBallot},
        },
        common::Voter,
    },
    service::VotingService,
    store::{ElectionStore, Store},
};

pub fn routes() -> Vec<Route> {
    routes![current_voter, voter_ballot, vote]
}

/// The logged-in voter, freshly read so the has-voted flag is current.
#[get("/voter")]
async fn current_voter(token: AuthToken, store: Store) -> Result<Json<Voter>> {
    let voter = VotingService::new(&*store).voter(token.voter_id()).await?;
    Ok(Json(voter))
}

#[get("/voter/ballot")]
async fn voter_ballot(token: AuthToken, store: Store) -> Result<Json<VoterBallot>> {
    VotingService::new(&*store)
        .voter_ballot(token.voter_id())
        .await?
        .map(|found| Json(found.into()))
        .ok_or_else(|| Error::not_found(format!("Ballot for voter '{}'", token.voter_id())))
}

#[post("/voter/vote", data = "<request>", format = "json")]
async fn vote(
    token: AuthToken,
    request: Json<VoteRequest>,
    store: Store,
) -> Result<Json<Receipt>> {
    if store.active_election().await?.is_none() {
        return Err(Error::NoActiveElection);
    }

    let (ballot, candidate) = VotingService::new(&*store)
        .cast_vote(token.voter_id(), &request.candidate_id)
        .await?;
    Ok(Json(Receipt::new(ballot, candidate)))
}
