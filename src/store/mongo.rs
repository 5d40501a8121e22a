use std::collections::HashMap;

use log::{debug, info, warn};
use mongodb::{
    bson::{doc, Bson, Document},
    error::Error as DbError,
    options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument},
    Client, Database,
};
use rocket::futures::TryStreamExt;

use crate::model::{
    common::{Ballot, Candidate, CandidateId, Election, ElectionId, Voter, VoterId},
    db::{BallotDoc, CandidateDoc, ElectionDoc, VoterDoc},
    mongodb::{ensure_indexes_exist, is_duplicate_key_error, Coll},
};

use super::{
    seed, BallotStore, ElectionStore, IdentityStore, StoreError, StoreResult, VotingStore,
};

/// A store backed by a MongoDB database.
///
/// Vote recording uses a multi-document transaction, so the server must be
/// part of a replica set.
#[derive(Clone)]
pub struct MongoStore {
    client: Client,
    db: Database,
}

impl MongoStore {
    /// Connect to the server at `uri` and use the named database.
    pub async fn connect(uri: &str, db_name: &str) -> StoreResult<Self> {
        let client = Client::with_uri_str(uri).await?;
        Ok(Self::from_client(client, db_name))
    }

    pub fn from_client(client: Client, db_name: &str) -> Self {
        let db = client.database(db_name);
        Self { client, db }
    }

    /// Ensure indexes exist. Idempotent.
    pub async fn prepare(&self) -> StoreResult<()> {
        ensure_indexes_exist(&self.db).await?;
        Ok(())
    }

    /// Insert the demo data, unless there are already voters.
    /// Returns whether anything was inserted.
    pub async fn seed_if_empty(&self) -> StoreResult<bool> {
        if self.voters().count_documents(None, None).await? > 0 {
            debug!("Voters already present, skipping seed data");
            return Ok(false);
        }
        info!("Seeding database with demo data");
        self.voters()
            .insert_many(seed::voters().into_iter().map(VoterDoc::from), None)
            .await?;
        self.candidates()
            .insert_many(seed::candidates().into_iter().map(CandidateDoc::from), None)
            .await?;
        self.ballots()
            .insert_many(seed::ballots().into_iter().map(BallotDoc::from), None)
            .await?;
        self.elections()
            .insert_many(seed::elections().into_iter().map(ElectionDoc::from), None)
            .await?;
        Ok(true)
    }

    fn voters(&self) -> Coll<VoterDoc> {
        Coll::from_db(&self.db)
    }

    fn candidates(&self) -> Coll<CandidateDoc> {
        Coll::from_db(&self.db)
    }

    fn ballots(&self) -> Coll<BallotDoc> {
        Coll::from_db(&self.db)
    }

    fn elections(&self) -> Coll<ElectionDoc> {
        Coll::from_db(&self.db)
    }
}

/// Map an insert failure onto the store taxonomy.
fn insert_error(err: DbError, voter_id: &VoterId) -> StoreError {
    if is_duplicate_key_error(&err) {
        StoreError::Duplicate(format!("Voter '{voter_id}' already has a ballot"))
    } else {
        StoreError::Db(err)
    }
}

/// Read one `{ _id: <candidate>, count: <n> }` row of the tally pipeline.
fn tally_row(row: &Document) -> StoreResult<(CandidateId, u64)> {
    let candidate = row
        .get_str("_id")
        .map_err(|e| StoreError::Backend(format!("Malformed tally row: {e}")))?;
    let count = match row.get("count") {
        Some(Bson::Int32(n)) => u64::try_from(*n).ok(),
        Some(Bson::Int64(n)) => u64::try_from(*n).ok(),
        _ => None,
    }
    .ok_or_else(|| StoreError::Backend(format!("Malformed tally count: {row}")))?;
    Ok((CandidateId::from(candidate), count))
}

#[rocket::async_trait]
impl IdentityStore for MongoStore {
    async fn find_voter_by_login_id(&self, login_id: &str) -> StoreResult<Option<Voter>> {
        let login_id = login_id.trim();
        debug!("Looking up voter by login ID '{login_id}'");
        let voter = self
            .voters()
            .find_one(doc! { "voter_id": login_id }, None)
            .await?;
        Ok(voter.map(Voter::from))
    }

    async fn find_voter(&self, voter_id: &VoterId) -> StoreResult<Option<Voter>> {
        let voter = self
            .voters()
            .find_one(doc! { "_id": voter_id.as_str() }, None)
            .await?;
        Ok(voter.map(Voter::from))
    }

    async fn set_voted(&self, voter_id: &VoterId, has_voted: bool) -> StoreResult<Voter> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        self.voters()
            .find_one_and_update(
                doc! { "_id": voter_id.as_str() },
                doc! { "$set": { "has_voted": has_voted } },
                options,
            )
            .await?
            .map(Voter::from)
            .ok_or_else(|| StoreError::not_found(format!("Voter '{voter_id}'")))
    }
}

#[rocket::async_trait]
impl BallotStore for MongoStore {
    /// Candidates are ordered by ID.
    async fn list_candidates(&self) -> StoreResult<Vec<Candidate>> {
        let options = FindOptions::builder().sort(doc! { "_id": 1 }).build();
        let candidates: Vec<Candidate> = self
            .candidates()
            .find(None, options)
            .await?
            .map_ok(Candidate::from)
            .try_collect()
            .await?;
        Ok(candidates)
    }

    async fn find_candidate(&self, candidate_id: &CandidateId) -> StoreResult<Option<Candidate>> {
        let candidate = self
            .candidates()
            .find_one(doc! { "_id": candidate_id.as_str() }, None)
            .await?;
        Ok(candidate.map(Candidate::from))
    }

    async fn cast_ballot(
        &self,
        voter_id: &VoterId,
        candidate_id: &CandidateId,
    ) -> StoreResult<Ballot> {
        let ballot = BallotDoc::new(voter_id, candidate_id);
        self.ballots()
            .insert_one(&ballot, None)
            .await
            .map_err(|e| insert_error(e, voter_id))?;
        Ok(ballot.into())
    }

    async fn list_ballots(&self) -> StoreResult<Vec<Ballot>> {
        let ballots: Vec<Ballot> = self
            .ballots()
            .find(None, None)
            .await?
            .map_ok(Ballot::from)
            .try_collect()
            .await?;
        Ok(ballots)
    }

    async fn list_ballots_by_voter(&self, voter_id: &VoterId) -> StoreResult<Vec<Ballot>> {
        let ballots: Vec<Ballot> = self
            .ballots()
            .find(doc! { "user_id": voter_id.as_str() }, None)
            .await?
            .map_ok(Ballot::from)
            .try_collect()
            .await?;
        Ok(ballots)
    }

    async fn tally_by_candidate(&self) -> StoreResult<HashMap<CandidateId, u64>> {
        let pipeline = [doc! {
            "$group": { "_id": "$party_id", "count": { "$sum": 1 } }
        }];
        let rows: Vec<Document> = self
            .ballots()
            .aggregate(pipeline, None)
            .await?
            .try_collect()
            .await?;
        rows.iter().map(tally_row).collect()
    }
}

#[rocket::async_trait]
impl ElectionStore for MongoStore {
    async fn list_elections(&self) -> StoreResult<Vec<Election>> {
        let elections: Vec<Election> = self
            .elections()
            .find(None, None)
            .await?
            .map_ok(Election::from)
            .try_collect()
            .await?;
        Ok(elections)
    }

    async fn find_election(&self, election_id: &ElectionId) -> StoreResult<Option<Election>> {
        let election = self
            .elections()
            .find_one(doc! { "_id": election_id.as_str() }, None)
            .await?;
        Ok(election.map(Election::from))
    }

    async fn active_election(&self) -> StoreResult<Option<Election>> {
        let election = self
            .elections()
            .find_one(doc! { "is_active": true }, None)
            .await?;
        Ok(election.map(Election::from))
    }
}

#[rocket::async_trait]
impl VotingStore for MongoStore {
    /// Insert the ballot and flag the voter in one transaction. The unique
    /// index on `votes.user_id` turns a concurrent second vote into
    /// [`StoreError::Duplicate`].
    async fn record_vote(
        &self,
        voter_id: &VoterId,
        candidate_id: &CandidateId,
    ) -> StoreResult<Ballot> {
        let ballot = BallotDoc::new(voter_id, candidate_id);

        let mut session = self.client.start_session(None).await?;
        session.start_transaction(None).await?;

        self.ballots()
            .insert_one_with_session(&ballot, None, &mut session)
            .await
            .map_err(|e| insert_error(e, voter_id))?;

        let flagged = self
            .voters()
            .update_one_with_session(
                doc! { "_id": voter_id.as_str() },
                doc! { "$set": { "has_voted": true } },
                None,
                &mut session,
            )
            .await?;
        if flagged.matched_count == 0 {
            warn!("Aborting vote: voter '{voter_id}' vanished mid-transaction");
            session.abort_transaction().await?;
            return Err(StoreError::not_found(format!("Voter '{voter_id}'")));
        }

        session.commit_transaction().await?;
        Ok(ballot.into())
    }
}
