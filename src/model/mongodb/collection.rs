use std::ops::Deref;

use log::debug;
use mongodb::{
    bson::doc, error::Error as DbError, options::IndexOptions, Collection, Database, IndexModel,
};

use crate::model::db::{BallotDoc, CandidateDoc, ElectionDoc, VoterDoc};

/// A type that can be directly inserted/read to/from the database.
pub trait MongoCollection {
    /// The name of the collection.
    const NAME: &'static str;
}

/// A database collection of the given type.
pub struct Coll<T>(Collection<T>);

impl<T> Coll<T>
where
    T: MongoCollection,
{
    /// Get a handle on this collection in the given database.
    pub fn from_db(db: &Database) -> Self {
        Self(db.collection(T::NAME))
    }
}

// `Derive(Clone)` would only derive if `T: Clone`, but we don't need that bound.
impl<T> Clone for Coll<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> Deref for Coll<T> {
    type Target = Collection<T>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl MongoCollection for VoterDoc {
    const NAME: &'static str = "users";
}

impl MongoCollection for CandidateDoc {
    const NAME: &'static str = "parties";
}

impl MongoCollection for BallotDoc {
    const NAME: &'static str = "votes";
}

impl MongoCollection for ElectionDoc {
    const NAME: &'static str = "elections";
}

/// Ensure that all the required indexes exist on the given database.
///
/// This operation is idempotent.
pub async fn ensure_indexes_exist(db: &Database) -> Result<(), DbError> {
    debug!("Ensuring collection indexes exist");

    let unique = IndexOptions::builder().unique(true).build();

    // Login identifiers are unique across voters.
    let voter_index = IndexModel::builder()
        .keys(doc! {"voter_id": 1})
        .options(unique.clone())
        .build();
    Coll::<VoterDoc>::from_db(db)
        .create_index(voter_index, None)
        .await?;

    // At most one ballot per voter.
    let ballot_index = IndexModel::builder()
        .keys(doc! {"user_id": 1})
        .options(unique)
        .build();
    Coll::<BallotDoc>::from_db(db)
        .create_index(ballot_index, None)
        .await?;

    // Tallies group by candidate.
    let tally_index = IndexModel::builder().keys(doc! {"party_id": 1}).build();
    Coll::<BallotDoc>::from_db(db)
        .create_index(tally_index, None)
        .await?;

    Ok(())
}
