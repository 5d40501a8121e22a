use chrono::{DateTime, Utc};
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize};

use crate::model::common::Election;

/// A row of the `elections` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionDoc {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub start_date: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub end_date: DateTime<Utc>,
    pub is_active: bool,
}

impl From<ElectionDoc> for Election {
    fn from(doc: ElectionDoc) -> Self {
        Self {
            id: doc.id.into(),
            title: doc.title,
            description: doc.description,
            start_date: doc.start_date,
            end_date: doc.end_date,
            is_active: doc.is_active,
        }
    }
}

impl From<Election> for ElectionDoc {
    fn from(election: Election) -> Self {
        Self {
            id: election.id.into(),
            title: election.title,
            description: election.description,
            start_date: election.start_date,
            end_date: election.end_date,
            is_active: election.is_active,
        }
    }
}
