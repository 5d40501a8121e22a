use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ElectionId;

/// A time-boxed voting event. At most one is expected to be active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Election {
    pub id: ElectionId,
    pub title: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub is_active: bool,
}
