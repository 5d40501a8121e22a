use serde::{Deserialize, Serialize};

/// A login attempt with the voter's public identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub login_id: String,
}
