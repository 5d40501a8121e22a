use serde::{Deserialize, Serialize};

use super::VoterId;

/// A registered participant, eligible to cast exactly one ballot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
    pub id: VoterId,
    pub name: String,
    pub email: String,
    /// Public identifier typed in at login. Unique across voters.
    pub login_id: String,
    /// Eligibility flag; set once a ballot has been accepted.
    pub has_voted: bool,
}

impl Voter {
    /// Does this voter log in with the given identifier?
    ///
    /// Surrounding whitespace in `login_id` is ignored, the rest must match
    /// exactly (case-sensitive).
    pub fn matches_login_id(&self, login_id: &str) -> bool {
        self.login_id == login_id.trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voter() -> Voter {
        Voter {
            id: "user-1".into(),
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            login_id: "VOT12345".to_string(),
            has_voted: false,
        }
    }

    #[test]
    fn login_id_match_is_trimmed() {
        assert!(voter().matches_login_id("VOT12345"));
        assert!(voter().matches_login_id("  VOT12345\n"));
    }

    #[test]
    fn login_id_match_is_case_sensitive() {
        assert!(!voter().matches_login_id("vot12345"));
        assert!(!voter().matches_login_id("VOT1234"));
    }
}
