//! Demo data provisioned out-of-band: the four parties, the test voters, one
//! ballot already cast, and two elections.

use chrono::{DateTime, TimeZone, Utc};

use crate::model::common::{Ballot, Candidate, Election, Voter};

/// Seed timestamps are compile-time constants and always valid.
fn utc(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
        .single()
        .expect("seed timestamps are valid")
}

pub fn candidates() -> Vec<Candidate> {
    [
        (
            "party-1",
            "Democratic Party",
            "/democratic-party.svg",
            "Focused on social equality and progressive policies.",
        ),
        (
            "party-2",
            "Republican Party",
            "/republican-party.svg",
            "Focused on traditional values and economic freedom.",
        ),
        (
            "party-3",
            "Green Party",
            "/green-party.svg",
            "Focused on environmental protection and social justice.",
        ),
        (
            "party-4",
            "Libertarian Party",
            "/libertarian-party.svg",
            "Focused on individual liberty and limited government.",
        ),
    ]
    .into_iter()
    .map(|(id, name, logo, description)| Candidate {
        id: id.into(),
        name: name.to_string(),
        logo_url: Some(logo.to_string()),
        description: description.to_string(),
    })
    .collect()
}

pub fn voters() -> Vec<Voter> {
    [
        ("user-1", "John Doe", "john@example.com", "VOT12345", false),
        ("user-2", "Jane Smith", "jane@example.com", "VOT67890", true),
        ("user-3", "Bob Johnson", "bob@example.com", "VOT54321", false),
        ("user-4", "Alice Williams", "alice@example.com", "VOT09876", false),
    ]
    .into_iter()
    .map(|(id, name, email, login_id, has_voted)| Voter {
        id: id.into(),
        name: name.to_string(),
        email: email.to_string(),
        login_id: login_id.to_string(),
        has_voted,
    })
    .collect()
}

/// Ballots already on record. Every voter here is flagged in [`voters`].
pub fn ballots() -> Vec<Ballot> {
    vec![Ballot {
        id: "vote-1".into(),
        voter_id: "user-2".into(),
        candidate_id: "party-1".into(),
        timestamp: utc(2023, 11, 7, 10, 30, 0),
    }]
}

pub fn elections() -> Vec<Election> {
    vec![
        Election {
            id: "election-1".into(),
            title: "Presidential Election 2024".to_string(),
            description: "Vote for the next president of the United States".to_string(),
            start_date: utc(2024, 11, 3, 0, 0, 0),
            end_date: utc(2024, 11, 3, 23, 59, 59),
            is_active: true,
        },
        Election {
            id: "election-2".into(),
            title: "Midterm Elections 2022".to_string(),
            description: "Vote for your state representatives".to_string(),
            start_date: utc(2022, 11, 8, 0, 0, 0),
            end_date: utc(2022, 11, 8, 23, 59, 59),
            is_active: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn login_ids_are_unique() {
        let voters = voters();
        let ids: HashSet<_> = voters.iter().map(|v| v.login_id.as_str()).collect();
        assert_eq!(ids.len(), voters.len());
    }

    #[test]
    fn seeded_ballots_match_flags() {
        let voters = voters();
        for ballot in ballots() {
            let voter = voters.iter().find(|v| v.id == ballot.voter_id).unwrap();
            assert!(voter.has_voted);
            assert!(candidates().iter().any(|c| c.id == ballot.candidate_id));
        }
    }

    #[test]
    fn one_active_election() {
        assert_eq!(elections().iter().filter(|e| e.is_active).count(), 1);
    }
}
