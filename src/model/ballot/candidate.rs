use serde::{Deserialize, Serialize};

use super::category::Category;
use super::CandidateId;

/// Immutable reference data for one candidate, as served by the
/// candidates endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub candidate_number: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faculty: Option<String>,
}

/// All candidates for the three categories, fetched once per session and
/// cached in the session store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    pub organization: Vec<Candidate>,
    pub club: Vec<Candidate>,
    pub council: Vec<Candidate>,
}

impl Roster {
    pub fn candidates(&self, category: Category) -> &[Candidate] {
        match category {
            Category::Organization => &self.organization,
            Category::Club => &self.club,
            Category::Council => &self.council,
        }
    }

    /// Look up a candidate by id within one category.
    pub fn find(&self, category: Category, id: CandidateId) -> Option<&Candidate> {
        self.candidates(category)
            .iter()
            .find(|candidate| candidate.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_roster_payload() {
        let roster: Roster = serde_json::from_str(
            r#"{
                "organization": [
                    {"id": 1, "candidate_number": 1, "name": "Party A"},
                    {"id": 2, "candidate_number": 2, "name": "Party B"}
                ],
                "club": [
                    {"id": 5, "candidate_number": 1, "name": "Club Front", "faculty": "SCI"}
                ],
                "council": [
                    {"id": 2, "candidate_number": 1, "name": "N. One"},
                    {"id": 7, "candidate_number": 2, "name": "N. Two"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(2, roster.candidates(Category::Organization).len());
        assert_eq!(
            Some("Club Front"),
            roster.find(Category::Club, 5).map(|c| c.name.as_str())
        );
        assert_eq!(None, roster.find(Category::Council, 99));
    }
}
