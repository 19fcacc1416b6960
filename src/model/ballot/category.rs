use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// The three independent elections decided on one ballot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Organization,
    Club,
    Council,
}

impl Category {
    pub const ALL: [Category; 3] = [Self::Organization, Self::Club, Self::Council];

    /// Council elects up to two seats; the others elect one.
    pub fn max_choices(self) -> usize {
        match self {
            Self::Organization | Self::Club => 1,
            Self::Council => 2,
        }
    }
}

impl Display for Category {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}",
            match self {
                Self::Organization => "organization",
                Self::Club => "club",
                Self::Council => "council",
            }
        )
    }
}
