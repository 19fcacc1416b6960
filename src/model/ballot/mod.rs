//! The ballot: categories, candidate reference data, and the selection
//! state machine.

mod candidate;
mod category;
mod selection;

pub use candidate::{Candidate, Roster};
pub use category::Category;
pub use selection::{Ballot, Selection, VotePayload};

pub type CandidateId = u32;

/// Reserved id meaning "no preference", distinct from "not yet chosen".
pub const ABSTAIN: CandidateId = 0;
