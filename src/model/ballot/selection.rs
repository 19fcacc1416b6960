use serde::Serialize;

use crate::error::Error;

use super::category::Category;
use super::{CandidateId, ABSTAIN};

/// Per-category selection state.
///
/// The tagged representation makes an abstention and concrete picks
/// mutually exclusive by construction; there is no raw id list in which
/// the sentinel could mix with real candidates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    /// The voter has not touched this category yet.
    #[default]
    Unselected,
    /// Explicit "no preference", distinct from not yet chosen.
    Abstain,
    /// One or more concrete candidate ids, bounded by the category's
    /// cardinality.
    Chosen(Vec<CandidateId>),
}

impl Selection {
    fn toggle(&mut self, id: CandidateId, max_choices: usize) {
        if id == ABSTAIN {
            *self = Self::Abstain;
            return;
        }

        if max_choices == 1 {
            // Single-seat categories: any pick replaces the previous one.
            *self = Self::Chosen(vec![id]);
            return;
        }

        let mut ids = match std::mem::take(self) {
            Self::Chosen(ids) => ids,
            // A concrete pick displaces an abstention.
            Self::Unselected | Self::Abstain => Vec::new(),
        };
        if let Some(position) = ids.iter().position(|&chosen| chosen == id) {
            ids.remove(position);
        } else if ids.len() < max_choices {
            ids.push(id);
        }
        // else: already at capacity, the existing picks stand.

        *self = if ids.is_empty() {
            Self::Unselected
        } else {
            Self::Chosen(ids)
        };
    }
}

/// The full ballot: one selection per category, mutated only by toggle
/// events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ballot {
    organization: Selection,
    club: Selection,
    council: Selection,
}

impl Ballot {
    pub fn selection(&self, category: Category) -> &Selection {
        match category {
            Category::Organization => &self.organization,
            Category::Club => &self.club,
            Category::Council => &self.council,
        }
    }

    /// Apply one toggle event.
    ///
    /// Id `0` always yields an abstention and discards concrete picks.
    /// In the council category a chosen id toggles off, a new id is added
    /// while fewer than two are chosen, and a third distinct id is a
    /// no-op rather than an eviction.
    pub fn toggle(&mut self, category: Category, id: CandidateId) {
        let selection = match category {
            Category::Organization => &mut self.organization,
            Category::Club => &mut self.club,
            Category::Council => &mut self.council,
        };
        selection.toggle(id, category.max_choices());
    }

    /// Every category holds an abstention or at least one pick.
    pub fn is_complete(&self) -> bool {
        Category::ALL
            .iter()
            .all(|&category| *self.selection(category) != Selection::Unselected)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Serialize for submission. Fails locally, before any network call,
    /// if a category is still unselected.
    pub fn to_payload(&self) -> Result<VotePayload, Error> {
        if !self.is_complete() {
            return Err(Error::IncompleteBallot);
        }

        let single = |selection: &Selection| match selection {
            Selection::Abstain => ABSTAIN,
            Selection::Chosen(ids) => ids[0],
            Selection::Unselected => unreachable!("checked by is_complete"),
        };

        Ok(VotePayload {
            organization_id: single(&self.organization),
            club_id: single(&self.club),
            council_ids: match &self.council {
                Selection::Abstain => vec![ABSTAIN],
                Selection::Chosen(ids) => ids.clone(),
                Selection::Unselected => unreachable!("checked by is_complete"),
            },
        })
    }
}

/// Wire format of the vote submission body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VotePayload {
    pub organization_id: CandidateId,
    pub club_id: CandidateId,
    pub council_ids: Vec<CandidateId>,
}
