//! Route-level access control: the rule table and the navigation guard.

mod guard;
mod matrix;

pub use guard::{evaluate, landing_page, Decision, DASHBOARD, LOGIN, SUCCESS, VOTING};
pub use matrix::{can_access, required_for, Requirement};
