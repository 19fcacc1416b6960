//! Client for the election REST API and the vote submission protocol.

mod client;
mod vote;

pub use client::{PortalClient, ReferenceCode};
pub use vote::{cast_ballot, load_roster, sign_in};
