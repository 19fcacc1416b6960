//! Core logic of the student election portal: credential and claims
//! handling, route-level access control, the ballot selection state
//! machine, the vote submission protocol, and the persisted session
//! store. Presentation and the tallying backend live elsewhere.

pub mod api;
pub mod config;
pub mod error;
pub mod model;

pub use config::Config;
pub use error::{Error, Result, SubmissionError};
