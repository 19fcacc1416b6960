//! Session credentials: token claims and the role hierarchy.

mod claims;
mod role;

pub use claims::{Claims, AUTH_TOKEN_COOKIE};
pub use role::{has_permission, Role};

#[cfg(test)]
pub(crate) use claims::tests::{example_claims, token_for};
