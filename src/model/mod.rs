pub mod auth;
pub mod ballot;
pub mod route;
pub mod session;
