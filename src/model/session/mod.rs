//! The persisted session store and its storage backends.

mod storage;
mod store;

pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{SessionStore, SessionUser};
