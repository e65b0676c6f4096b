//! Session state and interactive auth commands

pub mod session;
pub mod store;

pub use store::{MemoryStore, SessionStore};
