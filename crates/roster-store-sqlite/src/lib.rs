//! SQLite backend for the Roster candidate collection.
//!
//! Documents are stored as JSON text, one row per candidate, so the
//! collection stays schema-less. Wraps [`tokio_rusqlite`] so all database
//! access runs on a dedicated thread without blocking the async runtime.

mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
