//! SQLite local store.
//!
//! A durable `LocalStore` built on `rusqlite` for the synchronous work and
//! `tokio-rusqlite` to run it off the async executor.

mod error;
mod repository;
mod schema;

pub use repository::SqliteStore;
