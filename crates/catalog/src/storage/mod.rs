//! Pipeline leaves.
//!
//! - [`remote`]: the HTTP catalog service, the usual primary source
//! - [`inmemory`]: a local store kept in process memory
//! - `sqlite` (feature `sqlite`): a durable local store
//!
//! Leaves implement `ProductRepository` directly; local stores additionally
//! implement `LocalStore` so the offline decorator can write back into them.

pub mod inmemory;
pub mod remote;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use inmemory::InMemoryStore;
pub use remote::HttpProductRepository;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;
