//! In-memory local store.
//!
//! Stores products in a HashMap wrapped in `Arc<RwLock<_>>`. Data is not
//! persisted and is lost when the last clone of the store is dropped.
//!
//! # Example
//!
//! ```rust,ignore
//! use catalog::storage::InMemoryStore;
//!
//! let store = InMemoryStore::new();
//! store.put_product(&Product::new("P1", "Widget", 9.99)).await?;
//! ```

mod repository;

pub use repository::InMemoryStore;
