//! catalog_core - the functional core of the catalog repository pipeline.
//!
//! Holds the product model, the repository capability every pipeline layer
//! implements, the error taxonomy, and the pure policy math (validation,
//! HTTP status mapping, retry backoff). Nothing in this crate performs I/O.

pub mod product;
pub mod retry;
pub mod storage;
