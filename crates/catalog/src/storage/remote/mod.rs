//! HTTP remote source.
//!
//! Talks to a catalog service exposing products under `{base}/products`.
//! Non-2xx answers and transport faults are mapped onto the repository
//! error taxonomy so nothing reqwest-specific leaks past this leaf.

mod repository;

pub use repository::HttpProductRepository;
