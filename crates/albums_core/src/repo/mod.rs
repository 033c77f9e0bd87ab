//! Record store contracts and SQLite implementation.
//!
//! # Responsibility
//! - Define the three album data-access operations.
//! - Isolate SQL details from command dispatch.
//!
//! # Invariants
//! - Every operation is one parameterized round trip; no caching, no retries.
//! - A missing single-row lookup is `NotFound`, never a generic query error.

pub mod album_repo;
