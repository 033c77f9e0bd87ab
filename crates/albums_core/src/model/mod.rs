//! Domain model for the album catalog.
//!
//! # Responsibility
//! - Define the persisted `Album` record and its id-less creation shape.
//! - Provide a named-field builder for interactive record collection.
//!
//! # Invariants
//! - `Album::id` is assigned by the store and never changes afterwards.
//! - `NewAlbum` never carries an id.

pub mod album;
