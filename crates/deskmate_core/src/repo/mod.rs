//! In-memory collections for contacts and notes.
//!
//! # Responsibility
//! - Own the keyed/indexed storage of records for one process.
//! - Enforce collection-level invariants (unique keys, index consistency).
//!
//! # Invariants
//! - Collections only hold validated records.
//! - Lookups report absence as `None` or `CoreError::NotFound`, never panic.
//!
//! # See also
//! - crate::store for file persistence of both collections.

pub mod address_book;
pub mod note_collection;
