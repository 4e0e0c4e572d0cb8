//! Domain model for contacts and notes.
//!
//! # Responsibility
//! - Define validated field types and the two record aggregates.
//! - Keep validation at construction so collections only hold valid data.
//!
//! # Invariants
//! - Records are only built from validated fields.
//! - Note identity is the creation-time id, not the mutable title.

pub mod contact;
pub mod field;
pub mod note;
