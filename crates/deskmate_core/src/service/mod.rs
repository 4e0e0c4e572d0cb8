//! Use-case services.
//!
//! # Responsibility
//! - Turn command-shaped input into collection operations.
//! - Keep front ends free of multi-step validation and rollback logic.

pub mod contact_service;
pub mod note_service;
