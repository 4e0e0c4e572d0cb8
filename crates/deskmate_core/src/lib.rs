//! Core domain logic for the deskmate assistant.
//! This crate owns contact and note invariants, queries and persistence.

pub mod error;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use error::{CoreError, CoreResult, Entity};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::contact::Contact;
pub use model::field::{
    Address, Birthday, Email, Field, FieldError, FieldKind, Name, Phone, Title,
};
pub use model::note::{note_id_for, NoteRecord};
pub use repo::address_book::{
    AddressBook, SearchField, UpcomingBirthday, DEFAULT_BIRTHDAY_WINDOW_DAYS,
};
pub use repo::note_collection::{NoteCollection, NoteUpdate};
pub use service::contact_service::{AddOutcome, ContactDraft, ContactEdit, ContactService};
pub use service::note_service::{NoteDraft, NoteFilter, NoteService};
pub use store::{FileStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
