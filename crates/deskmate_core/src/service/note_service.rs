//! Note use-case service.
//!
//! # Responsibility
//! - Provide command-level note operations over a `NoteCollection`.
//! - Combine tag filters and free-text search for listing.
//!
//! # Invariants
//! - Tags are validated before a note is stored, so a failed add leaves
//!   no partial note behind.
//! - An empty tag filter lists every note.

use crate::error::{CoreError, CoreResult};
use crate::model::note::{normalize_tags, NoteRecord};
use crate::repo::note_collection::{NoteCollection, NoteUpdate};
use log::debug;

/// Input for creating a note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub text: String,
    pub tags: Vec<String>,
}

/// Listing filter; both parts are optional and combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    pub search: Option<String>,
    /// Matches notes having any of these tags.
    pub tags: Vec<String>,
}

/// Note service facade over one collection.
pub struct NoteService<'a> {
    notes: &'a mut NoteCollection,
}

impl<'a> NoteService<'a> {
    pub fn new(notes: &'a mut NoteCollection) -> Self {
        Self { notes }
    }

    /// Creates a note with optional tags.
    pub fn add_note(&mut self, draft: &NoteDraft) -> CoreResult<&NoteRecord> {
        normalize_tags(&draft.tags)?;
        let note = self.notes.add(&draft.title, &draft.text)?;
        note.set_tags(&draft.tags)?;
        debug!(
            "event=note_add module=service status=ok id={} tags={}",
            note.id(),
            note.tags().len()
        );
        Ok(&*note)
    }

    /// Updates title, text or tags of the note `id`.
    pub fn update_note(&mut self, id: &str, update: NoteUpdate) -> CoreResult<&NoteRecord> {
        if update.is_empty() {
            return Err(CoreError::Argument(
                "Nothing to update. Use --title, --text or --tags.".to_string(),
            ));
        }
        let note = self.notes.update(id, update)?;
        debug!("event=note_update module=service status=ok id={}", note.id());
        Ok(note)
    }

    pub fn delete_note(&mut self, id: &str) -> CoreResult<NoteRecord> {
        let removed = self.notes.delete(id)?;
        debug!(
            "event=note_delete module=service status=ok id={}",
            removed.id()
        );
        Ok(removed)
    }

    pub fn add_tags(&mut self, id: &str, tags: &[String]) -> CoreResult<usize> {
        if tags.is_empty() {
            return Err(CoreError::Argument("At least one tag is required.".to_string()));
        }
        self.notes.add_tags(id, tags)
    }

    pub fn remove_tags(&mut self, id: &str, tags: &[String]) -> CoreResult<usize> {
        if tags.is_empty() {
            return Err(CoreError::Argument("At least one tag is required.".to_string()));
        }
        self.notes.remove_tags(id, tags)
    }

    pub fn note(&self, id: &str) -> CoreResult<&NoteRecord> {
        self.notes.get(id)
    }

    /// Lists notes matching the filter, in insertion order.
    pub fn list(&self, filter: &NoteFilter) -> CoreResult<Vec<&NoteRecord>> {
        let by_tags = self.notes.notes_by_tags(&filter.tags);
        let listed = match filter.search.as_deref() {
            Some(query) => {
                let matching = self.notes.search_text(query)?;
                by_tags
                    .into_iter()
                    .filter(|note| matching.iter().any(|hit| hit.id() == note.id()))
                    .collect()
            }
            None => by_tags,
        };
        debug!(
            "event=note_list module=service status=ok hits={}",
            listed.len()
        );
        Ok(listed)
    }

    pub fn all_tags(&self) -> Vec<String> {
        self.notes.all_tags()
    }
}
