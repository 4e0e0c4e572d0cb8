//! Note collection.
//!
//! # Responsibility
//! - Store notes in insertion order with a unique id index.
//! - Provide title/id lookup, tag search, text search and tag listing.
//!
//! # Invariants
//! - `id_index[id] == position` iff `notes[position].id() == id`.
//! - Title uniqueness is checked only when a note is added; later title
//!   edits may collide with another note.
//! - Title comparison on add is case-sensitive, while every search is
//!   case-insensitive.

use crate::error::{CoreError, CoreResult, Entity};
use crate::model::field::FieldError;
use crate::model::note::{normalize_tag, NoteRecord};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Partial update applied by [`NoteCollection::update`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub text: Option<String>,
    /// Replaces the full tag set when present.
    pub tags: Option<Vec<String>>,
}

impl NoteUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.text.is_none() && self.tags.is_none()
    }
}

/// Ordered note collection with an id index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<NoteRecord>", into = "Vec<NoteRecord>")]
pub struct NoteCollection {
    notes: Vec<NoteRecord>,
    id_index: HashMap<String, usize>,
}

impl TryFrom<Vec<NoteRecord>> for NoteCollection {
    type Error = String;

    fn try_from(value: Vec<NoteRecord>) -> Result<Self, Self::Error> {
        let mut collection = Self::new();
        for note in value {
            if collection.id_index.contains_key(note.id()) {
                return Err(format!("duplicate note id `{}`", note.id()));
            }
            collection.push(note);
        }
        Ok(collection)
    }
}

impl From<NoteCollection> for Vec<NoteRecord> {
    fn from(value: NoteCollection) -> Self {
        value.notes
    }
}

impl NoteCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Notes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &NoteRecord> {
        self.notes.iter()
    }

    /// Creates and stores a note.
    ///
    /// # Errors
    /// - `Validation` for an invalid title or text.
    /// - `Duplicate` when a note with the same title exists, or when the
    ///   derived id is already taken by a renamed note.
    pub fn add(&mut self, title: &str, text: &str) -> CoreResult<&mut NoteRecord> {
        let note = NoteRecord::new(title, text)?;
        check_text(text)?;
        if self.find(note.title().value()).is_some() {
            return Err(CoreError::duplicate(
                Entity::Note,
                note.title().value().clone(),
            ));
        }
        if self.id_index.contains_key(note.id()) {
            return Err(CoreError::duplicate(Entity::Note, note.id()));
        }
        let position = self.push(note);
        Ok(&mut self.notes[position])
    }

    /// First note whose title equals `title` exactly.
    pub fn find(&self, title: &str) -> Option<&NoteRecord> {
        self.notes.iter().find(|note| note.title().value() == title)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&NoteRecord> {
        self.id_index.get(id.trim()).map(|position| &self.notes[*position])
    }

    /// Id lookup that reports absence as `NotFound`.
    pub fn get(&self, id: &str) -> CoreResult<&NoteRecord> {
        self.find_by_id(id)
            .ok_or_else(|| CoreError::not_found(Entity::Note, id.trim()))
    }

    fn get_mut(&mut self, id: &str) -> CoreResult<&mut NoteRecord> {
        let position = self
            .id_index
            .get(id.trim())
            .copied()
            .ok_or_else(|| CoreError::not_found(Entity::Note, id.trim()))?;
        Ok(&mut self.notes[position])
    }

    /// Removes and returns the note with `id`.
    pub fn delete(&mut self, id: &str) -> CoreResult<NoteRecord> {
        let position = self
            .id_index
            .remove(id.trim())
            .ok_or_else(|| CoreError::not_found(Entity::Note, id.trim()))?;
        let removed = self.notes.remove(position);
        for slot in self.id_index.values_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }
        Ok(removed)
    }

    /// Applies a partial update to the note with `id`.
    ///
    /// Every provided value is validated before anything changes. The new
    /// title is not checked against other notes.
    pub fn update(&mut self, id: &str, update: NoteUpdate) -> CoreResult<&NoteRecord> {
        let note = self.get_mut(id)?;

        let mut staged = note.clone();
        if let Some(title) = update.title.as_deref() {
            staged.set_title(title)?;
        }
        if let Some(text) = update.text.as_deref() {
            check_text(text)?;
            staged.set_text(text);
        }
        if let Some(tags) = update.tags.as_deref() {
            staged.set_tags(tags)?;
        }
        *note = staged;
        Ok(&*note)
    }

    /// Adds tags to a note; returns how many were new.
    pub fn add_tags(&mut self, id: &str, tags: &[String]) -> CoreResult<usize> {
        let note = self.get_mut(id)?;
        Ok(note.add_tags(tags)?)
    }

    /// Removes tags from a note; returns how many were present.
    pub fn remove_tags(&mut self, id: &str, tags: &[String]) -> CoreResult<usize> {
        let note = self.get_mut(id)?;
        Ok(note.remove_tags(tags))
    }

    /// Notes carrying `tag` (case-insensitive, trimmed).
    pub fn search_by_tag(&self, tag: &str) -> Vec<&NoteRecord> {
        self.notes.iter().filter(|note| note.has_tag(tag)).collect()
    }

    /// Notes carrying any of `tags`. An empty filter returns every note.
    pub fn notes_by_tags(&self, tags: &[String]) -> Vec<&NoteRecord> {
        let wanted = tags
            .iter()
            .filter_map(|tag| normalize_tag(tag))
            .collect::<BTreeSet<_>>();
        if wanted.is_empty() {
            return self.notes.iter().collect();
        }
        self.notes
            .iter()
            .filter(|note| !note.tags().is_disjoint(&wanted))
            .collect()
    }

    /// Case-insensitive substring search over titles and text.
    pub fn search_text(&self, query: &str) -> CoreResult<Vec<&NoteRecord>> {
        if query.trim().is_empty() {
            return Err(CoreError::Query("Search query cannot be empty.".to_string()));
        }
        Ok(self
            .notes
            .iter()
            .filter(|note| note.matches_text(query))
            .collect())
    }

    /// Sorted union of all note tags.
    pub fn all_tags(&self) -> Vec<String> {
        self.notes
            .iter()
            .flat_map(|note| note.tags().iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    fn push(&mut self, note: NoteRecord) -> usize {
        let position = self.notes.len();
        self.id_index.insert(note.id().to_string(), position);
        self.notes.push(note);
        position
    }
}

fn check_text(text: &str) -> Result<(), FieldError> {
    match NoteRecord::validate_text(text) {
        Some(problem) => Err(FieldError::NoteText(problem)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::{NoteCollection, NoteUpdate};
    use crate::error::CoreError;

    #[test]
    fn add_rejects_invalid_text_before_storing() {
        let mut notes = NoteCollection::new();
        let err = notes.add("Groceries", "   ").unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(notes.is_empty());
    }

    #[test]
    fn id_collision_after_rename_is_a_duplicate() {
        let mut notes = NoteCollection::new();
        let id = notes.add("abc", "first").unwrap().id().to_string();
        notes
            .update(
                &id,
                NoteUpdate {
                    title: Some("Renamed".to_string()),
                    ..NoteUpdate::default()
                },
            )
            .unwrap();

        let err = notes.add("abc", "second").unwrap_err();
        assert!(matches!(err, CoreError::Duplicate { .. }));
        assert_eq!(notes.len(), 1);
    }

    #[test]
    fn failed_update_leaves_note_untouched() {
        let mut notes = NoteCollection::new();
        let id = notes.add("Groceries", "milk").unwrap().id().to_string();

        let err = notes
            .update(
                &id,
                NoteUpdate {
                    title: Some("x".repeat(41)),
                    text: Some("bread".to_string()),
                    tags: None,
                },
            )
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        let note = notes.find_by_id(&id).unwrap();
        assert_eq!(note.title().value(), "Groceries");
        assert_eq!(note.text(), "milk");
    }

    #[test]
    fn delete_reindexes_remaining_notes() {
        let mut notes = NoteCollection::new();
        let first = notes.add("first", "one").unwrap().id().to_string();
        let second = notes.add("second", "two").unwrap().id().to_string();

        notes.delete(&first).unwrap();
        assert!(notes.find_by_id(&first).is_none());
        assert_eq!(notes.find_by_id(&second).unwrap().title().value(), "second");
        assert!(matches!(
            notes.delete(&first),
            Err(CoreError::NotFound { .. })
        ));
    }
}
