//! Note record.
//!
//! # Responsibility
//! - Aggregate a title, free text and a tag set.
//! - Derive the short note identifier from the title given at creation.
//!
//! # Invariants
//! - `id` is the first 6 hex chars of SHA-1 over the raw creation title and
//!   never changes, even when the title is edited later.
//! - Tags are trimmed, lowercase and unique.

use crate::model::field::{FieldError, Title};
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

/// Length of the hex note identifier.
pub const NOTE_ID_LEN: usize = 6;
/// Maximum note text length in characters.
pub const NOTE_TEXT_MAX_CHARS: usize = 150;

/// Single note with a stable short identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredNote")]
pub struct NoteRecord {
    id: String,
    title: Title,
    text: String,
    tags: BTreeSet<String>,
}

#[derive(Deserialize)]
struct StoredNote {
    id: String,
    title: Title,
    #[serde(default)]
    text: String,
    #[serde(default)]
    tags: Vec<String>,
}

impl TryFrom<StoredNote> for NoteRecord {
    type Error = String;

    fn try_from(value: StoredNote) -> Result<Self, Self::Error> {
        let id_is_hex = value.id.len() == NOTE_ID_LEN
            && value
                .id
                .chars()
                .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase());
        if !id_is_hex {
            return Err(format!("invalid note id `{}`", value.id));
        }
        let tags = normalize_tags(&value.tags).map_err(|err| err.to_string())?;
        Ok(Self {
            id: value.id,
            title: value.title,
            text: value.text,
            tags,
        })
    }
}

impl NoteRecord {
    /// Creates a note. The identifier is derived from `title` before
    /// validation or trimming.
    pub fn new(title: &str, text: &str) -> Result<Self, FieldError> {
        let id = note_id_for(title);
        let title = Title::parse(title)?;
        Ok(Self {
            id,
            title,
            text: text.trim().to_string(),
            tags: BTreeSet::new(),
        })
    }

    /// Soft validation for note text.
    ///
    /// Returns a displayable problem description, or `None` when the text
    /// is acceptable.
    pub fn validate_text(text: &str) -> Option<String> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Some("Note text can not be empty".to_string());
        }
        if trimmed.chars().count() > NOTE_TEXT_MAX_CHARS {
            return Some(format!(
                "Note text is too long (max. is {NOTE_TEXT_MAX_CHARS} characters)"
            ));
        }
        None
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// Replaces the title. The identifier is left untouched.
    pub fn set_title(&mut self, raw: &str) -> Result<(), FieldError> {
        self.title = Title::parse(raw)?;
        Ok(())
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.trim().to_string();
    }

    /// Replaces the whole tag set.
    pub fn set_tags(&mut self, tags: &[String]) -> Result<(), FieldError> {
        self.tags = normalize_tags(tags)?;
        Ok(())
    }

    /// Adds tags and returns how many were new.
    pub fn add_tags(&mut self, tags: &[String]) -> Result<usize, FieldError> {
        let normalized = normalize_tags(tags)?;
        let before = self.tags.len();
        self.tags.extend(normalized);
        Ok(self.tags.len() - before)
    }

    /// Removes tags and returns how many were present.
    pub fn remove_tags(&mut self, tags: &[String]) -> usize {
        tags.iter()
            .filter_map(|tag| normalize_tag(tag))
            .filter(|tag| self.tags.remove(tag))
            .count()
    }

    /// Case-insensitive, trimmed tag membership.
    pub fn has_tag(&self, tag: &str) -> bool {
        normalize_tag(tag).is_some_and(|tag| self.tags.contains(&tag))
    }

    /// Case-insensitive substring match against title or text.
    pub fn matches_text(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        self.title.value().to_lowercase().contains(&needle)
            || self.text.to_lowercase().contains(&needle)
    }
}

impl Display for NoteRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.id, self.title, self.text)?;
        if !self.tags.is_empty() {
            let tags = self
                .tags
                .iter()
                .map(|tag| format!("#{tag}"))
                .collect::<Vec<_>>();
            write!(f, " {}", tags.join(" "))?;
        }
        Ok(())
    }
}

/// Derives the short note identifier for a raw title.
pub fn note_id_for(title: &str) -> String {
    let mut encoded = hex::encode(Sha1::digest(title.as_bytes()));
    encoded.truncate(NOTE_ID_LEN);
    encoded
}

/// Normalizes one tag value. Blank input yields `None`.
pub fn normalize_tag(tag: &str) -> Option<String> {
    let trimmed = tag.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Normalizes and deduplicates tags, rejecting blank values.
pub fn normalize_tags(tags: &[String]) -> Result<BTreeSet<String>, FieldError> {
    let mut unique = BTreeSet::new();
    for tag in tags {
        let normalized = normalize_tag(tag)
            .ok_or_else(|| FieldError::Tag(format!("Invalid tag: `{tag}`")))?;
        unique.insert(normalized);
    }
    Ok(unique)
}
