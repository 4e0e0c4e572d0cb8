//! Name-keyed contact collection.
//!
//! # Responsibility
//! - Store contacts in insertion order with an exact-name index.
//! - Provide lookup, rename, delete, birthday-window and field search.
//!
//! # Invariants
//! - `index[name] == position` iff `contacts[position].name() == name`.
//! - Rename updates the stored name and the index in one call; the record
//!   keeps its position and every other field.

use crate::error::{CoreError, CoreResult, Entity};
use crate::model::contact::Contact;
use crate::model::field::Name;
use chrono::{Datelike, Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Default look-ahead window for upcoming birthdays, in days.
pub const DEFAULT_BIRTHDAY_WINDOW_DAYS: u32 = 7;

/// Ordered, name-keyed collection of contacts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Contact>", into = "Vec<Contact>")]
pub struct AddressBook {
    contacts: Vec<Contact>,
    index: HashMap<String, usize>,
}

impl TryFrom<Vec<Contact>> for AddressBook {
    type Error = String;

    fn try_from(value: Vec<Contact>) -> Result<Self, Self::Error> {
        let mut book = Self::new();
        for contact in value {
            book.add_record(contact).map_err(|err| err.to_string())?;
        }
        Ok(book)
    }
}

impl From<AddressBook> for Vec<Contact> {
    fn from(value: AddressBook) -> Self {
        value.contacts
    }
}

/// Contact whose birthday this year falls inside the requested window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingBirthday<'a> {
    pub contact: &'a Contact,
    /// This year's anniversary, on or after today.
    pub date: NaiveDate,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Contacts in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Contact> {
        self.contacts.iter()
    }

    /// Inserts a new contact under its name.
    ///
    /// # Errors
    /// - `Duplicate` when another contact already owns the name.
    pub fn add_record(&mut self, contact: Contact) -> CoreResult<&mut Contact> {
        let key = contact.name().value().clone();
        if self.index.contains_key(&key) {
            return Err(CoreError::duplicate(Entity::Contact, key));
        }
        let position = self.contacts.len();
        self.index.insert(key, position);
        self.contacts.push(contact);
        Ok(&mut self.contacts[position])
    }

    /// Exact name lookup.
    pub fn find(&self, name: &str) -> Option<&Contact> {
        self.index
            .get(name)
            .map(|position| &self.contacts[*position])
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Contact> {
        let position = self.index.get(name).copied()?;
        self.contacts.get_mut(position)
    }

    /// Exact name lookup that reports absence as `NotFound`.
    pub fn get(&self, name: &str) -> CoreResult<&Contact> {
        self.find(name)
            .ok_or_else(|| CoreError::not_found(Entity::Contact, name))
    }

    pub fn get_mut(&mut self, name: &str) -> CoreResult<&mut Contact> {
        self.find_mut(name)
            .ok_or_else(|| CoreError::not_found(Entity::Contact, name))
    }

    /// Removes and returns the contact stored under `name`.
    pub fn delete(&mut self, name: &str) -> CoreResult<Contact> {
        let position = self
            .index
            .remove(name)
            .ok_or_else(|| CoreError::not_found(Entity::Contact, name))?;
        let removed = self.contacts.remove(position);
        for slot in self.index.values_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }
        Ok(removed)
    }

    /// Renames a contact and re-keys it in the same step.
    ///
    /// # Errors
    /// - `NotFound` when `old` is not a stored name.
    /// - `Validation` when `new` is not a valid name.
    /// - `Duplicate` when another contact already owns the new name.
    pub fn rename(&mut self, old: &str, new: &str) -> CoreResult<&Contact> {
        let position = *self
            .index
            .get(old)
            .ok_or_else(|| CoreError::not_found(Entity::Contact, old))?;
        let name = Name::parse(new)?;
        let key = name.value().clone();
        if key != old && self.index.contains_key(&key) {
            return Err(CoreError::duplicate(Entity::Contact, key));
        }

        self.index.remove(old);
        self.index.insert(key, position);
        self.contacts[position].rename(name);
        Ok(&self.contacts[position])
    }

    /// Contacts whose birthday, moved onto the current year, falls within
    /// `[today, today + days]`, ordered by name.
    pub fn upcoming_birthdays(&self, days: u32) -> Vec<UpcomingBirthday<'_>> {
        self.upcoming_birthdays_on(Local::now().date_naive(), days)
    }

    /// Same as [`AddressBook::upcoming_birthdays`] with an explicit `today`.
    ///
    /// Feb 29 birthdays are celebrated on Feb 28 in non-leap years.
    pub fn upcoming_birthdays_on(&self, today: NaiveDate, days: u32) -> Vec<UpcomingBirthday<'_>> {
        let end = today
            .checked_add_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MAX);

        let mut upcoming = self
            .contacts
            .iter()
            .filter_map(|contact| {
                let birthday = contact.birthday()?;
                let date = anniversary_in(*birthday.value(), today.year())?;
                (today <= date && date <= end).then_some(UpcomingBirthday { contact, date })
            })
            .collect::<Vec<_>>();
        upcoming.sort_by(|left, right| left.contact.name().value().cmp(right.contact.name().value()));
        upcoming
    }

    /// Case-insensitive substring search on one contact field.
    ///
    /// `field` is one of `name`, `phones` (alias `phone`), `email`,
    /// `birthday`, `address`. Results keep insertion order.
    ///
    /// # Errors
    /// - `Query` when the field is unknown or the query is blank.
    pub fn search_contacts(&self, field: &str, query: &str) -> CoreResult<Vec<&Contact>> {
        let field = field.parse::<SearchField>()?;
        self.search_by(field, query)
    }

    /// Typed variant of [`AddressBook::search_contacts`].
    pub fn search_by(&self, field: SearchField, query: &str) -> CoreResult<Vec<&Contact>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Err(CoreError::Query("Search query cannot be empty.".to_string()));
        }
        let hit = |value: &str| value.to_lowercase().contains(&needle);

        Ok(self
            .contacts
            .iter()
            .filter(|contact| match field.extract(contact) {
                FieldValues::Single(value) => value.as_deref().is_some_and(hit),
                FieldValues::Multi(values) => values.into_iter().any(hit),
            })
            .collect())
    }
}

/// Anniversary of `birthday` in `year`; Feb 29 maps to Feb 28 when needed.
pub fn anniversary_in(birthday: NaiveDate, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, birthday.month(), birthday.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
}

/// Searchable contact field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Name,
    Phones,
    Email,
    Birthday,
    Address,
}

/// Whether a field holds one value or a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldArity {
    Single,
    Multi,
}

/// Rendered values of one contact field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValues<'a> {
    Single(Option<String>),
    Multi(Vec<&'a str>),
}

impl SearchField {
    pub const ALL: [Self; 5] = [
        Self::Name,
        Self::Phones,
        Self::Email,
        Self::Birthday,
        Self::Address,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Phones => "phones",
            Self::Email => "email",
            Self::Birthday => "birthday",
            Self::Address => "address",
        }
    }

    pub fn arity(self) -> FieldArity {
        match self {
            Self::Phones => FieldArity::Multi,
            Self::Name | Self::Email | Self::Birthday | Self::Address => FieldArity::Single,
        }
    }

    /// Extracts the rendered field values from a contact.
    pub fn extract(self, contact: &Contact) -> FieldValues<'_> {
        match self {
            Self::Name => FieldValues::Single(Some(contact.name().render())),
            Self::Phones => FieldValues::Multi(contact.phone_values()),
            Self::Email => FieldValues::Single(contact.email().map(|email| email.render())),
            Self::Birthday => {
                FieldValues::Single(contact.birthday().map(|birthday| birthday.render()))
            }
            Self::Address => FieldValues::Single(contact.address().map(|address| address.render())),
        }
    }
}

impl Display for SearchField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "phones" | "phone" => Ok(Self::Phones),
            "email" => Ok(Self::Email),
            "birthday" => Ok(Self::Birthday),
            "address" => Ok(Self::Address),
            _ => {
                let choices = Self::ALL.map(Self::as_str).join(", ");
                Err(CoreError::Query(format!(
                    "Field '{}' is not valid. Choose one of: {choices}.",
                    s.trim()
                )))
            }
        }
    }
}
