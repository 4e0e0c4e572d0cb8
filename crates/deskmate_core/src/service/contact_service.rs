//! Contact use-case service.
//!
//! # Responsibility
//! - Provide command-level contact operations over an `AddressBook`.
//! - Validate multi-field changes fully before touching the book.
//!
//! # Invariants
//! - A failed operation leaves the book unchanged.
//! - A phone that is not on record is reported as `NotFound`, never
//!   silently ignored.

use crate::error::{CoreError, CoreResult, Entity};
use crate::model::contact::Contact;
use crate::model::field::{Birthday, Name};
use crate::repo::address_book::{AddressBook, UpcomingBirthday};
use log::debug;

/// Whether an operation created a contact or changed an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Created,
    Updated,
}

impl AddOutcome {
    fn label(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
        }
    }
}

/// Input for creating a contact with all optional fields at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub birthday: Option<String>,
    pub address: Option<String>,
}

/// Changes applied by [`ContactService::edit_contact`].
///
/// `phone` alone adds a phone; `old_phone` + `phone` replaces one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactEdit {
    pub new_name: Option<String>,
    pub phone: Option<String>,
    pub old_phone: Option<String>,
    pub email: Option<String>,
    pub birthday: Option<String>,
    pub address: Option<String>,
}

impl ContactEdit {
    /// True when no field carries a non-blank value.
    pub fn is_empty(&self) -> bool {
        [
            &self.new_name,
            &self.phone,
            &self.old_phone,
            &self.email,
            &self.birthday,
            &self.address,
        ]
        .into_iter()
        .all(|value| non_blank(value.as_deref()).is_none())
    }
}

/// Contact service facade over one address book.
pub struct ContactService<'a> {
    book: &'a mut AddressBook,
}

impl<'a> ContactService<'a> {
    pub fn new(book: &'a mut AddressBook) -> Self {
        Self { book }
    }

    /// Adds `phone` to the contact `name`, creating the contact if needed.
    pub fn add_contact(&mut self, name: &str, phone: Option<&str>) -> CoreResult<AddOutcome> {
        let outcome = match self.book.find_mut(name) {
            Some(contact) => {
                if let Some(phone) = phone {
                    contact.add_phone(phone)?;
                }
                AddOutcome::Updated
            }
            None => {
                let mut contact = Contact::new(name)?;
                if let Some(phone) = phone {
                    contact.add_phone(phone)?;
                }
                self.book.add_record(contact)?;
                AddOutcome::Created
            }
        };
        debug!(
            "event=contact_add module=service status=ok outcome={}",
            outcome.label()
        );
        Ok(outcome)
    }

    /// Creates a contact from a draft.
    ///
    /// # Errors
    /// - `Duplicate` when the name is taken.
    /// - `Validation` for the first invalid field.
    pub fn create_contact(&mut self, draft: &ContactDraft) -> CoreResult<&Contact> {
        let name = Name::parse(&draft.name)?;
        if self.book.find(name.value()).is_some() {
            return Err(CoreError::duplicate(Entity::Contact, name.value().clone()));
        }

        let mut contact = Contact::with_name(name);
        if let Some(phone) = non_blank(draft.phone.as_deref()) {
            contact.add_phone(phone)?;
        }
        if let Some(email) = non_blank(draft.email.as_deref()) {
            contact.set_email(email)?;
        }
        if let Some(birthday) = non_blank(draft.birthday.as_deref()) {
            contact.set_birthday(birthday)?;
        }
        if let Some(address) = non_blank(draft.address.as_deref()) {
            contact.set_address(address)?;
        }

        debug!(
            "event=contact_create module=service status=ok phones={}",
            contact.phones().len()
        );
        Ok(&*self.book.add_record(contact)?)
    }

    /// Applies an edit to the contact `name`. Returns the edited contact.
    pub fn edit_contact(&mut self, name: &str, edit: &ContactEdit) -> CoreResult<&Contact> {
        if edit.is_empty() {
            return Err(CoreError::Argument("Nothing to change.".to_string()));
        }

        let mut staged = self.book.get(name)?.clone();
        match (non_blank(edit.old_phone.as_deref()), non_blank(edit.phone.as_deref())) {
            (Some(old), Some(new)) => {
                if !staged.edit_phone(old, new)? {
                    return Err(CoreError::not_found(Entity::Phone, old));
                }
            }
            (None, Some(new)) => staged.add_phone(new)?,
            (Some(_), None) => {
                return Err(CoreError::Argument(
                    "A replacement phone is required together with the old phone.".to_string(),
                ));
            }
            (None, None) => {}
        }
        if let Some(email) = non_blank(edit.email.as_deref()) {
            staged.set_email(email)?;
        }
        if let Some(birthday) = non_blank(edit.birthday.as_deref()) {
            staged.set_birthday(birthday)?;
        }
        if let Some(address) = non_blank(edit.address.as_deref()) {
            staged.set_address(address)?;
        }

        let key = match non_blank(edit.new_name.as_deref()) {
            Some(new_name) => self.book.rename(name, new_name)?.name().value().clone(),
            None => name.to_string(),
        };
        let slot = self.book.get_mut(&key)?;
        staged.rename(slot.name().clone());
        *slot = staged;

        debug!(
            "event=contact_edit module=service status=ok renamed={}",
            key != name
        );
        Ok(&*slot)
    }

    /// Replaces `old` with `new` on the contact `name`.
    pub fn change_phone(&mut self, name: &str, old: &str, new: &str) -> CoreResult<()> {
        let contact = self.book.get_mut(name)?;
        if !contact.edit_phone(old, new)? {
            return Err(CoreError::not_found(Entity::Phone, old));
        }
        Ok(())
    }

    /// Removes `phone` from the contact `name`.
    ///
    /// Idempotent at the record level, but an unknown phone is still
    /// reported so the user sees nothing changed.
    pub fn remove_phone(&mut self, name: &str, phone: &str) -> CoreResult<()> {
        let contact = self.book.get_mut(name)?;
        if contact.remove_phone(phone) == 0 {
            return Err(CoreError::not_found(Entity::Phone, phone));
        }
        Ok(())
    }

    pub fn contact(&self, name: &str) -> CoreResult<&Contact> {
        self.book.get(name)
    }

    /// Sets a birthday, creating the contact when it does not exist yet.
    pub fn set_birthday(&mut self, name: &str, date: &str) -> CoreResult<AddOutcome> {
        let birthday = Birthday::parse(date)?;
        match self.book.find_mut(name) {
            Some(contact) => {
                contact.set_birthday_field(birthday);
                Ok(AddOutcome::Updated)
            }
            None => {
                let mut contact = Contact::new(name)?;
                contact.set_birthday_field(birthday);
                self.book.add_record(contact)?;
                Ok(AddOutcome::Created)
            }
        }
    }

    pub fn birthday(&self, name: &str) -> CoreResult<Option<&Birthday>> {
        Ok(self.book.get(name)?.birthday())
    }

    pub fn upcoming_birthdays(&self, days: u32) -> Vec<UpcomingBirthday<'_>> {
        let upcoming = self.book.upcoming_birthdays(days);
        debug!(
            "event=birthdays_query module=service status=ok days={} hits={}",
            days,
            upcoming.len()
        );
        upcoming
    }

    pub fn search(&self, field: &str, query: &str) -> CoreResult<Vec<&Contact>> {
        let hits = self.book.search_contacts(field, query)?;
        debug!(
            "event=contact_search module=service status=ok hits={}",
            hits.len()
        );
        Ok(hits)
    }

    pub fn delete_contact(&mut self, name: &str) -> CoreResult<Contact> {
        let removed = self.book.delete(name)?;
        debug!("event=contact_delete module=service status=ok");
        Ok(removed)
    }

    pub fn all(&self) -> impl Iterator<Item = &Contact> {
        self.book.iter()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}
