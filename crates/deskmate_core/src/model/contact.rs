//! Contact record.
//!
//! # Responsibility
//! - Aggregate one name, an ordered phone list and optional email,
//!   birthday and address.
//! - Own phone mutations and their uniqueness rule.
//!
//! # Invariants
//! - No two phones in a record share the same normalized value.
//! - The name only changes through `AddressBook::rename`, which keeps the
//!   book index in sync.

use crate::error::{CoreError, CoreResult, Entity};
use crate::model::field::{Address, Birthday, Email, FieldError, Name, Phone};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Contact data aggregate stored in the address book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredContact")]
pub struct Contact {
    name: Name,
    phones: Vec<Phone>,
    email: Option<Email>,
    birthday: Option<Birthday>,
    address: Option<Address>,
}

/// Decoding shape; phone uniqueness is checked before a `Contact` exists.
#[derive(Deserialize)]
struct StoredContact {
    name: Name,
    #[serde(default)]
    phones: Vec<Phone>,
    email: Option<Email>,
    birthday: Option<Birthday>,
    address: Option<Address>,
}

impl TryFrom<StoredContact> for Contact {
    type Error = String;

    fn try_from(value: StoredContact) -> Result<Self, Self::Error> {
        let mut contact = Contact::with_name(value.name);
        for phone in value.phones {
            if contact.phones.contains(&phone) {
                return Err(format!(
                    "duplicate phone `{phone}` for contact `{}`",
                    contact.name
                ));
            }
            contact.phones.push(phone);
        }
        contact.email = value.email;
        contact.birthday = value.birthday;
        contact.address = value.address;
        Ok(contact)
    }
}

impl Contact {
    /// Creates an empty contact from a raw name.
    pub fn new(name: &str) -> Result<Self, FieldError> {
        Name::parse(name).map(Self::with_name)
    }

    /// Creates an empty contact from an already validated name.
    pub fn with_name(name: Name) -> Self {
        Self {
            name,
            phones: Vec::new(),
            email: None,
            birthday: None,
            address: None,
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn phones(&self) -> &[Phone] {
        &self.phones
    }

    pub fn email(&self) -> Option<&Email> {
        self.email.as_ref()
    }

    pub fn birthday(&self) -> Option<&Birthday> {
        self.birthday.as_ref()
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    /// Normalized phone values in insertion order.
    pub fn phone_values(&self) -> Vec<&str> {
        self.phones.iter().map(|phone| phone.value().as_str()).collect()
    }

    /// Validates and appends a phone.
    ///
    /// # Errors
    /// - `Validation` when `raw` is not a valid phone.
    /// - `Duplicate` when the normalized value is already on record.
    pub fn add_phone(&mut self, raw: &str) -> CoreResult<()> {
        let phone = Phone::parse(raw)?;
        if self.phones.contains(&phone) {
            return Err(CoreError::duplicate(Entity::Phone, phone.value().clone()));
        }
        self.phones.push(phone);
        Ok(())
    }

    /// Replaces the first phone equal to `old` with a freshly validated `new`.
    ///
    /// Returns `Ok(false)` when no phone matches `old`; callers must surface
    /// that as a user-facing error.
    ///
    /// # Errors
    /// - `Validation` when `new` is not a valid phone.
    /// - `Duplicate` when `new` equals another phone of this record.
    pub fn edit_phone(&mut self, old: &str, new: &str) -> CoreResult<bool> {
        let target = phone_lookup_key(old);
        let Some(position) = self
            .phones
            .iter()
            .position(|phone| phone.value() == &target)
        else {
            return Ok(false);
        };

        let replacement = Phone::parse(new)?;
        let taken = self
            .phones
            .iter()
            .enumerate()
            .any(|(index, phone)| index != position && *phone == replacement);
        if taken {
            return Err(CoreError::duplicate(
                Entity::Phone,
                replacement.value().clone(),
            ));
        }

        self.phones[position] = replacement;
        Ok(true)
    }

    /// Removes every phone equal to `value`. Returns how many were removed.
    pub fn remove_phone(&mut self, value: &str) -> usize {
        let target = phone_lookup_key(value);
        let before = self.phones.len();
        self.phones.retain(|phone| phone.value() != &target);
        before - self.phones.len()
    }

    /// Returns the phone equal to `value`, if any.
    pub fn find_phone(&self, value: &str) -> Option<&Phone> {
        let target = phone_lookup_key(value);
        self.phones.iter().find(|phone| phone.value() == &target)
    }

    pub fn set_email(&mut self, raw: &str) -> Result<(), FieldError> {
        self.email = Some(Email::parse(raw)?);
        Ok(())
    }

    pub fn set_birthday(&mut self, raw: &str) -> Result<(), FieldError> {
        self.birthday = Some(Birthday::parse(raw)?);
        Ok(())
    }

    pub fn set_address(&mut self, raw: &str) -> Result<(), FieldError> {
        self.address = Some(Address::parse(raw)?);
        Ok(())
    }

    pub(crate) fn set_birthday_field(&mut self, birthday: Birthday) {
        self.birthday = Some(birthday);
    }

    pub(crate) fn rename(&mut self, name: Name) {
        self.name = name;
    }
}

/// Stored phones are digits only; normalize lookups when the input parses.
fn phone_lookup_key(raw: &str) -> String {
    Phone::parse(raw)
        .map(|phone| phone.value().clone())
        .unwrap_or_else(|_| raw.trim().to_string())
}

impl Display for Contact {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = if self.phones.len() > 1 { "phones" } else { "phone" };
        write!(
            f,
            "Name: {} | {label}: {} | email: {} | birthday: {} | address: {}",
            self.name,
            self.phone_values().join("; "),
            render_optional(self.email.as_ref()),
            render_optional(self.birthday.as_ref()),
            render_optional(self.address.as_ref()),
        )
    }
}

fn render_optional<T: Display>(value: Option<&T>) -> String {
    value.map(ToString::to_string).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::Contact;
    use crate::error::{CoreError, Entity};

    #[test]
    fn add_phone_rejects_duplicate_normalized_value() {
        let mut contact = Contact::new("Mykola").unwrap();
        contact.add_phone("0660320528").unwrap();

        let err = contact.add_phone("066-032-05-28").unwrap_err();
        assert_eq!(err, CoreError::duplicate(Entity::Phone, "0660320528"));
        assert_eq!(contact.phones().len(), 1);
    }

    #[test]
    fn edit_phone_reports_missing_match() {
        let mut contact = Contact::new("Mykola").unwrap();
        contact.add_phone("0660320528").unwrap();

        assert!(!contact.edit_phone("0000000000", "0660320529").unwrap());
        assert!(contact.edit_phone("0660320528", "0660320529").unwrap());
        assert_eq!(contact.phone_values(), vec!["0660320529"]);
    }

    #[test]
    fn edit_phone_keeps_uniqueness() {
        let mut contact = Contact::new("Mykola").unwrap();
        contact.add_phone("0660320528").unwrap();
        contact.add_phone("0660320529").unwrap();

        let err = contact.edit_phone("0660320528", "0660320529").unwrap_err();
        assert!(matches!(err, CoreError::Duplicate { .. }));
        assert!(contact.edit_phone("0660320528", "0660320528").unwrap());
    }

    #[test]
    fn remove_phone_is_idempotent() {
        let mut contact = Contact::new("Mykola").unwrap();
        contact.add_phone("0660320528").unwrap();

        assert_eq!(contact.remove_phone("0660320528"), 1);
        assert_eq!(contact.remove_phone("0660320528"), 0);
        assert!(contact.phones().is_empty());
    }

    #[test]
    fn display_keeps_field_order_and_placeholders() {
        let mut contact = Contact::new("John").unwrap();
        assert_eq!(
            contact.to_string(),
            "Name: John | phone:  | email:  | birthday:  | address: "
        );

        contact.add_phone("0660320528").unwrap();
        contact.add_phone("0660320529").unwrap();
        contact.set_email("john@example.com").unwrap();
        contact.set_birthday("05.03.1990").unwrap();
        contact.set_address("Kyiv, Khreshchatyk 1").unwrap();
        assert_eq!(
            contact.to_string(),
            "Name: John | phones: 0660320528; 0660320529 | email: john@example.com | birthday: 05.03.1990 | address: Kyiv, Khreshchatyk 1"
        );
    }

    #[test]
    fn decoding_rejects_duplicate_phones() {
        let value = serde_json::json!({
            "name": "John",
            "phones": ["0660320528", "066 032 05 28"],
            "email": null,
            "birthday": null,
            "address": null
        });

        let err = serde_json::from_value::<Contact>(value).unwrap_err();
        assert!(err.to_string().contains("duplicate phone"), "unexpected error: {err}");
    }
}
