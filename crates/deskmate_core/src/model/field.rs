//! Validated scalar fields.
//!
//! # Responsibility
//! - Validate and normalize raw user input once, at construction.
//! - Keep a single generic wrapper; each field kind only supplies its rule
//!   and its rendering.
//!
//! # Invariants
//! - A `Field<K>` value always satisfies `K::validate`.
//! - Fields are immutable. Edits replace the whole field.
//! - Decoding a field from storage runs the same validation as user input.

use chrono::{Datelike, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::marker::PhantomData;
use std::ops::RangeInclusive;

/// Minimum contact name length in characters, after trimming.
pub const NAME_MIN_CHARS: usize = 2;
/// Maximum email length in characters.
pub const EMAIL_MAX_CHARS: usize = 254;
/// Maximum note title length in characters.
pub const TITLE_MAX_CHARS: usize = 40;
/// Display and input format for birthdays.
pub const BIRTHDAY_FORMAT: &str = "%d.%m.%Y";

const LOCAL_PHONE_DIGITS: usize = 10;
const INTERNATIONAL_PHONE_DIGITS: RangeInclusive<usize> = 10..=15;
const EARLIEST_BIRTH_YEAR: i32 = 1900;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}$").expect("valid email regex")
});
static PHONE_CHARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9 ().\-]+$").expect("valid phone regex"));
static BIRTHDAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}\.\d{2}\.\d{4}$").expect("valid birthday regex"));

/// Validation failure for one field kind.
///
/// The payload is a human-readable message that can be shown as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    Name(String),
    Phone(String),
    Email(String),
    Birthday(String),
    Address(String),
    Title(String),
    NoteText(String),
    Tag(String),
}

impl FieldError {
    /// Stable field name used in messages and logs.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Phone(_) => "phone",
            Self::Email(_) => "email",
            Self::Birthday(_) => "birthday",
            Self::Address(_) => "address",
            Self::Title(_) => "title",
            Self::NoteText(_) => "text",
            Self::Tag(_) => "tag",
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::Name(message)
            | Self::Phone(message)
            | Self::Email(message)
            | Self::Birthday(message)
            | Self::Address(message)
            | Self::Title(message)
            | Self::NoteText(message)
            | Self::Tag(message) => message,
        }
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl Error for FieldError {}

/// Validation and rendering rule for one field kind.
pub trait FieldKind {
    /// Normalized representation kept after validation.
    type Value: Clone + Debug + PartialEq + Eq;

    /// Validates raw input and returns its normalized value.
    fn validate(raw: &str) -> Result<Self::Value, FieldError>;

    /// Renders the normalized value for display and storage.
    fn render(value: &Self::Value) -> String;

    /// Rebuilds a value from its stored rendering.
    ///
    /// Kinds whose normalization drops information from the raw input
    /// override this; everything else re-validates.
    fn restore(stored: &str) -> Result<Self::Value, FieldError> {
        Self::validate(stored)
    }
}

/// Generic validated value parameterized by its field kind.
pub struct Field<K: FieldKind> {
    value: K::Value,
    kind: PhantomData<K>,
}

impl<K: FieldKind> Field<K> {
    /// Validates `raw` and wraps the normalized value.
    pub fn parse(raw: &str) -> Result<Self, FieldError> {
        K::validate(raw).map(Self::from_valid)
    }

    /// Normalized value.
    pub fn value(&self) -> &K::Value {
        &self.value
    }

    /// Rendered value, identical to the `Display` output.
    pub fn render(&self) -> String {
        K::render(&self.value)
    }

    fn from_valid(value: K::Value) -> Self {
        Self {
            value,
            kind: PhantomData,
        }
    }
}

impl<K: FieldKind> Clone for Field<K> {
    fn clone(&self) -> Self {
        Self::from_valid(self.value.clone())
    }
}

impl<K: FieldKind> Debug for Field<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Field").field(&self.value).finish()
    }
}

impl<K: FieldKind> PartialEq for Field<K> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<K: FieldKind> Eq for Field<K> {}

impl<K: FieldKind> Display for Field<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&K::render(&self.value))
    }
}

impl<K: FieldKind> Serialize for Field<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&K::render(&self.value))
    }
}

impl<'de, K: FieldKind> Deserialize<'de> for Field<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        K::restore(&raw)
            .map(Self::from_valid)
            .map_err(serde::de::Error::custom)
    }
}

/// Contact name: trimmed, at least two characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameKind;

/// Phone number normalized to digits only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhoneKind;

/// Email address, trimmed and lower-cased.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmailKind;

/// Birthday parsed from `DD.MM.YYYY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthdayKind;

/// Free-text postal address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressKind;

/// Note title: non-empty, at most 40 characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleKind;

pub type Name = Field<NameKind>;
pub type Phone = Field<PhoneKind>;
pub type Email = Field<EmailKind>;
pub type Birthday = Field<BirthdayKind>;
pub type Address = Field<AddressKind>;
pub type Title = Field<TitleKind>;

impl FieldKind for NameKind {
    type Value = String;

    fn validate(raw: &str) -> Result<String, FieldError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(FieldError::Name("Name cannot be empty.".to_string()));
        }
        if trimmed.chars().count() < NAME_MIN_CHARS {
            return Err(FieldError::Name(format!(
                "Name must be at least {NAME_MIN_CHARS} characters long."
            )));
        }
        Ok(trimmed.to_string())
    }

    fn render(value: &String) -> String {
        value.clone()
    }
}

impl FieldKind for PhoneKind {
    type Value = String;

    /// Accepts a local number (exactly 10 digits) or an international one
    /// (`+` or `00` prefix followed by 10-15 digits). Separators such as
    /// spaces, dashes, dots and parentheses are dropped. The `00` prefix is
    /// not part of the stored digits, so `+380...` and `00380...` compare
    /// equal. A `00...` input with exactly 10 digits is a local number.
    fn validate(raw: &str) -> Result<String, FieldError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(FieldError::Phone("Phone number cannot be empty.".to_string()));
        }
        if !PHONE_CHARS_RE.is_match(trimmed) {
            return Err(FieldError::Phone(format!(
                "Phone number `{trimmed}` contains unsupported characters."
            )));
        }

        let digits: String = trimmed.chars().filter(char::is_ascii_digit).collect();
        if trimmed.starts_with('+') {
            return international_digits(trimmed, digits);
        }
        if let Some(rest) = digits.strip_prefix("00") {
            if digits.len() != LOCAL_PHONE_DIGITS {
                return international_digits(trimmed, rest.to_string());
            }
        }
        if digits.len() != LOCAL_PHONE_DIGITS {
            return Err(FieldError::Phone(format!(
                "Phone number `{trimmed}` is not valid, use {LOCAL_PHONE_DIGITS} digits or an international +/00 number."
            )));
        }
        Ok(digits)
    }

    fn render(value: &String) -> String {
        value.clone()
    }

    /// Stored phones are digits only, local or international without the
    /// prefix.
    fn restore(stored: &str) -> Result<String, FieldError> {
        let is_digits = !stored.is_empty() && stored.chars().all(|c| c.is_ascii_digit());
        let len = stored.len();
        if is_digits && (len == LOCAL_PHONE_DIGITS || INTERNATIONAL_PHONE_DIGITS.contains(&len)) {
            Ok(stored.to_string())
        } else {
            Err(FieldError::Phone(format!(
                "Stored phone number `{stored}` is not valid."
            )))
        }
    }
}

fn international_digits(trimmed: &str, digits: String) -> Result<String, FieldError> {
    if INTERNATIONAL_PHONE_DIGITS.contains(&digits.len()) {
        Ok(digits)
    } else {
        Err(FieldError::Phone(format!(
            "International phone number `{trimmed}` must have {}-{} digits after the prefix.",
            INTERNATIONAL_PHONE_DIGITS.start(),
            INTERNATIONAL_PHONE_DIGITS.end()
        )))
    }
}

impl FieldKind for EmailKind {
    type Value = String;

    fn validate(raw: &str) -> Result<String, FieldError> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(FieldError::Email("Email cannot be empty.".to_string()));
        }
        if normalized.chars().count() > EMAIL_MAX_CHARS {
            return Err(FieldError::Email(format!(
                "Email is too long (max {EMAIL_MAX_CHARS} characters)."
            )));
        }
        if normalized.matches('@').count() != 1 || !EMAIL_RE.is_match(&normalized) {
            return Err(FieldError::Email(format!(
                "Invalid email address: {normalized}"
            )));
        }
        Ok(normalized)
    }

    fn render(value: &String) -> String {
        value.clone()
    }
}

impl FieldKind for BirthdayKind {
    type Value = NaiveDate;

    fn validate(raw: &str) -> Result<NaiveDate, FieldError> {
        validate_birthday_on(raw, Local::now().date_naive())
    }

    fn render(value: &NaiveDate) -> String {
        value.format(BIRTHDAY_FORMAT).to_string()
    }
}

impl Field<BirthdayKind> {
    /// Parses a birthday against an explicit `today` instead of the clock.
    pub fn parse_on(raw: &str, today: NaiveDate) -> Result<Self, FieldError> {
        validate_birthday_on(raw, today).map(Self::from_valid)
    }
}

fn validate_birthday_on(raw: &str, today: NaiveDate) -> Result<NaiveDate, FieldError> {
    let trimmed = raw.trim();
    let invalid_format =
        || FieldError::Birthday("Invalid date format. Please use DD.MM.YYYY".to_string());
    if !BIRTHDAY_RE.is_match(trimmed) {
        return Err(invalid_format());
    }
    let date = NaiveDate::parse_from_str(trimmed, BIRTHDAY_FORMAT).map_err(|_| invalid_format())?;
    if date > today {
        return Err(FieldError::Birthday(
            "Birthday cannot be in the future.".to_string(),
        ));
    }
    if date.year() < EARLIEST_BIRTH_YEAR {
        return Err(FieldError::Birthday(format!(
            "Birthday cannot be earlier than 01.01.{EARLIEST_BIRTH_YEAR}."
        )));
    }
    Ok(date)
}

impl FieldKind for AddressKind {
    type Value = String;

    fn validate(raw: &str) -> Result<String, FieldError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(FieldError::Address("Address cannot be empty.".to_string()));
        }
        Ok(trimmed.to_string())
    }

    fn render(value: &String) -> String {
        value.clone()
    }
}

impl FieldKind for TitleKind {
    type Value = String;

    fn validate(raw: &str) -> Result<String, FieldError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(FieldError::Title("Title cannot be empty.".to_string()));
        }
        if trimmed.chars().count() > TITLE_MAX_CHARS {
            return Err(FieldError::Title(format!(
                "Title is too long (max {TITLE_MAX_CHARS} characters)."
            )));
        }
        Ok(trimmed.to_string())
    }

    fn render(value: &String) -> String {
        value.clone()
    }
}
