//! Command dispatch over one in-memory session.
//!
//! # Responsibility
//! - Own the address book and note collection for the process lifetime.
//! - Map one input line to one displayable reply.
//!
//! # Invariants
//! - `dispatch` never fails: every `CoreError` becomes a one-line reply.
//! - Log events carry the command name and error code only, never the
//!   user's input.
//!
//! # See also
//! - `crate::parse` for tokenizing and option parsing.

use crate::command::Command;
use crate::parse::{parse_input, parse_named_args, split_tags, Arguments};
use crate::render;
use deskmate_core::{
    AddOutcome, AddressBook, ContactDraft, ContactEdit, ContactService, CoreError, CoreResult,
    FileStore, NoteCollection, NoteDraft, NoteFilter, NoteService, NoteUpdate, StoreResult,
    DEFAULT_BIRTHDAY_WINDOW_DAYS,
};
use log::debug;

pub const INVALID_COMMAND: &str = "Invalid command.";
pub const GOODBYE: &str = "Good bye!";

/// Reply to one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub message: String,
    /// The loop should stop after printing `message`.
    pub exit: bool,
}

impl Outcome {
    fn reply(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit: false,
        }
    }

    fn exit(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit: true,
        }
    }
}

/// Address book and notes held by the running assistant.
#[derive(Debug, Default)]
pub struct Session {
    book: AddressBook,
    notes: NoteCollection,
}

impl Session {
    pub fn new(book: AddressBook, notes: NoteCollection) -> Self {
        Self { book, notes }
    }

    /// Loads both collections; missing or damaged files degrade to empty.
    pub fn load(store: &FileStore) -> Self {
        Self::new(store.load_address_book(), store.load_notes())
    }

    /// Saves both collections. Both saves are attempted; the first error wins.
    pub fn save(&self, store: &FileStore) -> StoreResult<()> {
        let book = store.save_address_book(&self.book);
        let notes = store.save_notes(&self.notes);
        book.and(notes)
    }

    pub fn book(&self) -> &AddressBook {
        &self.book
    }

    pub fn notes(&self) -> &NoteCollection {
        &self.notes
    }

    pub fn dispatch(&mut self, line: &str) -> Outcome {
        let (name, args) = match parse_input(line) {
            Ok(parsed) => parsed,
            Err(err) => {
                debug!(
                    "event=command module=cli status=error code={}",
                    err.code()
                );
                return Outcome::reply(err.to_string());
            }
        };
        let Some(command) = Command::from_name(&name) else {
            debug!("event=command module=cli status=unknown");
            return Outcome::reply(INVALID_COMMAND);
        };

        match self.run(command, &args) {
            Ok(outcome) => {
                debug!(
                    "event=command module=cli status=ok command={}",
                    command.name()
                );
                outcome
            }
            Err(err) => {
                debug!(
                    "event=command module=cli status=error command={} code={}",
                    command.name(),
                    err.code()
                );
                Outcome::reply(err.to_string())
            }
        }
    }

    fn run(&mut self, command: Command, args: &[String]) -> CoreResult<Outcome> {
        let message = match command {
            Command::Hello => "How can I help you?".to_string(),
            Command::Help => render::commands_overview(),
            Command::Exit => return Ok(Outcome::exit(GOODBYE)),
            Command::Add => self.add(args)?,
            Command::AddContact => self.add_contact(args)?,
            Command::EditContact => self.edit_contact(args)?,
            Command::DeleteContact => {
                let name = required(args, 0, command)?;
                ContactService::new(&mut self.book).delete_contact(name)?;
                format!("Contact {name} deleted.")
            }
            Command::Change => {
                let name = required(args, 0, command)?;
                let old = required(args, 1, command)?;
                let new = required(args, 2, command)?;
                ContactService::new(&mut self.book).change_phone(name, old, new)?;
                "Phone number updated.".to_string()
            }
            Command::RemovePhone => {
                let name = required(args, 0, command)?;
                let phone = required(args, 1, command)?;
                ContactService::new(&mut self.book).remove_phone(name, phone)?;
                "Phone number removed.".to_string()
            }
            Command::Phone => self.show_phone(args)?,
            Command::All => {
                if self.book.is_empty() {
                    "Address book is empty.".to_string()
                } else {
                    render::contact_lines(self.book.iter())
                }
            }
            Command::AddBirthday => {
                let name = required(args, 0, command)?;
                let date = required(args, 1, command)?;
                let outcome = ContactService::new(&mut self.book).set_birthday(name, date)?;
                match outcome {
                    AddOutcome::Created => format!("Contact {name} added with birthday."),
                    AddOutcome::Updated => format!("Birthday added for {name}."),
                }
            }
            Command::ShowBirthday => {
                let name = required(args, 0, command)?;
                let service = ContactService::new(&mut self.book);
                match service.birthday(name)? {
                    Some(birthday) => format!("{name}'s birthday is {birthday}"),
                    None => format!("{name} has no birthday info."),
                }
            }
            Command::Birthdays => self.birthdays(args)?,
            Command::SearchContact => self.search_contact(args)?,
            Command::NoteAdd => self.note_add(args)?,
            Command::NotesAll => {
                if self.notes.is_empty() {
                    "Can not find any note.".to_string()
                } else {
                    render::note_blocks(self.notes.iter())
                }
            }
            Command::Notes => self.notes_filtered(args)?,
            Command::NoteUpdate => self.note_update(args)?,
            Command::NoteDelete => {
                let id = required(args, 0, command)?;
                let removed = NoteService::new(&mut self.notes).delete_note(id)?;
                format!("Note {} deleted.", removed.id())
            }
            Command::NoteTagAdd => {
                let id = required(args, 0, command)?;
                let added = NoteService::new(&mut self.notes).add_tags(id, &args[1..])?;
                format!("Added {added} tag(s) to note {}.", id.trim())
            }
            Command::NoteTagRemove => {
                let id = required(args, 0, command)?;
                let removed = NoteService::new(&mut self.notes).remove_tags(id, &args[1..])?;
                format!("Removed {removed} tag(s) from note {}.", id.trim())
            }
            Command::Tags => {
                let tags = self.notes.all_tags();
                if tags.is_empty() {
                    "No tags yet.".to_string()
                } else {
                    format!("Tags: {}", tags.join(", "))
                }
            }
        };
        Ok(Outcome::reply(message))
    }

    fn add(&mut self, args: &[String]) -> CoreResult<String> {
        let name = required(args, 0, Command::Add)?;
        let phone = args.get(1).map(String::as_str);
        let outcome = ContactService::new(&mut self.book).add_contact(name, phone)?;
        Ok(match outcome {
            AddOutcome::Created => "Contact added.".to_string(),
            AddOutcome::Updated => "Contact updated.".to_string(),
        })
    }

    fn add_contact(&mut self, args: &[String]) -> CoreResult<String> {
        let parsed = parse_named_args(args);
        parsed.expect_only(&["phone", "email", "birthday", "address"])?;
        let name = required(parsed.positional(), 0, Command::AddContact)?;
        let draft = ContactDraft {
            name: name.to_string(),
            phone: owned(&parsed, "phone"),
            email: owned(&parsed, "email"),
            birthday: owned(&parsed, "birthday"),
            address: owned(&parsed, "address"),
        };
        let mut service = ContactService::new(&mut self.book);
        let contact = service.create_contact(&draft)?;
        Ok(format!("Contact {} added.", contact.name()))
    }

    fn edit_contact(&mut self, args: &[String]) -> CoreResult<String> {
        let parsed = parse_named_args(args);
        parsed.expect_only(&["name", "phone", "old-phone", "email", "birthday", "address"])?;
        let name = required(parsed.positional(), 0, Command::EditContact)?;
        let edit = ContactEdit {
            new_name: owned(&parsed, "name"),
            phone: owned(&parsed, "phone"),
            old_phone: owned(&parsed, "old-phone"),
            email: owned(&parsed, "email"),
            birthday: owned(&parsed, "birthday"),
            address: owned(&parsed, "address"),
        };
        let mut service = ContactService::new(&mut self.book);
        let contact = service.edit_contact(name, &edit)?;
        Ok(format!("Contact {} updated.", contact.name()))
    }

    fn show_phone(&mut self, args: &[String]) -> CoreResult<String> {
        let name = required(args, 0, Command::Phone)?;
        let service = ContactService::new(&mut self.book);
        let contact = service.contact(name)?;
        if contact.phones().is_empty() {
            return Ok(format!("{name} has no phone numbers."));
        }
        Ok(format!("{name}'s phones: {}", contact.phone_values().join(", ")))
    }

    fn birthdays(&mut self, args: &[String]) -> CoreResult<String> {
        let days = match args.first() {
            Some(raw) => raw.trim().parse::<u32>().map_err(|_| {
                CoreError::Argument(format!(
                    "Days must be a whole number, got `{}`.",
                    raw.trim()
                ))
            })?,
            None => DEFAULT_BIRTHDAY_WINDOW_DAYS,
        };
        let service = ContactService::new(&mut self.book);
        let upcoming = service.upcoming_birthdays(days);
        Ok(render::upcoming_birthdays(days, &upcoming))
    }

    fn search_contact(&mut self, args: &[String]) -> CoreResult<String> {
        let field = required(args, 0, Command::SearchContact)?;
        required(args, 1, Command::SearchContact)?;
        let query = args[1..].join(" ");
        let service = ContactService::new(&mut self.book);
        let hits = service.search(field, &query)?;
        if hits.is_empty() {
            return Ok("No matches found.".to_string());
        }
        Ok(render::contact_lines(hits))
    }

    fn note_add(&mut self, args: &[String]) -> CoreResult<String> {
        let parsed = parse_named_args(args);
        parsed.expect_only(&["title", "text", "tags"])?;
        let draft = NoteDraft {
            title: parsed.get("title").unwrap_or_default().to_string(),
            text: parsed.get("text").unwrap_or_default().to_string(),
            tags: parsed.get("tags").map(split_tags).unwrap_or_default(),
        };
        let mut service = NoteService::new(&mut self.notes);
        let note = service.add_note(&draft)?;
        Ok(format!(
            "Note with title {} added (id {}).",
            note.title(),
            note.id()
        ))
    }

    fn notes_filtered(&mut self, args: &[String]) -> CoreResult<String> {
        let parsed = parse_named_args(args);
        parsed.expect_only(&["search", "tags"])?;
        let filter = NoteFilter {
            search: owned(&parsed, "search"),
            tags: parsed.get("tags").map(split_tags).unwrap_or_default(),
        };
        let service = NoteService::new(&mut self.notes);
        let listed = service.list(&filter)?;
        if listed.is_empty() {
            return Ok("No matching notes found.".to_string());
        }
        Ok(render::note_blocks(listed))
    }

    fn note_update(&mut self, args: &[String]) -> CoreResult<String> {
        let parsed = parse_named_args(args);
        parsed.expect_only(&["title", "text", "tags"])?;
        let id = required(parsed.positional(), 0, Command::NoteUpdate)?;
        let update = NoteUpdate {
            title: owned(&parsed, "title"),
            text: owned(&parsed, "text"),
            tags: parsed.get("tags").map(split_tags),
        };
        let mut service = NoteService::new(&mut self.notes);
        let note = service.update_note(id, update)?;
        Ok(format!("Note {} updated.", note.id()))
    }
}

fn required(args: &[String], index: usize, command: Command) -> CoreResult<&str> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| usage_error(command))
}

fn usage_error(command: Command) -> CoreError {
    match command.usage() {
        Some(usage) => CoreError::Argument(format!("Missing arguments. Usage: {usage}")),
        None => CoreError::Argument("Please enter the argument for the command.".to_string()),
    }
}

fn owned(parsed: &Arguments, key: &str) -> Option<String> {
    parsed.get(key).map(str::to_string)
}
