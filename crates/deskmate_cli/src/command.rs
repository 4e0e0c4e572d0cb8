//! Command table for the interactive front end.
//!
//! # Invariants
//! - Every command has one canonical name used in logs.
//! - Lookup is case-insensitive; aliases resolve to the same command.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Hello,
    Help,
    Exit,
    Add,
    AddContact,
    EditContact,
    DeleteContact,
    Change,
    RemovePhone,
    Phone,
    All,
    AddBirthday,
    ShowBirthday,
    Birthdays,
    SearchContact,
    NoteAdd,
    NotesAll,
    Notes,
    NoteUpdate,
    NoteDelete,
    NoteTagAdd,
    NoteTagRemove,
    Tags,
}

impl Command {
    /// Help order.
    pub const ALL: [Self; 23] = [
        Self::Add,
        Self::AddContact,
        Self::EditContact,
        Self::DeleteContact,
        Self::SearchContact,
        Self::Change,
        Self::RemovePhone,
        Self::Phone,
        Self::All,
        Self::AddBirthday,
        Self::ShowBirthday,
        Self::Birthdays,
        Self::NoteAdd,
        Self::NotesAll,
        Self::Notes,
        Self::NoteUpdate,
        Self::NoteDelete,
        Self::NoteTagAdd,
        Self::NoteTagRemove,
        Self::Tags,
        Self::Hello,
        Self::Exit,
        Self::Help,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        let command = match name.trim().to_ascii_lowercase().as_str() {
            "hello" => Self::Hello,
            "help" | "?" => Self::Help,
            "exit" | "close" => Self::Exit,
            "add" => Self::Add,
            "add-contact" => Self::AddContact,
            "edit-contact" => Self::EditContact,
            "delete-contact" => Self::DeleteContact,
            "change" => Self::Change,
            "remove-phone" => Self::RemovePhone,
            "phone" => Self::Phone,
            "all" => Self::All,
            "add-birthday" => Self::AddBirthday,
            "show-birthday" => Self::ShowBirthday,
            "birthdays" => Self::Birthdays,
            "search-contact" => Self::SearchContact,
            "note-add" => Self::NoteAdd,
            "notes-all" => Self::NotesAll,
            "notes" => Self::Notes,
            "note-update" => Self::NoteUpdate,
            "note-delete" => Self::NoteDelete,
            "note-tag-add" => Self::NoteTagAdd,
            "note-tag-remove" => Self::NoteTagRemove,
            "tags" => Self::Tags,
            _ => return None,
        };
        Some(command)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Hello => "hello",
            Self::Help => "help",
            Self::Exit => "exit",
            Self::Add => "add",
            Self::AddContact => "add-contact",
            Self::EditContact => "edit-contact",
            Self::DeleteContact => "delete-contact",
            Self::Change => "change",
            Self::RemovePhone => "remove-phone",
            Self::Phone => "phone",
            Self::All => "all",
            Self::AddBirthday => "add-birthday",
            Self::ShowBirthday => "show-birthday",
            Self::Birthdays => "birthdays",
            Self::SearchContact => "search-contact",
            Self::NoteAdd => "note-add",
            Self::NotesAll => "notes-all",
            Self::Notes => "notes",
            Self::NoteUpdate => "note-update",
            Self::NoteDelete => "note-delete",
            Self::NoteTagAdd => "note-tag-add",
            Self::NoteTagRemove => "note-tag-remove",
            Self::Tags => "tags",
        }
    }

    /// Name column of the help overview, aliases included.
    pub fn label(self) -> &'static str {
        match self {
            Self::Help => "help | ?",
            Self::Exit => "exit | close",
            other => other.name(),
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            Self::Hello => "Greets you back",
            Self::Help => "Shows this overview",
            Self::Exit => "Saves data and exits",
            Self::Add => "Adds a contact or a phone to an existing contact",
            Self::AddContact => "Adds a contact with optional details",
            Self::EditContact => "Edits a contact",
            Self::DeleteContact => "Deletes a contact",
            Self::Change => "Changes a contact's phone number",
            Self::RemovePhone => "Removes a phone number from a contact",
            Self::Phone => "Shows phone(s) of a contact",
            Self::All => "Shows all contacts",
            Self::AddBirthday => "Adds birthday to a contact",
            Self::ShowBirthday => "Shows birthday of a contact",
            Self::Birthdays => "Shows upcoming birthdays in the next days (default 7)",
            Self::SearchContact => "Searches contacts by field: name, phones, email, birthday, address",
            Self::NoteAdd => "Adds a new note",
            Self::NotesAll => "Shows all saved notes",
            Self::Notes => "Filters notes by text and/or tags",
            Self::NoteUpdate => "Updates title, text or tags of a note",
            Self::NoteDelete => "Deletes a note",
            Self::NoteTagAdd => "Adds tags to a note",
            Self::NoteTagRemove => "Removes tags from a note",
            Self::Tags => "Shows all tags in use",
        }
    }

    pub fn usage(self) -> Option<&'static str> {
        let usage = match self {
            Self::Add => "add Mykola 0660320528",
            Self::AddContact => {
                "add-contact John --phone 0660320528 --email john@example.com --birthday 05.03.1990 --address \"Kyiv\""
            }
            Self::EditContact => {
                "edit-contact John [--name Jonathan] [--phone NEW [--old-phone OLD]] [--email E] [--birthday D] [--address A]"
            }
            Self::DeleteContact => "delete-contact John",
            Self::Change => "change John 0660320528 0660320529",
            Self::RemovePhone => "remove-phone John 0660320528",
            Self::Phone => "phone John",
            Self::AddBirthday => "add-birthday Andrii 25.07.2001",
            Self::ShowBirthday => "show-birthday John",
            Self::Birthdays => "birthdays 14",
            Self::SearchContact => "search-contact phones 0660",
            Self::NoteAdd => "note-add --title \"title\" --text \"text\" [--tags home,work]",
            Self::Notes => "notes [--search \"milk\"] [--tags home,work]",
            Self::NoteUpdate => "note-update a9993e [--title T] [--text X] [--tags a,b]",
            Self::NoteDelete => "note-delete a9993e",
            Self::NoteTagAdd => "note-tag-add a9993e home work",
            Self::NoteTagRemove => "note-tag-remove a9993e work",
            Self::Hello
            | Self::Help
            | Self::Exit
            | Self::All
            | Self::NotesAll
            | Self::Tags => return None,
        };
        Some(usage)
    }
}
