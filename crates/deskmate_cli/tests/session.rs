use deskmate_cli::Session;
use deskmate_core::note_id_for;

fn reply(session: &mut Session, line: &str) -> String {
    session.dispatch(line).message
}

#[test]
fn contact_lifecycle_through_commands() {
    let mut session = Session::default();

    assert_eq!(reply(&mut session, "add Mykola 0660320528"), "Contact added.");
    assert_eq!(reply(&mut session, "add Mykola 0660320529"), "Contact updated.");
    assert_eq!(
        reply(&mut session, "add Mykola 066-032-05-28"),
        "Phone number 0660320528 already exists."
    );
    assert_eq!(
        reply(&mut session, "phone Mykola"),
        "Mykola's phones: 0660320528, 0660320529"
    );

    assert_eq!(
        reply(&mut session, "change Mykola 0660320529 0991112233"),
        "Phone number updated."
    );
    assert_eq!(
        reply(&mut session, "change Mykola 0500000000 0991112234"),
        "Phone number 0500000000 not found."
    );
    assert_eq!(
        reply(&mut session, "remove-phone Mykola 0991112233"),
        "Phone number removed."
    );

    assert_eq!(reply(&mut session, "delete-contact Mykola"), "Contact Mykola deleted.");
    assert_eq!(reply(&mut session, "phone Mykola"), "Contact Mykola not found.");
    assert_eq!(reply(&mut session, "all"), "Address book is empty.");
}

#[test]
fn invalid_phone_reports_validation_message_and_adds_nothing() {
    let mut session = Session::default();
    let message = reply(&mut session, "add Mykola 123");
    assert!(message.contains("not valid"), "{message}");
    assert!(session.book().is_empty());
}

#[test]
fn add_contact_with_details_and_edit_it() {
    let mut session = Session::default();
    let added = reply(
        &mut session,
        "add-contact John --phone 0660320528 --email John@Example.com --birthday 05.03.1990 --address \"Kyiv, Khreshchatyk 1\"",
    );
    assert_eq!(added, "Contact John added.");
    assert_eq!(
        reply(&mut session, "add-contact John"),
        "Contact John already exists."
    );

    let edited = reply(
        &mut session,
        "edit-contact John --name Jonathan --old-phone 0660320528 --phone 0660320529",
    );
    assert_eq!(edited, "Contact Jonathan updated.");

    let all = reply(&mut session, "all");
    assert_eq!(
        all,
        "Name: Jonathan | phone: 0660320529 | email: john@example.com | birthday: 05.03.1990 | address: Kyiv, Khreshchatyk 1"
    );
    assert_eq!(
        reply(&mut session, "show-birthday Jonathan"),
        "Jonathan's birthday is 05.03.1990"
    );
    assert_eq!(
        reply(&mut session, "edit-contact Jonathan --nickname JJ"),
        "Unknown option --nickname."
    );
    assert_eq!(
        reply(&mut session, "edit-contact Jonathan --name \"\""),
        "Nothing to change."
    );
}

#[test]
fn birthday_commands() {
    let mut session = Session::default();
    assert_eq!(
        reply(&mut session, "add-birthday Andrii 25.07.2001"),
        "Contact Andrii added with birthday."
    );
    assert_eq!(
        reply(&mut session, "add-birthday Andrii 26.07.2001"),
        "Birthday added for Andrii."
    );
    assert_eq!(
        reply(&mut session, "show-birthday Andrii"),
        "Andrii's birthday is 26.07.2001"
    );

    reply(&mut session, "add Olena 0991112233");
    assert_eq!(
        reply(&mut session, "show-birthday Olena"),
        "Olena has no birthday info."
    );

    let message = reply(&mut session, "add-birthday Andrii 31.02.2001");
    assert!(!message.starts_with("Birthday added"), "{message}");
    assert_eq!(
        reply(&mut session, "birthdays soon"),
        "Days must be a whole number, got `soon`."
    );
    assert_eq!(
        reply(&mut session, "birthdays -1"),
        "Days must be a whole number, got `-1`."
    );
}

#[test]
fn search_contact_command() {
    let mut session = Session::default();
    reply(&mut session, "add Mykola 0660320528");
    reply(&mut session, "add Olena 0991112233");

    assert!(reply(&mut session, "search-contact phones 0660").starts_with("Name: Mykola"));
    assert_eq!(
        reply(&mut session, "search-contact name zzz"),
        "No matches found."
    );
    assert_eq!(
        reply(&mut session, "search-contact nickname x"),
        "Field 'nickname' is not valid. Choose one of: name, phones, email, birthday, address."
    );
    assert!(reply(&mut session, "search-contact name").starts_with("Missing arguments."));
}

#[test]
fn note_lifecycle_through_commands() {
    let mut session = Session::default();
    let id = note_id_for("Groceries");

    assert_eq!(
        reply(
            &mut session,
            "note-add --title Groceries --text \"milk and bread\" --tags Home,shopping"
        ),
        format!("Note with title Groceries added (id {id}).")
    );
    assert_eq!(
        reply(&mut session, "note-add --title Groceries --text other"),
        "Note Groceries already exists."
    );
    assert_eq!(
        reply(&mut session, "note-add --title Empty"),
        "Note text can not be empty"
    );
    reply(&mut session, "note-add --title Standup --text \"sprint summary\" --tags work");

    assert_eq!(reply(&mut session, "tags"), "Tags: home, shopping, work");
    let filtered = reply(&mut session, "notes --tags home");
    assert!(filtered.starts_with(&id), "{filtered}");
    assert!(!filtered.contains("Standup"));
    assert_eq!(
        reply(&mut session, "notes --search bread --tags work"),
        "No matching notes found."
    );

    assert_eq!(
        reply(&mut session, &format!("note-tag-add {id} urgent home")),
        format!("Added 1 tag(s) to note {id}.")
    );
    assert_eq!(
        reply(&mut session, &format!("note-tag-remove {id} shopping")),
        format!("Removed 1 tag(s) from note {id}.")
    );
    assert_eq!(
        reply(&mut session, &format!("note-update {id} --title \"Weekly groceries\"")),
        format!("Note {id} updated.")
    );
    assert!(reply(&mut session, "notes-all").contains("Weekly groceries"));

    assert_eq!(
        reply(&mut session, &format!("note-delete {id}")),
        format!("Note {id} deleted.")
    );
    assert_eq!(
        reply(&mut session, &format!("note-delete {id}")),
        format!("Note {id} not found.")
    );
}

#[test]
fn help_and_greeting() {
    let mut session = Session::default();
    assert_eq!(reply(&mut session, "hello"), "How can I help you?");
    assert!(reply(&mut session, "?").contains("COMMAND OVERVIEW"));
    assert_eq!(reply(&mut session, "notes-all"), "Can not find any note.");
    assert_eq!(reply(&mut session, "tags"), "No tags yet.");
}
