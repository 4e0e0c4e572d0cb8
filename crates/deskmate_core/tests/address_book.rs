use chrono::NaiveDate;
use deskmate_core::{AddressBook, Contact, CoreError, Entity, SearchField};

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn contact_with_birthday(name: &str, birthday: &str) -> Contact {
    let mut contact = Contact::new(name).unwrap();
    contact.set_birthday(birthday).unwrap();
    contact
}

#[test]
fn search_by_phone_substring_returns_matching_contact() {
    let mut book = AddressBook::new();
    let mut mykola = Contact::new("Mykola").unwrap();
    mykola.add_phone("0660320528").unwrap();
    book.add_record(mykola).unwrap();
    let mut olena = Contact::new("Olena").unwrap();
    olena.add_phone("0991112233").unwrap();
    book.add_record(olena).unwrap();

    let hits = book.search_contacts("phones", "0660").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name().value(), "Mykola");

    let alias_hits = book.search_contacts("Phone", "0660").unwrap();
    assert_eq!(alias_hits, hits);
}

#[test]
fn search_is_case_insensitive_and_keeps_insertion_order() {
    let mut book = AddressBook::new();
    for (name, email) in [
        ("Zoryana", "zoryana@work.com"),
        ("Andrii", "andrii@home.org"),
        ("Bohdan", "bohdan@WORK.com"),
    ] {
        let mut contact = Contact::new(name).unwrap();
        contact.set_email(email).unwrap();
        book.add_record(contact).unwrap();
    }

    let hits = book.search_by(SearchField::Email, "Work").unwrap();
    let names = hits
        .iter()
        .map(|contact| contact.name().value().as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Zoryana", "Bohdan"]);
}

#[test]
fn search_rejects_unknown_field_and_blank_query() {
    let book = AddressBook::new();
    assert!(matches!(
        book.search_contacts("nickname", "x"),
        Err(CoreError::Query(_))
    ));
    assert!(matches!(
        book.search_contacts("name", "   "),
        Err(CoreError::Query(_))
    ));
}

#[test]
fn search_skips_contacts_without_the_field() {
    let mut book = AddressBook::new();
    book.add_record(Contact::new("Mykola").unwrap()).unwrap();
    let mut olena = Contact::new("Olena").unwrap();
    olena.set_address("Lviv, Rynok 1").unwrap();
    book.add_record(olena).unwrap();

    let hits = book.search_contacts("address", "lviv").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name().value(), "Olena");
}

#[test]
fn birthday_window_is_inclusive_on_both_ends() {
    let today = day(2024, 6, 1);
    let mut book = AddressBook::new();
    book.add_record(contact_with_birthday("Today", "01.06.1985"))
        .unwrap();
    book.add_record(contact_with_birthday("Edge", "08.06.1990"))
        .unwrap();
    book.add_record(contact_with_birthday("Beyond", "09.06.1990"))
        .unwrap();
    book.add_record(contact_with_birthday("Past", "31.05.1990"))
        .unwrap();
    book.add_record(Contact::new("NoBirthday").unwrap()).unwrap();

    let upcoming = book.upcoming_birthdays_on(today, 7);
    let names = upcoming
        .iter()
        .map(|item| item.contact.name().value().as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Edge", "Today"]);
    assert_eq!(upcoming[0].date, day(2024, 6, 8));
}

#[test]
fn birthday_window_stays_in_the_current_year() {
    let mut book = AddressBook::new();
    book.add_record(contact_with_birthday("January", "04.01.1990"))
        .unwrap();
    book.add_record(contact_with_birthday("December", "30.12.1990"))
        .unwrap();

    let upcoming = book.upcoming_birthdays_on(day(2024, 12, 28), 7);
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].contact.name().value(), "December");
    assert_eq!(upcoming[0].date, day(2024, 12, 30));
}

#[test]
fn leap_day_birthday_is_celebrated_on_feb_28() {
    let mut book = AddressBook::new();
    book.add_record(contact_with_birthday("Leap", "29.02.2000"))
        .unwrap();

    let upcoming = book.upcoming_birthdays_on(day(2023, 2, 28), 0);
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].date, day(2023, 2, 28));
}

#[test]
fn rename_moves_key_and_keeps_record_data() {
    let mut book = AddressBook::new();
    let mut john = Contact::new("John").unwrap();
    john.add_phone("0660320528").unwrap();
    john.set_email("john@example.com").unwrap();
    john.set_birthday("05.03.1990").unwrap();
    book.add_record(john).unwrap();
    book.add_record(Contact::new("Mary").unwrap()).unwrap();

    book.rename("John", "Jonathan").unwrap();

    assert!(book.find("John").is_none());
    let renamed = book.find("Jonathan").unwrap();
    assert_eq!(renamed.name().value(), "Jonathan");
    assert_eq!(renamed.phone_values(), vec!["0660320528"]);
    assert_eq!(renamed.email().unwrap().value(), "john@example.com");
    assert_eq!(renamed.birthday().unwrap().to_string(), "05.03.1990");

    let order = book
        .iter()
        .map(|contact| contact.name().value().as_str())
        .collect::<Vec<_>>();
    assert_eq!(order, vec!["Jonathan", "Mary"]);
}

#[test]
fn rename_onto_existing_name_is_rejected() {
    let mut book = AddressBook::new();
    book.add_record(Contact::new("John").unwrap()).unwrap();
    book.add_record(Contact::new("Mary").unwrap()).unwrap();

    let err = book.rename("John", "Mary").unwrap_err();
    assert_eq!(err, CoreError::duplicate(Entity::Contact, "Mary"));
    assert!(book.find("John").is_some());
}

#[test]
fn delete_keeps_lookups_consistent() {
    let mut book = AddressBook::new();
    for name in ["Anna", "Borys", "Chrystia"] {
        book.add_record(Contact::new(name).unwrap()).unwrap();
    }

    let removed = book.delete("Anna").unwrap();
    assert_eq!(removed.name().value(), "Anna");
    assert!(book.find("Anna").is_none());
    assert_eq!(book.find("Chrystia").unwrap().name().value(), "Chrystia");
    assert!(matches!(book.delete("Anna"), Err(CoreError::NotFound { .. })));
    assert_eq!(book.len(), 2);
}

#[test]
fn book_serializes_as_contact_list_and_rejects_duplicate_names() {
    let mut book = AddressBook::new();
    let mut john = Contact::new("John").unwrap();
    john.add_phone("+380660320528").unwrap();
    book.add_record(john).unwrap();

    let json = serde_json::to_value(&book).unwrap();
    assert_eq!(json[0]["name"], "John");
    assert_eq!(json[0]["phones"][0], "380660320528");
    let decoded: AddressBook = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, book);

    let duplicated = serde_json::json!([{ "name": "John" }, { "name": "John" }]);
    assert!(serde_json::from_value::<AddressBook>(duplicated).is_err());
}
