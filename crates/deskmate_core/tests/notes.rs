use deskmate_core::{note_id_for, CoreError, NoteCollection, NoteUpdate};

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn seeded() -> NoteCollection {
    let mut notes = NoteCollection::new();
    notes
        .add("Groceries", "milk, bread")
        .unwrap()
        .set_tags(&tags(&["home", "shopping"]))
        .unwrap();
    notes
        .add("Standup", "prepare sprint summary")
        .unwrap()
        .set_tags(&tags(&["work"]))
        .unwrap();
    notes.add("Ideas", "write a birthday reminder").unwrap();
    notes
}

#[test]
fn note_id_is_derived_from_title() {
    let mut notes = NoteCollection::new();
    let note = notes.add("Groceries", "milk").unwrap();
    assert_eq!(note.id(), note_id_for("Groceries"));
    assert_eq!(note.id().len(), 6);
    assert!(note.id().chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn duplicate_title_is_rejected_and_original_untouched() {
    let mut notes = NoteCollection::new();
    let original_id = notes.add("Groceries", "milk").unwrap().id().to_string();

    let err = notes.add("Groceries", "eggs").unwrap_err();
    assert!(matches!(err, CoreError::Duplicate { .. }));
    assert_eq!(notes.len(), 1);
    let kept = notes.get(&original_id).unwrap();
    assert_eq!(kept.text(), "milk");
}

#[test]
fn title_uniqueness_is_case_sensitive() {
    let mut notes = NoteCollection::new();
    notes.add("Groceries", "milk").unwrap();
    notes.add("groceries", "eggs").unwrap();
    assert_eq!(notes.len(), 2);
}

#[test]
fn invalid_title_and_text_are_rejected() {
    let mut notes = NoteCollection::new();
    assert!(matches!(
        notes.add("   ", "text"),
        Err(CoreError::Validation(_))
    ));
    assert!(matches!(
        notes.add(&"x".repeat(41), "text"),
        Err(CoreError::Validation(_))
    ));
    assert!(matches!(
        notes.add("Empty", "   "),
        Err(CoreError::Validation(_))
    ));
    assert!(matches!(
        notes.add("Long", &"y".repeat(151)),
        Err(CoreError::Validation(_))
    ));
    assert!(notes.is_empty());
}

#[test]
fn empty_tag_filter_returns_all_notes_in_insertion_order() {
    let notes = seeded();
    let titles = notes
        .notes_by_tags(&[])
        .iter()
        .map(|note| note.title().value().as_str())
        .collect::<Vec<_>>();
    assert_eq!(titles, vec!["Groceries", "Standup", "Ideas"]);
}

#[test]
fn tag_filter_matches_any_tag_case_insensitively() {
    let notes = seeded();
    let hits = notes.notes_by_tags(&tags(&["WORK", "shopping"]));
    let titles = hits
        .iter()
        .map(|note| note.title().value().as_str())
        .collect::<Vec<_>>();
    assert_eq!(titles, vec!["Groceries", "Standup"]);

    assert_eq!(notes.search_by_tag(" Home ").len(), 1);
    assert!(notes.search_by_tag("travel").is_empty());
}

#[test]
fn all_tags_is_sorted_and_unique() {
    let mut notes = seeded();
    let id = note_id_for("Ideas");
    notes.add_tags(&id, &tags(&["Work", "alpha"])).unwrap();
    assert_eq!(notes.all_tags(), vec!["alpha", "home", "shopping", "work"]);
}

#[test]
fn text_search_covers_title_and_body() {
    let notes = seeded();
    let by_body = notes.search_text("SPRINT").unwrap();
    assert_eq!(by_body.len(), 1);
    assert_eq!(by_body[0].title().value(), "Standup");

    let by_title = notes.search_text("idea").unwrap();
    assert_eq!(by_title.len(), 1);

    assert!(matches!(notes.search_text(" "), Err(CoreError::Query(_))));
}

#[test]
fn update_keeps_id_and_is_all_or_nothing() {
    let mut notes = seeded();
    let id = note_id_for("Groceries");

    let update = NoteUpdate {
        title: Some("Weekly groceries".to_string()),
        text: Some(String::new()),
        tags: None,
    };
    assert!(notes.update(&id, update).is_err());
    assert_eq!(notes.get(&id).unwrap().title().value(), "Groceries");

    let update = NoteUpdate {
        title: Some("Weekly groceries".to_string()),
        text: Some("milk, bread, cheese".to_string()),
        tags: Some(tags(&["food"])),
    };
    let updated = notes.update(&id, update).unwrap();
    assert_eq!(updated.id(), id);
    assert_eq!(updated.title().value(), "Weekly groceries");
    assert_eq!(updated.tags().iter().collect::<Vec<_>>(), vec!["food"]);
    assert!(notes.find("Groceries").is_none());
}

#[test]
fn delete_and_tag_removal_report_missing_notes() {
    let mut notes = seeded();
    let id = note_id_for("Standup");

    assert_eq!(notes.remove_tags(&id, &tags(&["work", "nope"])).unwrap(), 1);
    notes.delete(&id).unwrap();
    assert!(matches!(notes.delete(&id), Err(CoreError::NotFound { .. })));
    assert!(matches!(
        notes.add_tags(&id, &tags(&["x"])),
        Err(CoreError::NotFound { .. })
    ));
    assert_eq!(notes.get(&note_id_for("Ideas")).unwrap().text(), "write a birthday reminder");
}
