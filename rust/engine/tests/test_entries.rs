use namewheel_engine::entry::{EntryList, PALETTE};
use namewheel_engine::errors::WheelError;

#[test]
fn defaults_are_the_six_starter_names() {
    let list = EntryList::with_defaults();
    let names: Vec<&str> = list.entries().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["Alice", "Bob", "Charlie", "Diana", "Eve", "Frank"]);
    assert_eq!(list.get("1").map(|e| e.color.as_str()), Some("#008080"));
}

#[test]
fn add_trims_and_rejects_blank_names() {
    let mut list = EntryList::new();
    assert_eq!(list.add("   ", None), Err(WheelError::EmptyName));
    assert_eq!(list.add("", None), Err(WheelError::EmptyName));
    let e = list.add("\tGrace  ", Some("#FF0000")).unwrap();
    assert_eq!(e.name, "Grace");
    assert_eq!(e.color, "#FF0000");
}

#[test]
fn duplicate_names_are_case_insensitive() {
    let mut list = EntryList::with_defaults();
    assert_eq!(
        list.add("ALICE", None),
        Err(WheelError::DuplicateName("ALICE".to_string()))
    );
    assert_eq!(
        list.add(" bob ", None),
        Err(WheelError::DuplicateName("bob".to_string()))
    );
    assert_eq!(list.len(), 6);
}

#[test]
fn edit_rejects_collision_with_another_entry() {
    let mut list = EntryList::with_defaults();
    assert_eq!(
        list.update("1", "bob", "#000000"),
        Err(WheelError::DuplicateName("bob".to_string()))
    );
    assert_eq!(list.update("1", " ", "#000000"), Err(WheelError::EmptyName));
    assert_eq!(list.get("1").map(|e| e.name.as_str()), Some("Alice"));
}

#[test]
fn edit_and_remove_unknown_id() {
    let mut list = EntryList::with_defaults();
    assert_eq!(
        list.update("99", "Zed", "#000000"),
        Err(WheelError::EntryNotFound("99".to_string()))
    );
    assert_eq!(
        list.remove("99"),
        Err(WheelError::EntryNotFound("99".to_string()))
    );
}

#[test]
fn remove_preserves_order_of_remaining_entries() {
    let mut list = EntryList::with_defaults();
    let removed = list.remove("3").unwrap();
    assert_eq!(removed.name, "Charlie");
    let names: Vec<&str> = list.entries().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["Alice", "Bob", "Diana", "Eve", "Frank"]);
}

#[test]
fn new_entries_get_fresh_ids_after_defaults() {
    let mut list = EntryList::with_defaults();
    let id = list.add("Grace", None).unwrap().id.clone();
    assert_eq!(id, "7");
}

#[test]
fn default_color_follows_palette() {
    let mut list = EntryList::with_defaults();
    let expected = PALETTE[7 % PALETTE.len()];
    let e = list.add("Grace", None).unwrap();
    assert_eq!(e.color, expected);
}

#[test]
fn entries_serialize_as_plain_objects() {
    let list = EntryList::with_defaults();
    let json = serde_json::to_value(&list.entries()[0]).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"id": "1", "name": "Alice", "color": "#008080"})
    );
}
