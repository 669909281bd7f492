use crate::domain::{FieldValue, Fields, FileSlot, Record, slugify};
use crate::features::articles::model::ARTICLES;
use crate::features::users::model::USERS;
use chrono::Utc;

#[test]
fn test_slugify_collapses_separators() {
    assert_eq!(slugify("Hello, World!"), "hello-world");
    assert_eq!(slugify("  Rust   2024 -- Edition  "), "rust-2024-edition");
    assert_eq!(slugify("already-a-slug"), "already-a-slug");
}

#[test]
fn test_slugify_transliterates_non_ascii() {
    assert_eq!(slugify("Café Olé"), "cafe-ole");
    assert_eq!(slugify("Straße nach Köln"), "strasse-nach-koln");
    assert_ne!(slugify("日本語"), "");
    assert_ne!(slugify("日本語"), slugify("中文"));
    assert_eq!(slugify("!!!"), "");
}

#[test]
fn test_missing_file_message_names_the_slot() {
    let slot = FileSlot {
        column: "image",
        required: true,
    };
    assert_eq!(slot.missing_message(), "Image is required");

    let thumbnail = ARTICLES.file.expect("articles have a file slot");
    assert_eq!(thumbnail.missing_message(), "Thumbnail is required");
}

#[test]
fn test_write_only_columns_are_never_read() {
    let readable: Vec<&str> = USERS.readable_columns().map(|c| c.name).collect();
    assert!(!readable.contains(&"password"));
    assert!(readable.contains(&"email"));

    let views = ARTICLES.column("views").expect("views column");
    assert!(views.readable());
    assert!(!views.writable());
}

#[test]
fn test_record_serializes_flat() {
    let mut fields = Fields::new();
    fields.insert("title".into(), FieldValue::from("About us"));
    fields.insert("views".into(), FieldValue::from(3i64));
    fields.insert("image".into(), FieldValue::Null);

    let record = Record {
        id: 7,
        fields,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["id"], 7);
    assert_eq!(json["title"], "About us");
    assert_eq!(json["views"], 3);
    assert!(json["image"].is_null());
    assert!(json["created_at"].is_string());
}

#[test]
fn test_file_ref_ignores_empty_values() {
    let mut fields = Fields::new();
    fields.insert("thumbnail".into(), FieldValue::from(""));

    let record = Record {
        id: 1,
        fields,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    assert_eq!(record.file_ref(&ARTICLES), None);
}
