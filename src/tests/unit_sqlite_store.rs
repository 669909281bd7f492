use crate::database::sqlite::SqliteStore;
use crate::database::{CredentialStore, ResourceStore, StoreError};
use crate::domain::{FieldValue, Fields, ListQuery};
use crate::features::about::model::ABOUT;
use crate::features::articles::model::ARTICLES;
use crate::features::contacts::model::CONTACTS;
use crate::features::faqs::model::FAQS;
use crate::features::users::model::{ADMIN_ROLES, USERS};
use crate::tests::{insert_category, setup_test_pool};
use chrono::{Duration, Utc};

fn fields(pairs: &[(&str, FieldValue)]) -> Fields {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn user_fields(email: &str, role: &str) -> Fields {
    fields(&[
        ("name", "Jane".into()),
        ("email", email.into()),
        ("password", "$argon2id$fake".into()),
        ("role", role.into()),
        ("profile", "/uploads/jane.png".into()),
    ])
}

fn about_fields(image: &str) -> Fields {
    fields(&[
        ("title", "About".into()),
        ("description", "Who we are".into()),
        ("image", image.into()),
    ])
}

#[tokio::test]
async fn test_insert_and_get_about() {
    let store = SqliteStore::new(setup_test_pool().await);

    let id = store
        .insert(&ABOUT, &about_fields("/uploads/a.png"), Utc::now())
        .await
        .expect("Should insert");
    assert_eq!(id, 1);

    let record = store.get(&ABOUT, id).await.unwrap().expect("Row should exist");
    assert_eq!(record.text("title"), Some("About"));
    assert_eq!(record.file_ref(&ABOUT), Some("/uploads/a.png"));
    assert_eq!(record.created_at, record.updated_at);
}

#[tokio::test]
async fn test_second_about_is_a_conflict() {
    let store = SqliteStore::new(setup_test_pool().await);

    store
        .insert(&ABOUT, &about_fields("/uploads/a.png"), Utc::now())
        .await
        .unwrap();
    let second = store
        .insert(&ABOUT, &about_fields("/uploads/b.png"), Utc::now())
        .await;

    assert!(matches!(second, Err(StoreError::Conflict)));
    assert_eq!(store.list(&ABOUT, &ListQuery::default()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_duplicate_contact_phone_is_a_conflict() {
    let store = SqliteStore::new(setup_test_pool().await);
    let contact = fields(&[
        ("phone", "+62 812".into()),
        ("email", "hello@example.com".into()),
        ("address", "Jakarta".into()),
        ("office_operation", "Mon-Fri".into()),
    ]);

    store.insert(&CONTACTS, &contact, Utc::now()).await.unwrap();
    let again = store.insert(&CONTACTS, &contact, Utc::now()).await;

    assert!(matches!(again, Err(StoreError::Conflict)));
}

#[tokio::test]
async fn test_update_writes_only_given_columns_and_returns_previous_ref() {
    let store = SqliteStore::new(setup_test_pool().await);
    let created = Utc::now();
    let id = store
        .insert(&ABOUT, &about_fields("/uploads/old.png"), created)
        .await
        .unwrap();

    let later = created + Duration::seconds(5);
    let previous = store
        .update(
            &ABOUT,
            id,
            &fields(&[("image", "/uploads/new.png".into())]),
            later,
        )
        .await
        .unwrap();
    assert_eq!(previous, Some(Some("/uploads/old.png".to_string())));

    let record = store.get(&ABOUT, id).await.unwrap().unwrap();
    assert_eq!(record.text("title"), Some("About"));
    assert_eq!(record.file_ref(&ABOUT), Some("/uploads/new.png"));
    assert!(record.updated_at > record.created_at);
}

#[tokio::test]
async fn test_update_missing_row_returns_none() {
    let store = SqliteStore::new(setup_test_pool().await);

    let result = store
        .update(&ABOUT, 42, &fields(&[("title", "x".into())]), Utc::now())
        .await
        .unwrap();

    assert_eq!(result, None);
}

#[tokio::test]
async fn test_delete_returns_file_ref_once() {
    let store = SqliteStore::new(setup_test_pool().await);
    let id = store
        .insert(&ABOUT, &about_fields("/uploads/a.png"), Utc::now())
        .await
        .unwrap();

    let first = store.delete(&ABOUT, id).await.unwrap();
    assert_eq!(first, Some(Some("/uploads/a.png".to_string())));

    let second = store.delete(&ABOUT, id).await.unwrap();
    assert_eq!(second, None);
    assert!(store.get(&ABOUT, id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_without_file_slot() {
    let store = SqliteStore::new(setup_test_pool().await);
    let contact = fields(&[
        ("phone", "1".into()),
        ("email", "a@b.c".into()),
        ("address", "x".into()),
        ("office_operation", "y".into()),
    ]);
    let id = store.insert(&CONTACTS, &contact, Utc::now()).await.unwrap();

    assert_eq!(store.delete(&CONTACTS, id).await.unwrap(), Some(None));
}

#[tokio::test]
async fn test_unknown_and_read_only_columns_are_rejected() {
    let store = SqliteStore::new(setup_test_pool().await);

    let unknown = store
        .insert(&ABOUT, &fields(&[("nope", "x".into())]), Utc::now())
        .await;
    assert!(matches!(unknown, Err(StoreError::UnknownColumn(c)) if c == "nope"));

    let read_only = store
        .update(&ARTICLES, 1, &fields(&[("views", 100i64.into())]), Utc::now())
        .await;
    assert!(matches!(read_only, Err(StoreError::UnknownColumn(c)) if c == "views"));
}

#[tokio::test]
async fn test_article_reads_resolve_joins() {
    let pool = setup_test_pool().await;
    let category = insert_category(&pool, "category_articles", "Engineering").await;
    let store = SqliteStore::new(pool);
    let user = store
        .insert(&USERS, &user_fields("jane@example.com", "writer"), Utc::now())
        .await
        .unwrap();

    let id = store
        .insert(
            &ARTICLES,
            &fields(&[
                ("title", "Hello".into()),
                ("slug", "hello".into()),
                ("user_id", user.into()),
                ("category_id", category.into()),
                ("description", "Body".into()),
                ("thumbnail", "/uploads/t.png".into()),
            ]),
            Utc::now(),
        )
        .await
        .unwrap();

    let record = store.get(&ARTICLES, id).await.unwrap().unwrap();
    assert_eq!(record.text("user"), Some("Jane"));
    assert_eq!(record.text("category"), Some("Engineering"));
    assert_eq!(record.get("views"), Some(&FieldValue::Integer(0)));
}

#[tokio::test]
async fn test_missing_reference_is_reported() {
    let store = SqliteStore::new(setup_test_pool().await);

    let result = store
        .insert(
            &FAQS,
            &fields(&[
                ("question", "Q".into()),
                ("answer", "A".into()),
                ("category_id", 99i64.into()),
            ]),
            Utc::now(),
        )
        .await;

    assert!(matches!(result, Err(StoreError::InvalidReference)));
}

#[tokio::test]
async fn test_faqs_list_newest_first() {
    let pool = setup_test_pool().await;
    let category = insert_category(&pool, "category_faqs", "General").await;
    let store = SqliteStore::new(pool);
    let start = Utc::now();

    for (i, question) in ["first", "second", "third"].iter().enumerate() {
        store
            .insert(
                &FAQS,
                &fields(&[
                    ("question", (*question).into()),
                    ("answer", "A".into()),
                    ("category_id", category.into()),
                ]),
                start + Duration::seconds(i as i64),
            )
            .await
            .unwrap();
    }

    let faqs = store.list(&FAQS, &ListQuery::default()).await.unwrap();
    let questions: Vec<&str> = faqs.iter().filter_map(|r| r.text("question")).collect();
    assert_eq!(questions, vec!["third", "second", "first"]);
    assert_eq!(faqs[0].text("category"), Some("General"));
}

#[tokio::test]
async fn test_increment_counter() {
    let pool = setup_test_pool().await;
    let category = insert_category(&pool, "category_articles", "News").await;
    let store = SqliteStore::new(pool);
    let user = store
        .insert(&USERS, &user_fields("a@example.com", "writer"), Utc::now())
        .await
        .unwrap();
    let id = store
        .insert(
            &ARTICLES,
            &fields(&[
                ("title", "Hi".into()),
                ("slug", "hi".into()),
                ("user_id", user.into()),
                ("category_id", category.into()),
                ("description", "d".into()),
                ("thumbnail", "/uploads/t.png".into()),
            ]),
            Utc::now(),
        )
        .await
        .unwrap();

    assert!(store.increment(&ARTICLES, "views", "slug", "hi").await.unwrap());
    assert!(store.increment(&ARTICLES, "views", "slug", "hi").await.unwrap());
    assert!(!store.increment(&ARTICLES, "views", "slug", "nope").await.unwrap());

    let record = store.get(&ARTICLES, id).await.unwrap().unwrap();
    assert_eq!(record.get("views"), Some(&FieldValue::Integer(2)));
}

#[tokio::test]
async fn test_users_hide_password_and_filter_admins() {
    let store = SqliteStore::new(setup_test_pool().await);
    store
        .insert(&USERS, &user_fields("root@example.com", "admin"), Utc::now())
        .await
        .unwrap();
    store
        .insert(&USERS, &user_fields("boss@example.com", "superadmin"), Utc::now())
        .await
        .unwrap();
    store
        .insert(&USERS, &user_fields("writer@example.com", "writer"), Utc::now())
        .await
        .unwrap();

    let all = store.list(&USERS, &ListQuery::default()).await.unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.iter().all(|r| r.get("password").is_none()));

    let non_admin = store
        .list(&USERS, &ListQuery::excluding("role", ADMIN_ROLES))
        .await
        .unwrap();
    assert_eq!(non_admin.len(), 1);
    assert_eq!(non_admin[0].text("email"), Some("writer@example.com"));
}

#[tokio::test]
async fn test_find_credentials_by_email() {
    let store = SqliteStore::new(setup_test_pool().await);
    let id = store
        .insert(&USERS, &user_fields("jane@example.com", "writer"), Utc::now())
        .await
        .unwrap();

    let found = store
        .find_credentials("jane@example.com")
        .await
        .unwrap()
        .expect("Should find user");
    assert_eq!(found.id, id);
    assert_eq!(found.password_hash, "$argon2id$fake");

    assert!(store.find_credentials("nobody@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_first_returns_lowest_id_and_ping() {
    let store = SqliteStore::new(setup_test_pool().await);
    assert!(store.first(&ABOUT).await.unwrap().is_none());

    store
        .insert(&ABOUT, &about_fields("/uploads/a.png"), Utc::now())
        .await
        .unwrap();

    let first = store.first(&ABOUT).await.unwrap().expect("Should have a row");
    assert_eq!(first.id, 1);
    store.ping().await.expect("Ping should succeed");
}
