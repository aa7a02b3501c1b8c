use super::*;

use chrono::NaiveDate;

use crate::traits::{ContactStore, DigestStore, EventStore, QaStore};

async fn setup_test_store() -> (SqliteStore, tempfile::NamedTempFile) {
    let db_file = tempfile::NamedTempFile::new().unwrap();
    let store = SqliteStore::new(db_file.path().to_str().unwrap())
        .await
        .unwrap();
    (store, db_file)
}

fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, mi, 0)
        .unwrap()
}

// ==================== Q&A ====================

#[tokio::test]
async fn upsert_overwrites_existing_answer() {
    let (store, _db) = setup_test_store().await;

    store.upsert_qa("What is X?", "First answer").await.unwrap();
    store.upsert_qa("What is X?", "Second answer").await.unwrap();

    let answer = store.lookup_qa("What is X?").await.unwrap();
    assert_eq!(answer.as_deref(), Some("Second answer"));
}

#[tokio::test]
async fn qa_is_case_insensitive() {
    let (store, _db) = setup_test_store().await;

    store.upsert_qa("Where Is The Office?", "Floor 3").await.unwrap();

    let answer = store.lookup_qa("where is the office?").await.unwrap();
    assert_eq!(answer.as_deref(), Some("Floor 3"));

    // Upserting with different casing replaces, not accumulates
    store.upsert_qa("WHERE IS THE OFFICE?", "Floor 4").await.unwrap();
    let answer = store.lookup_qa("Where is the office?").await.unwrap();
    assert_eq!(answer.as_deref(), Some("Floor 4"));
}

#[tokio::test]
async fn lookup_unknown_question_returns_none() {
    let (store, _db) = setup_test_store().await;
    let answer = store.lookup_qa("never asked").await.unwrap();
    assert!(answer.is_none());
}

// ==================== Contacts ====================

#[tokio::test]
async fn contacts_are_listed_sorted_by_name() {
    let (store, _db) = setup_test_store().await;

    store.add_contact("Zoe", Some("dev")).await.unwrap();
    store.add_contact("Anna", Some("design")).await.unwrap();
    store.add_contact("Mark", None).await.unwrap();

    let contacts = store.list_contacts().await.unwrap();
    let names: Vec<&str> = contacts.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Anna", "Mark", "Zoe"]);
    assert_eq!(contacts[1].info, None);
}

#[tokio::test]
async fn duplicate_contact_names_are_kept() {
    let (store, _db) = setup_test_store().await;

    store.add_contact("Anna", Some("design")).await.unwrap();
    store.add_contact("Anna", Some("qa")).await.unwrap();

    let contacts = store.list_contacts().await.unwrap();
    assert_eq!(contacts.len(), 2);
}

#[tokio::test]
async fn find_contact_returns_first_match_only() {
    let (store, _db) = setup_test_store().await;

    store.add_contact("Anna Petrova", Some("design")).await.unwrap();
    store.add_contact("Annabel Lee", Some("qa")).await.unwrap();

    let found = store.find_contact("Anna").await.unwrap().unwrap();
    assert_eq!(found.name, "Anna Petrova");
}

#[tokio::test]
async fn find_contact_is_case_sensitive_substring() {
    let (store, _db) = setup_test_store().await;

    store.add_contact("Anna Petrova", None).await.unwrap();

    assert!(store.find_contact("Petr").await.unwrap().is_some());
    // Unlike question lookup, contact search does not case-fold.
    assert!(store.find_contact("anna").await.unwrap().is_none());
    assert!(store.find_contact("Boris").await.unwrap().is_none());
}

// ==================== Events ====================

#[tokio::test]
async fn due_events_filters_past_and_notified() {
    let (store, _db) = setup_test_store().await;
    let now = dt(2026, 6, 15, 12, 0);

    store.add_event("Past", dt(2026, 6, 1, 9, 0), "").await.unwrap();
    store.add_event("Soon", dt(2026, 6, 15, 18, 0), "standup").await.unwrap();
    store.add_event("Later", dt(2026, 7, 1, 9, 0), "").await.unwrap();

    let due = store.due_events(now, None).await.unwrap();
    let names: Vec<&str> = due.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Soon", "Later"]);

    store.mark_notified("Soon", dt(2026, 6, 15, 18, 0)).await.unwrap();
    let due = store.due_events(now, None).await.unwrap();
    let names: Vec<&str> = due.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Later"]);
}

#[tokio::test]
async fn due_events_respects_window_end() {
    let (store, _db) = setup_test_store().await;
    let now = dt(2026, 6, 15, 12, 0);

    store.add_event("Today", dt(2026, 6, 15, 18, 0), "").await.unwrap();
    store.add_event("Next week", dt(2026, 6, 22, 9, 0), "").await.unwrap();

    let window_end = now + chrono::Duration::days(1);
    let due = store.due_events(now, Some(window_end)).await.unwrap();
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].name, "Today");
    assert_eq!(due[0].date, dt(2026, 6, 15, 18, 0));
}

#[tokio::test]
async fn due_events_are_ordered_by_date() {
    let (store, _db) = setup_test_store().await;
    let now = dt(2026, 1, 1, 0, 0);

    store.add_event("Third", dt(2026, 3, 1, 9, 0), "").await.unwrap();
    store.add_event("First", dt(2026, 1, 2, 9, 0), "").await.unwrap();
    store.add_event("Second", dt(2026, 2, 1, 9, 0), "").await.unwrap();

    let due = store.due_events(now, None).await.unwrap();
    let names: Vec<&str> = due.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["First", "Second", "Third"]);
}

#[tokio::test]
async fn mark_notified_requires_exact_name_and_date() {
    let (store, _db) = setup_test_store().await;
    let now = dt(2026, 1, 1, 0, 0);
    let date = dt(2026, 5, 1, 10, 30);

    store.add_event("Review", date, "").await.unwrap();

    // Wrong date: no row matched, no error either
    store.mark_notified("Review", dt(2026, 5, 1, 10, 31)).await.unwrap();
    assert_eq!(store.due_events(now, None).await.unwrap().len(), 1);

    store.mark_notified("Review", date).await.unwrap();
    assert!(store.due_events(now, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn event_ids_are_unique() {
    let (store, _db) = setup_test_store().await;
    let now = dt(2026, 1, 1, 0, 0);
    let date = dt(2026, 5, 1, 10, 0);

    // Same name+date twice: both rows survive under distinct ids
    store.add_event("Dup", date, "").await.unwrap();
    store.add_event("Dup", date, "").await.unwrap();

    let due = store.due_events(now, None).await.unwrap();
    assert_eq!(due.len(), 2);
    assert_ne!(due[0].id, due[1].id);
}

// ==================== Digests ====================

#[tokio::test]
async fn recent_digests_most_recent_first_with_limit() {
    let (store, _db) = setup_test_store().await;

    for i in 1..=7 {
        store.add_digest(&format!("Digest {}", i)).await.unwrap();
    }

    let digests = store.recent_digests(5).await.unwrap();
    assert_eq!(digests.len(), 5);
    assert_eq!(digests[0], "Digest 7");
    assert_eq!(digests[4], "Digest 3");
}

#[tokio::test]
async fn recent_digests_empty_store() {
    let (store, _db) = setup_test_store().await;
    assert!(store.recent_digests(5).await.unwrap().is_empty());
}
