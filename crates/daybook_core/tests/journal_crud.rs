use chrono::NaiveDate;
use daybook_core::db::open_db_in_memory;
use daybook_core::{
    CreateEntryRequest, EntryListQuery, JournalEntry, JournalRepository, JournalService, Mood,
    RepoError, SqliteJournalRepository,
};

fn day(year: i32, month: u32, dayofmonth: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, dayofmonth).unwrap()
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJournalRepository::new(&conn);

    let mut entry = JournalEntry::new(day(2025, 1, 15), "slow morning, good afternoon");
    entry.mood = Mood::Good;
    let id = repo.create_entry(&entry).unwrap();
    assert!(id > 0);

    let loaded = repo.get_entry(id).unwrap().unwrap();
    assert_eq!(loaded.date, day(2025, 1, 15));
    assert_eq!(loaded.content, "slow morning, good afternoon");
    assert_eq!(loaded.mood, Mood::Good);
    assert_eq!(loaded.created_at, entry.created_at);
}

#[test]
fn same_day_entries_are_not_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJournalRepository::new(&conn);

    let first = JournalEntry::new(day(2025, 2, 1), "morning pages");
    let second = JournalEntry::new(day(2025, 2, 1), "evening recap");
    repo.create_entry(&first).unwrap();
    repo.create_entry(&second).unwrap();

    let on_day = repo
        .list_entries(&EntryListQuery {
            on: Some(day(2025, 2, 1)),
            ..EntryListQuery::default()
        })
        .unwrap();
    assert_eq!(on_day.len(), 2);
}

#[test]
fn update_existing_entry() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJournalRepository::new(&conn);

    let mut entry = JournalEntry::new(day(2025, 2, 2), "draft");
    entry.id = repo.create_entry(&entry).unwrap();

    entry.content = "rewritten".to_string();
    entry.mood = Mood::Great;
    entry.date = day(2025, 2, 3);
    repo.update_entry(&entry).unwrap();

    let loaded = repo.get_entry(entry.id).unwrap().unwrap();
    assert_eq!(loaded.content, "rewritten");
    assert_eq!(loaded.mood, Mood::Great);
    assert_eq!(loaded.date, day(2025, 2, 3));
}

#[test]
fn update_not_found_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJournalRepository::new(&conn);

    let mut entry = JournalEntry::new(day(2025, 2, 2), "missing");
    entry.id = 777;
    let err = repo.update_entry(&entry).unwrap_err();
    assert!(matches!(err, RepoError::EntryNotFound(777)));
}

#[test]
fn delete_removes_row_from_subsequent_reads() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJournalRepository::new(&conn);

    let id = repo
        .create_entry(&JournalEntry::new(day(2025, 2, 4), "short-lived"))
        .unwrap();
    repo.delete_entry(id).unwrap();

    assert!(repo.get_entry(id).unwrap().is_none());
    let err = repo.delete_entry(id).unwrap_err();
    assert!(matches!(err, RepoError::EntryNotFound(_)));
}

#[test]
fn list_filters_by_mood() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJournalRepository::new(&conn);

    let mut good = JournalEntry::new(day(2025, 2, 5), "good day");
    good.mood = Mood::Good;
    let good_id = repo.create_entry(&good).unwrap();

    let mut awful = JournalEntry::new(day(2025, 2, 6), "awful day");
    awful.mood = Mood::Awful;
    repo.create_entry(&awful).unwrap();

    let result = repo
        .list_entries(&EntryListQuery {
            mood: Some(Mood::Good),
            ..EntryListQuery::default()
        })
        .unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, good_id);
}

#[test]
fn list_orders_newest_day_first() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJournalRepository::new(&conn);

    repo.create_entry(&JournalEntry::new(day(2025, 2, 1), "oldest"))
        .unwrap();
    repo.create_entry(&JournalEntry::new(day(2025, 2, 10), "newest"))
        .unwrap();
    repo.create_entry(&JournalEntry::new(day(2025, 2, 5), "middle"))
        .unwrap();

    let listed = repo.list_entries(&EntryListQuery::default()).unwrap();
    let dates: Vec<_> = listed.iter().map(|entry| entry.date).collect();
    assert_eq!(dates, vec![day(2025, 2, 10), day(2025, 2, 5), day(2025, 2, 1)]);
}

#[test]
fn validation_failure_blocks_create_and_update() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJournalRepository::new(&conn);

    let blank = JournalEntry::new(day(2025, 2, 7), "   ");
    let create_err = repo.create_entry(&blank).unwrap_err();
    assert!(matches!(create_err, RepoError::EntryValidation(_)));

    let mut valid = JournalEntry::new(day(2025, 2, 7), "valid");
    valid.id = repo.create_entry(&valid).unwrap();

    valid.content = String::new();
    let update_err = repo.update_entry(&valid).unwrap_err();
    assert!(matches!(update_err, RepoError::EntryValidation(_)));
}

#[test]
fn service_wraps_repository_calls() {
    let conn = open_db_in_memory().unwrap();
    let service = JournalService::new(SqliteJournalRepository::new(&conn));

    let id = service
        .create_entry(&CreateEntryRequest {
            date: day(2025, 2, 8),
            content: "from service".to_string(),
            mood: Mood::Neutral,
        })
        .unwrap();

    let fetched = service.get_entry(id).unwrap().unwrap();
    assert_eq!(fetched.content, "from service");
    assert_eq!(fetched.mood, Mood::Neutral);

    service.delete_entry(id).unwrap();
    assert!(service.get_entry(id).unwrap().is_none());
}
