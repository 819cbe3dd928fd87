use chrono::NaiveDate;
use daybook_core::db::open_db_in_memory;
use daybook_core::{
    CreateTaskRequest, Priority, RepoError, SqliteTaskRepository, Task, TaskListQuery,
    TaskRepository, TaskService,
};

fn task_with_title(title: &str) -> Task {
    Task::new(title, "")
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let mut task = task_with_title("water the plants");
    task.priority = Priority::High;
    let id = repo.create_task(&task).unwrap();
    assert!(id > 0);

    let loaded = repo.get_task(id).unwrap().unwrap();
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.title, "water the plants");
    assert_eq!(loaded.priority, Priority::High);
    assert!(!loaded.completed);
    assert_eq!(loaded.created_at, task.created_at);
}

#[test]
fn ids_are_assigned_monotonically() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let first = repo.create_task(&task_with_title("first")).unwrap();
    let second = repo.create_task(&task_with_title("second")).unwrap();
    let third = repo.create_task(&task_with_title("third")).unwrap();

    assert!(first < second);
    assert!(second < third);
}

#[test]
fn update_existing_task() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let mut task = task_with_title("draft");
    task.id = repo.create_task(&task).unwrap();

    task.title = "final".to_string();
    task.description = "details".to_string();
    task.priority = Priority::Low;
    repo.update_task(&task).unwrap();

    let loaded = repo.get_task(task.id).unwrap().unwrap();
    assert_eq!(loaded.title, "final");
    assert_eq!(loaded.description, "details");
    assert_eq!(loaded.priority, Priority::Low);
}

#[test]
fn update_not_found_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let mut task = task_with_title("missing");
    task.id = 4242;
    let err = repo.update_task(&task).unwrap_err();
    assert!(matches!(err, RepoError::TaskNotFound(4242)));
}

#[test]
fn delete_removes_row_from_subsequent_reads() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let id = repo.create_task(&task_with_title("short-lived")).unwrap();
    repo.delete_task(id).unwrap();

    assert!(repo.get_task(id).unwrap().is_none());
    assert!(repo.list_tasks(&TaskListQuery::default()).unwrap().is_empty());

    let err = repo.delete_task(id).unwrap_err();
    assert!(matches!(err, RepoError::TaskNotFound(_)));
}

#[test]
fn toggle_twice_restores_flag_and_touches_only_updated_at() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let mut task = task_with_title("flip me");
    task.id = repo.create_task(&task).unwrap();
    let original = repo.get_task(task.id).unwrap().unwrap();

    let toggled = repo.toggle_completed(task.id).unwrap();
    assert!(toggled.completed);

    let restored = repo.toggle_completed(task.id).unwrap();
    assert_eq!(restored.completed, original.completed);
    assert_eq!(restored.title, original.title);
    assert_eq!(restored.description, original.description);
    assert_eq!(restored.priority, original.priority);
    assert_eq!(restored.due_at, original.due_at);
    assert_eq!(restored.created_at, original.created_at);
    assert!(restored.updated_at >= original.updated_at);
}

#[test]
fn toggle_not_found_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let err = repo.toggle_completed(99).unwrap_err();
    assert!(matches!(err, RepoError::TaskNotFound(99)));
}

#[test]
fn list_filters_by_completion_tri_state() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let open_id = repo.create_task(&task_with_title("open")).unwrap();
    let done_id = repo.create_task(&task_with_title("done")).unwrap();
    repo.toggle_completed(done_id).unwrap();

    let all = repo.list_tasks(&TaskListQuery::default()).unwrap();
    assert_eq!(all.len(), 2);

    let active = repo
        .list_tasks(&TaskListQuery {
            completed: Some(false),
            ..TaskListQuery::default()
        })
        .unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, open_id);

    let completed = repo
        .list_tasks(&TaskListQuery {
            completed: Some(true),
            ..TaskListQuery::default()
        })
        .unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].id, done_id);
}

#[test]
fn list_filters_by_due_day() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let monday = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();

    let mut due_monday = task_with_title("due monday");
    due_monday.due_at = monday.and_hms_opt(9, 30, 0);
    let monday_id = repo.create_task(&due_monday).unwrap();

    let mut due_tuesday = task_with_title("due tuesday");
    due_tuesday.due_at = monday.succ_opt().unwrap().and_hms_opt(9, 30, 0);
    repo.create_task(&due_tuesday).unwrap();

    repo.create_task(&task_with_title("no due date")).unwrap();

    let result = repo
        .list_tasks(&TaskListQuery {
            due_on: Some(monday),
            ..TaskListQuery::default()
        })
        .unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, monday_id);
}

#[test]
fn validation_failure_blocks_create_and_update() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let blank = task_with_title("   ");
    let create_err = repo.create_task(&blank).unwrap_err();
    assert!(matches!(create_err, RepoError::TaskValidation(_)));

    let mut valid = task_with_title("valid");
    valid.id = repo.create_task(&valid).unwrap();

    valid.title = String::new();
    let update_err = repo.update_task(&valid).unwrap_err();
    assert!(matches!(update_err, RepoError::TaskValidation(_)));
}

#[test]
fn service_wraps_repository_calls() {
    let conn = open_db_in_memory().unwrap();
    let service = TaskService::new(SqliteTaskRepository::new(&conn));

    let id = service
        .create_task(&CreateTaskRequest {
            title: "from service".to_string(),
            description: "created through the facade".to_string(),
            priority: Priority::Medium,
            due_at: None,
        })
        .unwrap();

    let fetched = service.get_task(id).unwrap().unwrap();
    assert_eq!(fetched.title, "from service");
    assert!(!fetched.completed);

    let toggled = service.toggle_completed(id).unwrap();
    assert!(toggled.completed);

    service.delete_task(id).unwrap();
    assert!(service.get_task(id).unwrap().is_none());
}
