//! Integration tests for the todo store and its sessions.
//!
//! Run against in-memory SQLite, plus one file-backed database under the
//! system temp directory.

use domain::models::{NewTodo, Todo};
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use persistence::db::DatabaseConfig;
use persistence::TodoStore;

fn memory_config() -> DatabaseConfig {
    DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 5,
        min_connections: 1,
        connect_timeout_secs: 10,
        idle_timeout_secs: 600,
        busy_timeout_secs: 5,
    }
}

async fn memory_store() -> TodoStore {
    TodoStore::connect(&memory_config())
        .await
        .expect("Failed to open in-memory store")
}

fn new_todo(title: &str) -> NewTodo {
    NewTodo {
        title: title.to_string(),
        completed: false,
    }
}

#[tokio::test]
async fn test_insert_assigns_id() {
    let store = memory_store().await;
    let mut session = store.begin().await.unwrap();

    let first = session.insert(&new_todo("Buy milk")).await.unwrap();
    let second = session.insert(&new_todo("Walk dog")).await.unwrap();
    session.commit().await.unwrap();

    assert_eq!(first.id, 1);
    assert_eq!(first.title, "Buy milk");
    assert!(!first.completed);
    assert_ne!(first.id, second.id);
}

#[tokio::test]
async fn test_list_returns_all_in_id_order() {
    let store = memory_store().await;
    let mut session = store.begin().await.unwrap();
    for _ in 0..5 {
        let title: String = Sentence(1..4).fake();
        session.insert(&new_todo(&title)).await.unwrap();
    }
    session.commit().await.unwrap();

    let mut session = store.begin().await.unwrap();
    let todos = session.list().await.unwrap();
    assert_eq!(todos.len(), 5);
    let ids: Vec<i64> = todos.iter().map(|t| t.id).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
}

#[tokio::test]
async fn test_find_by_id_missing_returns_none() {
    let store = memory_store().await;
    let mut session = store.begin().await.unwrap();
    assert!(session.find_by_id(999).await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_persists_fields() {
    let store = memory_store().await;
    let mut session = store.begin().await.unwrap();
    let created = session.insert(&new_todo("Draft")).await.unwrap();
    session.commit().await.unwrap();

    let mut session = store.begin().await.unwrap();
    let mut todo: Todo = session.find_by_id(created.id).await.unwrap().unwrap().into();
    todo.title = "Final".to_string();
    todo.completed = true;
    let updated = session.update(&todo).await.unwrap();
    session.commit().await.unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "Final");
    assert!(updated.completed);

    let mut session = store.begin().await.unwrap();
    let reloaded = session.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(reloaded, updated);
}

#[tokio::test]
async fn test_update_missing_row_is_row_not_found() {
    let store = memory_store().await;
    let mut session = store.begin().await.unwrap();
    let ghost = Todo {
        id: 42,
        title: "Ghost".to_string(),
        completed: false,
    };
    let err = session.update(&ghost).await.unwrap_err();
    assert!(matches!(err, sqlx::Error::RowNotFound));
}

#[tokio::test]
async fn test_delete_removes_row() {
    let store = memory_store().await;
    let mut session = store.begin().await.unwrap();
    let created = session.insert(&new_todo("Temporary")).await.unwrap();
    session.commit().await.unwrap();

    let mut session = store.begin().await.unwrap();
    session.delete(created.id).await.unwrap();
    session.commit().await.unwrap();

    let mut session = store.begin().await.unwrap();
    assert!(session.find_by_id(created.id).await.unwrap().is_none());
    let err = session.delete(created.id).await.unwrap_err();
    assert!(matches!(err, sqlx::Error::RowNotFound));
}

#[tokio::test]
async fn test_dropped_session_rolls_back() {
    let store = memory_store().await;
    {
        let mut session = store.begin().await.unwrap();
        session.insert(&new_todo("Never saved")).await.unwrap();
        // dropped without commit
    }

    let mut session = store.begin().await.unwrap();
    assert!(session.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_explicit_rollback_discards_changes() {
    let store = memory_store().await;
    let mut session = store.begin().await.unwrap();
    session.insert(&new_todo("Discarded")).await.unwrap();
    session.rollback().await.unwrap();

    let mut session = store.begin().await.unwrap();
    assert!(session.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_ping() {
    let store = memory_store().await;
    store.ping().await.unwrap();
}

fn file_config(name: &str) -> (DatabaseConfig, std::path::PathBuf) {
    let path = std::env::temp_dir().join(format!(
        "todo-store-{}-{}.db",
        name,
        std::process::id()
    ));
    let config = DatabaseConfig {
        url: format!("sqlite://{}", path.display()),
        ..memory_config()
    };
    (config, path)
}

fn remove_db_files(path: &std::path::Path) {
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{}", path.display(), suffix));
    }
}

#[tokio::test]
async fn test_write_session_is_not_invalidated_by_other_writer() {
    let (config, path) = file_config("write-lock");
    remove_db_files(&path);
    let store = TodoStore::connect(&config).await.unwrap();

    let mut session = store.begin().await.unwrap();
    let created = session.insert(&new_todo("Contended")).await.unwrap();
    session.commit().await.unwrap();

    // Read, then let another writer try to commit before writing back.
    let mut session = store.begin_write().await.unwrap();
    let mut todo: Todo = session.find_by_id(created.id).await.unwrap().unwrap().into();

    let other = store.clone();
    let other_writer = tokio::spawn(async move {
        let mut session = other.begin_write().await?;
        session.insert(&new_todo("Queued")).await?;
        session.commit().await
    });
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    todo.completed = true;
    let updated = session.update(&todo).await;
    let committed = session.commit().await;
    let other_result = other_writer.await.unwrap();

    let mut session = store.begin().await.unwrap();
    let count = session.list().await.unwrap().len();
    drop(session);
    store.close().await;
    remove_db_files(&path);

    assert!(updated.unwrap().completed);
    committed.unwrap();
    other_result.unwrap();
    assert_eq!(count, 2);
}

#[tokio::test]
async fn test_file_store_survives_reconnect() {
    let (config, path) = file_config("reconnect");

    let store = TodoStore::connect(&config).await.unwrap();
    let mut session = store.begin().await.unwrap();
    let created = session.insert(&new_todo("Persisted")).await.unwrap();
    session.commit().await.unwrap();
    store.close().await;

    // Connecting again re-runs schema initialization on the existing table.
    let store = TodoStore::connect(&config).await.unwrap();
    let mut session = store.begin().await.unwrap();
    let found = session.find_by_id(created.id).await.unwrap();
    drop(session);
    store.close().await;

    remove_db_files(&path);

    assert_eq!(found, Some(created));
}
