//! Tests for scoped preferences and their backends.

use std::sync::atomic::{AtomicUsize, Ordering};

use armory_settings::{MemoryBackend, PreferenceBackend, Preferences, SqliteBackend};

fn scratch_db() -> std::path::PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    std::env::temp_dir().join(format!(
        "armory-settings-test-{}-{}.db",
        std::process::id(),
        n
    ))
}

#[tokio::test]
async fn test_missing_key_is_none() {
    let prefs = Preferences::in_memory();
    let value: Option<Vec<String>> = prefs.get("columns.enabled.armor").await.unwrap();
    assert!(value.is_none());
}

#[tokio::test]
async fn test_get_or_falls_back_to_default() {
    let prefs = Preferences::in_memory();
    let value = prefs.get_or("page.size", 50u32).await.unwrap();
    assert_eq!(value, 50);
}

#[tokio::test]
async fn test_set_then_get_typed_value() {
    let prefs = Preferences::in_memory();
    let columns = vec!["name".to_string(), "power".to_string()];
    prefs.set("columns.enabled.weapon", &columns).await.unwrap();

    let stored: Vec<String> = prefs.get("columns.enabled.weapon").await.unwrap().unwrap();
    assert_eq!(stored, columns);
}

#[tokio::test]
async fn test_wrong_type_is_deserialization_error() {
    let prefs = Preferences::in_memory();
    prefs.set("flag", &true).await.unwrap();
    let result = prefs.get::<Vec<String>>("flag").await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_scoped_keys_nest_with_dots() {
    let prefs = Preferences::in_memory();
    let columns = prefs.scoped("columns").scoped("enabled");
    assert_eq!(columns.scope(), "columns.enabled");
    assert_eq!(columns.key("armor"), "columns.enabled.armor");

    columns.set("armor", &vec!["name".to_string()]).await.unwrap();
    let via_root: Vec<String> = prefs.get("columns.enabled.armor").await.unwrap().unwrap();
    assert_eq!(via_root, vec!["name".to_string()]);
}

#[tokio::test]
async fn test_names_are_relative_to_scope() {
    let prefs = Preferences::in_memory();
    prefs.set("columns.enabled.weapon", &1u8).await.unwrap();
    prefs.set("columns.enabled.armor", &1u8).await.unwrap();
    prefs.set("columns.enabledness", &1u8).await.unwrap();
    prefs.set("search.history", &1u8).await.unwrap();

    let names = prefs.scoped("columns.enabled").names().await.unwrap();
    assert_eq!(names, vec!["armor", "weapon"]);

    let all = prefs.names().await.unwrap();
    assert_eq!(all.len(), 4);
}

#[tokio::test]
async fn test_remove_deletes_key() {
    let backend = MemoryBackend::new();
    backend.store("a", vec![1]).await.unwrap();
    assert_eq!(backend.len(), 1);
    backend.remove("a").await.unwrap();
    assert!(backend.is_empty());
    assert!(backend.load("a").await.unwrap().is_none());
    backend.remove("a").await.unwrap();
}

#[tokio::test]
async fn test_sqlite_in_memory_overwrites() {
    let prefs = Preferences::new(SqliteBackend::in_memory().await.unwrap());
    prefs.set("columns.enabled.armor", &vec!["name".to_string()]).await.unwrap();
    prefs.set("columns.enabled.armor", &vec!["power".to_string()]).await.unwrap();

    let stored: Vec<String> = prefs.get("columns.enabled.armor").await.unwrap().unwrap();
    assert_eq!(stored, vec!["power".to_string()]);
}

#[tokio::test]
async fn test_sqlite_prefix_treats_underscore_literally() {
    let backend = SqliteBackend::in_memory().await.unwrap();
    backend.store("col_a", vec![1]).await.unwrap();
    backend.store("colXa", vec![1]).await.unwrap();

    let keys = backend.keys("col_").await.unwrap();
    assert_eq!(keys, vec!["col_a".to_string()]);
}

#[tokio::test]
async fn test_prefix_scan_agrees_across_backends() {
    let memory = MemoryBackend::new();
    let sqlite = SqliteBackend::in_memory().await.unwrap();
    for key in ["columns.x", "COLUMNS.y", "a\\b.z", "a%b.z", "columns"] {
        memory.store(key, vec![1]).await.unwrap();
        sqlite.store(key, vec![1]).await.unwrap();
    }

    for prefix in ["columns.", "a\\b", "a%", "", "missing"] {
        let from_memory = memory.keys(prefix).await.unwrap();
        let from_sqlite = sqlite.keys(prefix).await.unwrap();
        assert_eq!(from_sqlite, from_memory, "prefix {:?}", prefix);
    }

    assert_eq!(sqlite.keys("columns.").await.unwrap(), vec!["columns.x"]);
    assert_eq!(sqlite.keys("a\\b").await.unwrap(), vec!["a\\b.z"]);
}

#[tokio::test]
async fn test_sqlite_persists_across_reopen() {
    let path = scratch_db();
    {
        let prefs = Preferences::new(SqliteBackend::open(&path).await.unwrap());
        prefs.set("columns.enabled.weapon", &vec!["name".to_string()]).await.unwrap();
    }

    let reopened = Preferences::new(SqliteBackend::open(&path).await.unwrap());
    let stored: Vec<String> = reopened.get("columns.enabled.weapon").await.unwrap().unwrap();
    assert_eq!(stored, vec!["name".to_string()]);

    reopened.remove("columns.enabled.weapon").await.unwrap();
    assert!(reopened.get::<Vec<String>>("columns.enabled.weapon").await.unwrap().is_none());

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_settings_db_lives_in_data_dir() {
    if let (Some(db), Some(data)) = (
        armory_settings::paths::settings_db(),
        armory_settings::paths::data_dir(),
    ) {
        assert!(db.starts_with(data));
        assert_eq!(db.file_name().and_then(|n| n.to_str()), Some("settings.db"));
    }
}

#[test]
fn test_ensure_data_dir_matches_data_dir() {
    if let (Some(expected), Ok(dir)) = (
        armory_settings::paths::data_dir(),
        armory_settings::paths::ensure_data_dir(),
    ) {
        assert_eq!(dir, expected);
        assert!(dir.is_dir());
    }
}
