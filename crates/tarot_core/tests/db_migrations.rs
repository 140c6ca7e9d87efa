use tarot_core::db::migrations::latest_version;
use tarot_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "readings");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tarot.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "readings");
}

#[test]
fn overlay_rows_survive_reopen() {
    use chrono::NaiveDate;
    use tarot_core::{ReadingRepository, ReadingService, SqliteReadingRepository};

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tarot.db");
    let d = NaiveDate::from_ymd_opt(2025, 9, 11).unwrap();

    let before = {
        let conn = open_db(&path).unwrap();
        let service = ReadingService::new(SqliteReadingRepository::new(&conn));
        service.apply_override(d, "Stay balanced.").unwrap()
    };

    let conn = open_db(&path).unwrap();
    let repo = SqliteReadingRepository::new(&conn);
    let after = repo.get_reading(d).unwrap().unwrap();
    assert_eq!(after, before);
}

#[test]
fn unreachable_database_path_reports_storage_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    // SQLite cannot create the file when the parent directory is missing.
    let path = dir.path().join("missing").join("tarot.db");

    let err = open_db(&path).unwrap_err();
    assert!(matches!(err, DbError::Unavailable(_)), "unexpected error: {err}");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
