//! Integration test for the history store lifecycle.
//!
//! Exercises: open_db, migrate, record_test_case, mark_committed,
//! load_recent, delete_test_case, persistence across connections, and
//! migration over a pre-versioning database.

use testgen_core::db;

fn temp_db_path() -> String {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.keep().join("history.db");
    path.to_string_lossy().to_string()
}

#[tokio::test]
async fn full_history_lifecycle() {
    let path = temp_db_path();
    let conn = db::open_db(&path).await.unwrap();

    // Verify schema_version = 1
    let version: i64 = conn
        .call(|db| {
            Ok::<_, rusqlite::Error>(db.query_row(
                "SELECT MAX(version) FROM schema_version",
                [],
                |r| r.get(0),
            )?)
        })
        .await
        .unwrap();
    assert_eq!(version, 1, "schema_version should be 1");

    // Verify WAL mode
    let journal: String = conn
        .call(|db| {
            Ok::<_, rusqlite::Error>(
                db.query_row("PRAGMA journal_mode", [], |r| r.get(0))?,
            )
        })
        .await
        .unwrap();
    assert_eq!(journal, "wal", "journal_mode should be wal");

    // Record a generated suite
    let edge_cases = vec!["null-input".to_owned(), "boundary".to_owned()];
    let recorded = db::record_test_case(
        &conn,
        "octo/demo",
        "src/main.rs",
        "python",
        &edge_cases,
        "def test_main():\n    assert True\n",
    )
    .await
    .unwrap();
    assert!(!recorded.id.is_empty(), "record ID should be a non-empty UUID");
    assert_eq!(recorded.status, "generated");
    assert_eq!(recorded.edge_cases, edge_cases);
    assert!(recorded.created_at > 0);

    // Load it back — edge cases must round-trip through the JSON column.
    let rows = db::load_recent(&conn, 10).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, recorded.id);
    assert_eq!(rows[0].repo, "octo/demo");
    assert_eq!(rows[0].edge_cases, edge_cases);

    // Commit flips the status.
    db::mark_committed(&conn, &recorded.id).await.unwrap();
    let rows = db::load_recent(&conn, 10).await.unwrap();
    assert_eq!(rows[0].status, "committed");

    // Marking an id that no longer exists is a silent no-op.
    db::mark_committed(&conn, "no-such-id").await.unwrap();

    // A second record, one second later so the ordering is deterministic.
    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;
    let newer = db::record_test_case(&conn, "octo/demo", "src/lib.rs", "rust", &[], "#[test]\nfn t() {}\n")
        .await
        .unwrap();

    let rows = db::load_recent(&conn, 10).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, newer.id, "load_recent returns newest first");

    // Limit is respected.
    let rows = db::load_recent(&conn, 1).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, newer.id);

    // Persistence across connections.
    let conn2 = db::open_db(&path).await.unwrap();
    let rows = db::load_recent(&conn2, 10).await.unwrap();
    assert_eq!(rows.len(), 2, "history should persist across connections");

    // Deletion.
    db::delete_test_case(&conn2, &recorded.id).await.unwrap();
    let rows = db::load_recent(&conn2, 10).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, newer.id);
}

#[tokio::test]
async fn migration_handles_pre_versioning_db() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("legacy.db").to_string_lossy().to_string();

    // Create a legacy DB with an old test_cases shape and no schema_version.
    {
        let db = rusqlite::Connection::open(&path).unwrap();
        db.execute_batch(
            "CREATE TABLE test_cases (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                repo TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            INSERT INTO test_cases (repo, created_at) VALUES ('old/repo', '2024-01-01');",
        )
        .unwrap();
    }

    // open_db should replace the legacy schema gracefully.
    let conn = db::open_db(&path).await.unwrap();

    let rows = db::load_recent(&conn, 10).await.unwrap();
    assert!(rows.is_empty(), "legacy rows are dropped during migration");

    // The new schema must be fully usable.
    let recorded = db::record_test_case(&conn, "octo/demo", "a.py", "python", &[], "x")
        .await
        .unwrap();
    assert!(!recorded.id.is_empty());
    let rows = db::load_recent(&conn, 10).await.unwrap();
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn corrupt_edge_case_cell_degrades_to_empty_list() {
    let path = temp_db_path();
    let conn = db::open_db(&path).await.unwrap();

    let recorded = db::record_test_case(&conn, "octo/demo", "a.py", "python", &[], "x")
        .await
        .unwrap();

    // Sabotage the JSON cell directly.
    let id = recorded.id.clone();
    conn.call(move |db| {
        db.execute(
            "UPDATE test_cases SET edge_cases = 'not json' WHERE id = ?1",
            rusqlite::params![&id],
        )?;
        Ok::<_, rusqlite::Error>(())
    })
    .await
    .unwrap();

    let rows = db::load_recent(&conn, 10).await.unwrap();
    assert_eq!(rows.len(), 1, "one bad cell must not hide the row");
    assert!(rows[0].edge_cases.is_empty());
}
