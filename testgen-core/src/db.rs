//! Local history store for generated test suites.
//!
//! A WAL-mode SQLite database, usually at `.testgen/history.db`. This is a
//! convenience record of what was generated and committed during past
//! sessions — the application must run fully without it, which is why every
//! operation returns [`StorageError`] and every call site downgrades that to
//! a logged warning rather than propagating it.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio_rusqlite::Connection;

use crate::error::StorageError;
use crate::types::StoredTestCase;

/// Opens (or creates) the SQLite database at `path`, configures WAL mode,
/// and applies schema migrations via the `schema_version` table.
///
/// This function is the single entry point for all database connections.
/// It sets `busy_timeout` via the `Connection` method (not a PRAGMA string)
/// so the setting takes effect regardless of pragma caching.
///
/// # Errors
///
/// Returns `StorageError` if the file cannot be opened, WAL configuration
/// fails, or schema DDL fails.
pub async fn open_db(path: &str) -> Result<Connection, StorageError> {
    let conn = Connection::open(path)
        .await
        .map_err(tokio_rusqlite::Error::from)?;

    // Step 1: WAL pragmas — connection-level settings re-applied on every open.
    conn.call(|db| {
        db.execute_batch(
            "PRAGMA journal_mode=WAL;
             PRAGMA synchronous=NORMAL;
             PRAGMA foreign_keys=ON;",
        )?;
        db.busy_timeout(Duration::from_secs(5))?;
        Ok(())
    })
    .await?;

    // Step 2: Checkpoint any leftover WAL from a previous run.
    conn.call(|db| {
        db.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    })
    .await?;

    // Step 3: Apply schema migrations via the schema_version table.
    conn.call(|db| {
        crate::schema::migrate(db)?;
        Ok(())
    })
    .await?;

    Ok(conn)
}

/// Returns the current Unix timestamp in seconds.
fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

/// Records a freshly generated test suite with status `generated`.
///
/// Generates a new UUID v4 id and inserts via `BEGIN IMMEDIATE`. Returns the
/// stored row so the caller can keep the id for a later
/// [`mark_committed`].
///
/// # Errors
///
/// `StorageError::Encode` if the edge-case list cannot be serialized,
/// `StorageError::Db` if the insert transaction fails.
pub async fn record_test_case(
    conn: &Connection,
    repo: &str,
    file_path: &str,
    technology: &str,
    edge_cases: &[String],
    test_content: &str,
) -> Result<StoredTestCase, StorageError> {
    let record = StoredTestCase {
        id: uuid::Uuid::new_v4().to_string(),
        repo: repo.to_owned(),
        file_path: file_path.to_owned(),
        technology: technology.to_owned(),
        edge_cases: edge_cases.to_vec(),
        test_content: test_content.to_owned(),
        status: "generated".to_owned(),
        created_at: now_secs(),
    };
    let edge_cases_json = serde_json::to_string(&record.edge_cases)?;

    let row = record.clone();
    conn.call(move |db| {
        let tx = db.transaction_with_behavior(rusqlite::TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO test_cases
                 (id, repo, file_path, technology, edge_cases, test_content, status, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            rusqlite::params![
                &row.id,
                &row.repo,
                &row.file_path,
                &row.technology,
                &edge_cases_json,
                &row.test_content,
                &row.status,
                row.created_at,
            ],
        )?;
        tx.commit()?;
        Ok(())
    })
    .await?;

    Ok(record)
}

/// Flips a recorded suite to status `committed` (after a successful
/// `/api/commit-tests`). Unknown ids are a silent no-op — the row may have
/// been deleted from the history view in the meantime.
///
/// # Errors
///
/// Returns `StorageError::Db` if the update transaction fails.
pub async fn mark_committed(conn: &Connection, id: &str) -> Result<(), StorageError> {
    let id = id.to_owned();
    conn.call(move |db| {
        let tx = db.transaction_with_behavior(rusqlite::TransactionBehavior::Immediate)?;
        tx.execute(
            "UPDATE test_cases SET status = 'committed' WHERE id = ?1",
            rusqlite::params![&id],
        )?;
        tx.commit()?;
        Ok(())
    })
    .await?;
    Ok(())
}

/// Loads the most recent `limit` suites, newest first.
///
/// An unreadable `edge_cases` cell decodes to an empty list rather than
/// failing the whole load — one corrupt row must not hide the history.
///
/// # Errors
///
/// Returns `StorageError::Db` if the query fails.
pub async fn load_recent(
    conn: &Connection,
    limit: u32,
) -> Result<Vec<StoredTestCase>, StorageError> {
    let rows = conn
        .call(move |db| {
            let mut stmt = db.prepare(
                "SELECT id, repo, file_path, technology, edge_cases, test_content,
                        status, created_at
                 FROM test_cases
                 ORDER BY created_at DESC, id
                 LIMIT ?1",
            )?;
            let rows = stmt
                .query_map(rusqlite::params![limit], |r| {
                    let edge_cases_json: String = r.get(4)?;
                    let edge_cases = serde_json::from_str(&edge_cases_json).unwrap_or_else(|err| {
                        log::warn!("unreadable edge_cases cell, treating as empty: {err}");
                        Vec::new()
                    });
                    Ok(StoredTestCase {
                        id: r.get(0)?,
                        repo: r.get(1)?,
                        file_path: r.get(2)?,
                        technology: r.get(3)?,
                        edge_cases,
                        test_content: r.get(5)?,
                        status: r.get(6)?,
                        created_at: r.get(7)?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(rows)
        })
        .await?;
    Ok(rows)
}

/// Deletes one recorded suite from the history.
///
/// # Errors
///
/// Returns `StorageError::Db` if the delete transaction fails.
pub async fn delete_test_case(conn: &Connection, id: &str) -> Result<(), StorageError> {
    let id = id.to_owned();
    conn.call(move |db| {
        let tx = db.transaction_with_behavior(rusqlite::TransactionBehavior::Immediate)?;
        tx.execute("DELETE FROM test_cases WHERE id = ?1", rusqlite::params![&id])?;
        tx.commit()?;
        Ok(())
    })
    .await?;
    Ok(())
}
