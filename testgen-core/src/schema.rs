/// DDL to create the schema_version tracking table.
///
/// Applied unconditionally on every DB open (before checking the version),
/// using `IF NOT EXISTS` so it is safe to run multiple times.
pub const SCHEMA_VERSION_DDL: &str = "
    CREATE TABLE IF NOT EXISTS schema_version (
        version INTEGER NOT NULL
    ) STRICT;
";

/// DDL for the full v1 schema.
///
/// A single table: `test_cases`, one row per generated test suite. The
/// `edge_cases` column stores a JSON array of category strings — SQLite has
/// no array type and the list is opaque to every query we run.
///
/// `STRICT` mode for type enforcement, matching the rest of the family.
pub const SCHEMA_V1_SQL: &str = "
    CREATE TABLE IF NOT EXISTS test_cases (
        id           TEXT    PRIMARY KEY,
        repo         TEXT    NOT NULL,
        file_path    TEXT    NOT NULL,
        technology   TEXT    NOT NULL,
        edge_cases   TEXT    NOT NULL DEFAULT '[]',
        test_content TEXT    NOT NULL,
        status       TEXT    NOT NULL DEFAULT 'generated'
                             CHECK(status IN ('generated', 'committed')),
        created_at   INTEGER NOT NULL
    ) STRICT;

    CREATE INDEX IF NOT EXISTS idx_test_cases_created_at
        ON test_cases (created_at DESC);
";

/// Runs forward-only schema migration to bring the DB to the latest version.
///
/// Idempotent: safe to call on every startup regardless of whether the
/// schema has already been applied.
///
/// # Process
///
/// 1. Creates the `schema_version` table if it does not exist.
/// 2. Reads the current version (`0` if the table is empty).
/// 3. If the version is below 1, applies `SCHEMA_V1_SQL` inside a
///    `BEGIN IMMEDIATE` transaction and records `version = 1`.
///
/// A pre-versioning `test_cases` table (no `schema_version` row) is dropped
/// and recreated — the history store is a cache of backend results, never
/// the only copy of anything, so losing it is acceptable.
///
/// # Errors
///
/// Returns `rusqlite::Error` if the DDL fails or the version row cannot be
/// read.
pub fn migrate(db: &mut rusqlite::Connection) -> rusqlite::Result<()> {
    db.execute_batch(SCHEMA_VERSION_DDL)?;

    let version: i64 = db
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |r| r.get(0),
        )
        .unwrap_or(0);

    if version < 1 {
        let tx = db.transaction_with_behavior(rusqlite::TransactionBehavior::Immediate)?;
        tx.execute_batch("DROP TABLE IF EXISTS test_cases;")?;
        tx.execute_batch(SCHEMA_V1_SQL)?;
        tx.execute("INSERT INTO schema_version (version) VALUES (1)", [])?;
        tx.commit()?;
    }

    Ok(())
}
