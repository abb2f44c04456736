//! SQL schema for the Roster SQLite store.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per candidate document. `seq` fixes the listing order to
-- insertion order; `body` is the JSON document without its id.
CREATE TABLE IF NOT EXISTS candidates (
    seq   INTEGER PRIMARY KEY AUTOINCREMENT,
    id    TEXT NOT NULL UNIQUE,
    body  TEXT NOT NULL
);

PRAGMA user_version = 1;
";
