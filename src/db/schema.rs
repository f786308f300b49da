// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

//! BioSQL-style tables: namespaces (`biodatabase`), entries and their sequences.

use rusqlite::Connection;

pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS biodatabase (
            biodatabase_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            authority TEXT,
            description TEXT
        );

        CREATE TABLE IF NOT EXISTS bioentry (
            bioentry_id INTEGER PRIMARY KEY AUTOINCREMENT,
            biodatabase_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            accession TEXT NOT NULL,
            identifier TEXT,
            division TEXT,
            description TEXT,
            version INTEGER NOT NULL DEFAULT 0,

            UNIQUE (accession, biodatabase_id, version),
            FOREIGN KEY(biodatabase_id) REFERENCES biodatabase(biodatabase_id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS bioentry_name ON bioentry(name);

        CREATE TABLE IF NOT EXISTS biosequence (
            bioentry_id INTEGER PRIMARY KEY,
            version INTEGER,
            length INTEGER,
            alphabet TEXT,
            seq TEXT,

            FOREIGN KEY(bioentry_id) REFERENCES bioentry(bioentry_id) ON DELETE CASCADE
        );
        "#,
    )
}

/// Returns the id of namespace `name`, creating it if needed.
pub fn get_or_create_namespace(conn: &Connection, name: &str) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT OR IGNORE INTO biodatabase (name) VALUES (?1)",
        [name],
    )?;
    conn.query_row(
        "SELECT biodatabase_id FROM biodatabase WHERE name = ?1",
        [name],
        |row| row.get(0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap();
    }

    #[test]
    fn test_namespace_reused() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        let a = get_or_create_namespace(&conn, "db").unwrap();
        let b = get_or_create_namespace(&conn, "db").unwrap();
        let c = get_or_create_namespace(&conn, "other").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
