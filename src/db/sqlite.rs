// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use log::{debug, info, warn};
use rusqlite::{ffi, params, Connection, ErrorCode, OptionalExtension};

use crate::db::schema::{get_or_create_namespace, init_schema};
use crate::db::{ConnectParams, Driver, LoadError, SequenceSink};
use crate::errors::LoaderError;
use crate::seq::record::SeqRecord;

pub const DEFAULT_DATABASE: &str = "seqdb.sqlite";

/// An entry as read back from the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredEntry {
    pub accession: String,
    pub version: i64,
    pub name: String,
    pub description: String,
    pub alphabet: String,
    pub sequence: String,
}

/// Loads records into a SQLite BioSQL-style database. Loads accumulate in one open transaction
/// until `commit`.
pub struct SqliteSink {
    conn: Connection,
    namespace_id: i64,
    pending: usize,
}

impl SqliteSink {
    pub fn connect(params: &ConnectParams) -> Result<Self, LoaderError> {
        match params.driver {
            Driver::Sqlite => {}
        }
        for (setting, value) in [
            ("user", &params.user),
            ("password", &params.password),
            ("host", &params.host),
        ] {
            if value.is_some() {
                warn!("The sqlite driver ignores the {} setting", setting);
            }
        }

        let path = params.database.as_deref().unwrap_or(DEFAULT_DATABASE);
        let conn = Connection::open(path)?;
        info!("Opened database {}", path);
        Self::from_connection(conn, &params.namespace)
    }

    pub fn from_connection(conn: Connection, namespace: &str) -> Result<Self, LoaderError> {
        init_schema(&conn)?;
        let namespace_id = get_or_create_namespace(&conn, namespace)?;
        debug!("Namespace '{}' has id {}", namespace, namespace_id);
        Ok(SqliteSink {
            conn,
            namespace_id,
            pending: 0,
        })
    }

    /// Number of loads since the last commit.
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Looks up an entry of this namespace by identifier (`ACC` or `ACC.version`). Sees pending
    /// loads too.
    pub fn fetch(&self, id: &str) -> Result<Option<StoredEntry>, LoaderError> {
        let (accession, version) = split_version(id);
        let entry = self
            .conn
            .query_row(
                r#"
                SELECT e.accession, e.version, e.name, e.description, s.alphabet, s.seq
                FROM bioentry e
                JOIN biosequence s ON s.bioentry_id = e.bioentry_id
                WHERE e.biodatabase_id = ?1 AND e.accession = ?2 AND e.version = ?3
                "#,
                params![self.namespace_id, accession, version],
                |row| {
                    Ok(StoredEntry {
                        accession: row.get(0)?,
                        version: row.get(1)?,
                        name: row.get(2)?,
                        description: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                        alphabet: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
                        sequence: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
                    })
                },
            )
            .optional()?;
        Ok(entry)
    }

    pub fn entry_count(&self) -> Result<usize, LoaderError> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM bioentry WHERE biodatabase_id = ?1",
            [self.namespace_id],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    fn insert_record(&self, record: &SeqRecord) -> rusqlite::Result<()> {
        let (accession, version) = split_version(&record.id);
        self.conn
            .prepare_cached(
                r#"
                INSERT INTO bioentry (biodatabase_id, name, accession, division, description, version)
                VALUES (?1, ?2, ?3, 'UNK', ?4, ?5)
                "#,
            )?
            .execute(params![
                self.namespace_id,
                record.name,
                accession,
                record.description,
                version,
            ])?;
        let bioentry_id = self.conn.last_insert_rowid();

        self.conn
            .prepare_cached(
                r#"
                INSERT INTO biosequence (bioentry_id, version, length, alphabet, seq)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )?
            .execute(params![
                bioentry_id,
                version,
                record.sequence.len() as i64,
                record.alphabet(),
                record.sequence,
            ])?;
        Ok(())
    }

    // Savepoint so that a failing record leaves no partial rows behind
    fn try_load(&self, record: &SeqRecord) -> rusqlite::Result<()> {
        if self.conn.is_autocommit() {
            self.conn.execute_batch("BEGIN")?;
        }
        self.conn.execute_batch("SAVEPOINT load_record")?;
        if let Err(e) = self.insert_record(record) {
            if let Err(rb) = self
                .conn
                .execute_batch("ROLLBACK TO load_record; RELEASE load_record")
            {
                warn!("Rollback of {} failed: {}", record.id, rb);
            }
            return Err(e);
        }
        self.conn.execute_batch("RELEASE load_record")
    }

    // Some failures (full disk, I/O, out of memory) make SQLite roll back the whole transaction,
    // taking every uncommitted load with it.
    fn load_failure(&mut self, id: &str, err: rusqlite::Error) -> LoadError {
        if self.conn.is_autocommit() && self.pending > 0 {
            let lost = std::mem::take(&mut self.pending);
            warn!("Transaction rolled back by SQLite; {} uncommitted records lost", lost);
            return LoadError::TransactionLost {
                id: id.to_string(),
                lost,
                message: err.to_string(),
            };
        }
        classify(id, err)
    }
}

impl SequenceSink for SqliteSink {
    fn load(&mut self, record: &SeqRecord) -> Result<(), LoadError> {
        match self.try_load(record) {
            Ok(()) => {
                self.pending += 1;
                Ok(())
            }
            Err(e) => Err(self.load_failure(&record.id, e)),
        }
    }

    fn commit(&mut self) -> Result<(), LoaderError> {
        if !self.conn.is_autocommit() {
            self.conn.execute_batch("COMMIT")?;
            debug!("Committed {} pending records", self.pending);
        }
        self.pending = 0;
        Ok(())
    }
}

fn classify(id: &str, err: rusqlite::Error) -> LoadError {
    let duplicate = match &err {
        rusqlite::Error::SqliteFailure(e, _) => {
            e.code == ErrorCode::ConstraintViolation
                && (e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
                    || e.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY)
        }
        _ => false,
    };
    if duplicate {
        LoadError::Duplicate {
            id: id.to_string(),
            message: err.to_string(),
        }
    } else {
        LoadError::Failed {
            id: id.to_string(),
            message: err.to_string(),
        }
    }
}

/// `X12345.2` -> (`X12345`, 2). Ids without a numeric suffix get version 0.
fn split_version(id: &str) -> (&str, i64) {
    match id.rsplit_once('.') {
        Some((acc, ver)) if !acc.is_empty() && !ver.is_empty() => match ver.parse::<i64>() {
            Ok(v) if ver.bytes().all(|b| b.is_ascii_digit()) => (acc, v),
            _ => (id, 0),
        },
        _ => (id, 0),
    }
}
