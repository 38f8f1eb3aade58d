use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use rusqlite::{params, Connection};
use talent_intake::workflows::intake::{
    ApplicationStore, CompletedApplication, JobRole, StoreError, StoredApplication,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS applicants (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    job_role TEXT NOT NULL,
    experience_years INTEGER NOT NULL,
    qualification TEXT NOT NULL,
    email TEXT NOT NULL,
    phone TEXT NOT NULL,
    cover TEXT NOT NULL,
    submitted_at TEXT NOT NULL
)";

/// SQLite-backed application store. Every finalize is an independent
/// single-row insert serialized through the connection mutex; timestamps are
/// stored as RFC 3339 UTC strings.
pub(crate) struct SqliteApplicationStore {
    conn: Mutex<Connection>,
}

impl SqliteApplicationStore {
    pub(crate) fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(sqlite_unavailable)?;
        Self::with_connection(conn)
    }

    pub(crate) fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(sqlite_unavailable)?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute(SCHEMA, []).map_err(sqlite_unavailable)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl ApplicationStore for SqliteApplicationStore {
    fn insert(&self, record: &CompletedApplication) -> Result<(), StoreError> {
        let conn = self.conn.lock().expect("store mutex poisoned");
        conn.execute(
            "INSERT INTO applicants \
             (name, job_role, experience_years, qualification, email, phone, cover, submitted_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                record.name,
                record.job_role.label(),
                record.experience_years,
                record.qualification,
                record.email,
                record.phone,
                record.cover,
                record.submitted_at.to_rfc3339(),
            ],
        )
        .map_err(sqlite_unavailable)?;
        Ok(())
    }

    fn list(&self) -> Result<Vec<StoredApplication>, StoreError> {
        let conn = self.conn.lock().expect("store mutex poisoned");
        let mut statement = conn
            .prepare(
                "SELECT id, name, job_role, experience_years, qualification, email, phone, \
                 cover, submitted_at FROM applicants ORDER BY submitted_at DESC, id DESC",
            )
            .map_err(sqlite_unavailable)?;

        let rows = statement
            .query_map([], |row| {
                Ok(ApplicantRow {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    job_role: row.get(2)?,
                    experience_years: row.get(3)?,
                    qualification: row.get(4)?,
                    email: row.get(5)?,
                    phone: row.get(6)?,
                    cover: row.get(7)?,
                    submitted_at: row.get(8)?,
                })
            })
            .map_err(sqlite_unavailable)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row.map_err(sqlite_unavailable)?.into_stored()?);
        }
        Ok(records)
    }
}

struct ApplicantRow {
    id: i64,
    name: String,
    job_role: String,
    experience_years: i64,
    qualification: String,
    email: String,
    phone: String,
    cover: String,
    submitted_at: String,
}

impl ApplicantRow {
    fn into_stored(self) -> Result<StoredApplication, StoreError> {
        let job_role = JobRole::from_label(&self.job_role).ok_or_else(|| {
            StoreError::Malformed(format!("unknown job role `{}`", self.job_role))
        })?;
        let experience_years = u32::try_from(self.experience_years).map_err(|_| {
            StoreError::Malformed(format!(
                "experience_years out of range: {}",
                self.experience_years
            ))
        })?;
        let submitted_at = DateTime::parse_from_rfc3339(&self.submitted_at)
            .map_err(|err| {
                StoreError::Malformed(format!(
                    "bad submitted_at `{}`: {err}",
                    self.submitted_at
                ))
            })?
            .with_timezone(&Utc);

        Ok(StoredApplication {
            id: self.id,
            record: CompletedApplication {
                name: self.name,
                job_role,
                experience_years,
                qualification: self.qualification,
                email: self.email,
                phone: self.phone,
                cover: self.cover,
                submitted_at,
            },
        })
    }
}

fn sqlite_unavailable(err: rusqlite::Error) -> StoreError {
    StoreError::Unavailable(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(name: &str, minute: u32) -> CompletedApplication {
        CompletedApplication {
            name: name.to_string(),
            job_role: JobRole::SoftwareEngineer,
            experience_years: 4,
            qualification: "MSC".to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: "+919876543210".to_string(),
            cover: String::new(),
            submitted_at: Utc.with_ymd_and_hms(2025, 11, 3, 9, minute, 0).unwrap(),
        }
    }

    #[test]
    fn insert_then_list_round_trips_the_record() {
        let store = SqliteApplicationStore::open_in_memory().expect("store opens");
        let record = record("Riya", 30);
        store.insert(&record).expect("insert succeeds");

        let listed = store.list().expect("list succeeds");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, 1);
        assert_eq!(listed[0].record, record);
    }

    #[test]
    fn list_orders_newest_first() {
        let store = SqliteApplicationStore::open_in_memory().expect("store opens");
        store.insert(&record("Early", 10)).expect("insert");
        store.insert(&record("Late", 45)).expect("insert");

        let listed = store.list().expect("list succeeds");
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].record.name, "Late");
        assert_eq!(listed[1].record.name, "Early");
    }

    #[test]
    fn empty_name_survives_storage() {
        let store = SqliteApplicationStore::open_in_memory().expect("store opens");
        let mut anonymous = record("Riya", 30);
        anonymous.name = String::new();
        store.insert(&anonymous).expect("insert succeeds");

        let listed = store.list().expect("list succeeds");
        assert_eq!(listed[0].record.name, "");
    }
}
