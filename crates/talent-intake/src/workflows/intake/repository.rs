use serde::Serialize;

use super::domain::CompletedApplication;

/// Storage abstraction so the dialogue service can be exercised in
/// isolation. A deployment provides the durable implementation; tests use an
/// in-memory double.
///
/// `insert` is called exactly once per completed conversation, after every
/// required field is populated. Implementations only need to survive
/// concurrent independent appends; there is no read-modify-write.
pub trait ApplicationStore: Send + Sync {
    fn insert(&self, record: &CompletedApplication) -> Result<(), StoreError>;

    /// All stored applications, newest first.
    fn list(&self) -> Result<Vec<StoredApplication>, StoreError>;
}

/// A persisted application together with its row id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredApplication {
    pub id: i64,
    pub record: CompletedApplication,
}

impl StoredApplication {
    pub fn view(&self) -> ApplicantView {
        ApplicantView {
            id: self.id,
            name: self.record.name.clone(),
            job_role: self.record.job_role.label(),
            experience_years: self.record.experience_years,
            qualification: self.record.qualification.clone(),
            email: self.record.email.clone(),
            phone: self.record.phone.clone(),
            cover: self.record.cover.clone(),
            submitted_at: self.record.submitted_at.to_rfc3339(),
        }
    }
}

/// Flattened row shape served to the admin listing and the CSV export:
/// everything textual except `experience_years`, timestamp as RFC 3339 UTC.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicantView {
    pub id: i64,
    pub name: String,
    pub job_role: &'static str,
    pub experience_years: u32,
    pub qualification: String,
    pub email: String,
    pub phone: String,
    pub cover: String,
    pub submitted_at: String,
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("application store unavailable: {0}")]
    Unavailable(String),
    #[error("stored applicant row malformed: {0}")]
    Malformed(String),
}
