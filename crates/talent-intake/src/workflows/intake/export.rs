use super::repository::StoredApplication;

const HEADER: [&str; 9] = [
    "id",
    "name",
    "job_role",
    "experience_years",
    "qualification",
    "email",
    "phone",
    "cover",
    "submitted_at",
];

/// Render stored applications as CSV in the order given (the store already
/// sorts newest first).
pub fn applicants_csv(records: &[StoredApplication]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER)?;

    for stored in records {
        let view = stored.view();
        let id = view.id.to_string();
        let experience_years = view.experience_years.to_string();
        writer.write_record([
            id.as_str(),
            view.name.as_str(),
            view.job_role,
            experience_years.as_str(),
            view.qualification.as_str(),
            view.email.as_str(),
            view.phone.as_str(),
            view.cover.as_str(),
            view.submitted_at.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Csv(csv::Error::from(err.into_error())))?;
    Ok(String::from_utf8(bytes)?)
}

/// CSV rendering failure.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to render applicants csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("rendered csv was not valid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::intake::domain::{CompletedApplication, JobRole};
    use chrono::{TimeZone, Utc};

    fn stored(id: i64, name: &str, cover: &str) -> StoredApplication {
        StoredApplication {
            id,
            record: CompletedApplication {
                name: name.to_string(),
                job_role: JobRole::DataAnalyst,
                experience_years: 3,
                qualification: "B.Tech".to_string(),
                email: "riya@example.com".to_string(),
                phone: "+919876543210".to_string(),
                cover: cover.to_string(),
                submitted_at: Utc.with_ymd_and_hms(2025, 11, 3, 9, 30, 0).unwrap(),
            },
        }
    }

    #[test]
    fn csv_carries_header_and_one_row_per_record() {
        let rendered = applicants_csv(&[stored(2, "Riya", "portfolio"), stored(1, "Dev", "")])
            .expect("render succeeds");
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "id,name,job_role,experience_years,qualification,email,phone,cover,submitted_at"
        );
        assert!(lines[1].starts_with("2,Riya,Data Analyst,3,B.Tech,riya@example.com"));
        assert!(lines[2].starts_with("1,Dev,"));
    }

    #[test]
    fn csv_quotes_fields_containing_commas() {
        let rendered =
            applicants_csv(&[stored(1, "Riya", "Led analytics, BI, and reporting")])
                .expect("render succeeds");
        assert!(rendered.contains("\"Led analytics, BI, and reporting\""));
    }

    #[test]
    fn empty_listing_is_header_only() {
        let rendered = applicants_csv(&[]).expect("render succeeds");
        assert_eq!(rendered.lines().count(), 1);
    }
}
