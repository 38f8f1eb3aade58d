use crate::infra::SqliteApplicationStore;
use clap::Args;
use std::path::PathBuf;
use talent_intake::config::AppConfig;
use talent_intake::error::AppError;
use talent_intake::workflows::intake::{applicants_csv, ApplicationStore};

#[derive(Args, Debug)]
pub(crate) struct ApplicantsArgs {
    /// Database file (defaults to the configured APP_DB_PATH)
    #[arg(long)]
    pub(crate) db: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    /// Database file (defaults to the configured APP_DB_PATH)
    #[arg(long)]
    pub(crate) db: Option<PathBuf>,
    /// Output file; prints to stdout when omitted
    #[arg(long)]
    pub(crate) out: Option<PathBuf>,
}

pub(crate) fn run_list(args: ApplicantsArgs) -> Result<(), AppError> {
    let store = open_store(args.db)?;
    let records = store.list().map_err(AppError::from)?;

    println!("Total applicants: {}", records.len());
    for stored in &records {
        let view = stored.view();
        let name = if view.name.is_empty() {
            "(no name)"
        } else {
            view.name.as_str()
        };
        println!(
            "- #{} {} | {} | {} yrs | {} | {} | {} | submitted {}",
            view.id,
            name,
            view.job_role,
            view.experience_years,
            view.qualification,
            view.email,
            view.phone,
            view.submitted_at
        );
    }

    Ok(())
}

pub(crate) fn run_export(args: ExportArgs) -> Result<(), AppError> {
    let store = open_store(args.db)?;
    let records = store.list().map_err(AppError::from)?;
    let rendered = applicants_csv(&records).map_err(AppError::from)?;

    match args.out {
        Some(path) => {
            std::fs::write(&path, rendered)?;
            println!("Wrote {} applicant(s) to {}", records.len(), path.display());
        }
        None => print!("{rendered}"),
    }

    Ok(())
}

fn open_store(db: Option<PathBuf>) -> Result<SqliteApplicationStore, AppError> {
    let path = match db {
        Some(path) => path,
        None => PathBuf::from(AppConfig::load()?.storage.db_path),
    };
    SqliteApplicationStore::open(path).map_err(AppError::from)
}
