use crate::infra::SqliteApplicationStore;
use clap::Args;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use talent_intake::config::AppConfig;
use talent_intake::error::AppError;
use talent_intake::workflows::intake::{Conversation, IntakeService, Sender, TurnReport};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Cover note submitted at the end of the scripted conversation
    #[arg(long)]
    pub(crate) cover: Option<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ChatArgs {
    /// Database file for submitted applications (defaults to APP_DB_PATH)
    #[arg(long)]
    pub(crate) db: Option<PathBuf>,
}

/// Walk the happy path end to end against an in-memory database and show the
/// stored applicant row, so the full pipeline can be eyeballed from a shell.
pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let store = Arc::new(SqliteApplicationStore::open_in_memory()?);
    let service = IntakeService::new(store);
    let mut conversation = Conversation::new();

    let cover = args
        .cover
        .unwrap_or_else(|| "Portfolio: example.dev/riya".to_string());
    let script = [
        "Hi, I'm Riya",
        "I want to apply as a Data Analyst",
        "3 years",
        "B.Tech",
        "riya@example.com +91 98765 43210",
        cover.as_str(),
    ];

    println!("Recruitment intake demo");
    for text in script {
        let report = service.process_turn(&mut conversation, text)?;
        render_turn(&report);
    }

    println!("\nStored applicants");
    for stored in service.applicants()? {
        let view = stored.view();
        println!(
            "- #{} {} | {} | {} yrs | {} | {} | {} | submitted {}",
            view.id,
            view.name,
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

/// Interactive terminal conversation against the real database.
pub(crate) fn run_chat(args: ChatArgs) -> Result<(), AppError> {
    let path = match args.db {
        Some(path) => path,
        None => PathBuf::from(AppConfig::load()?.storage.db_path),
    };
    let store = Arc::new(SqliteApplicationStore::open(&path)?);
    let service = IntakeService::new(store);
    let mut conversation = Conversation::new();

    println!("Careers intake assistant. Type your message; /reset starts over, /quit exits.");
    let stdin = io::stdin();
    let mut input = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;
        input.clear();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }
        let line = input.trim();
        match line {
            "/quit" => break,
            "/reset" => {
                conversation.reset();
                println!("  (conversation reset)");
                continue;
            }
            _ => {}
        }

        match service.process_turn(&mut conversation, line) {
            Ok(report) => {
                for entry in report
                    .new_entries
                    .iter()
                    .filter(|entry| entry.sender == Sender::Bot)
                {
                    println!("  bot: {}", entry.text);
                }
                if report.submitted {
                    println!("  (application stored; /reset to start another)");
                }
            }
            // Storage failure keeps the conversation at ask_cover; the next
            // message retries the submission.
            Err(err) => println!("  error: {err}"),
        }
    }

    Ok(())
}

fn render_turn(report: &TurnReport) {
    for entry in &report.new_entries {
        match entry.sender {
            Sender::User => println!("> {}", entry.text),
            Sender::Bot => println!("  bot: {}", entry.text),
        }
    }
}
