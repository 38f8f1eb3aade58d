use crate::admin::{run_export, run_list, ApplicantsArgs, ExportArgs};
use crate::demo::{run_chat, run_demo, ChatArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use talent_intake::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Careers Intake Assistant",
    about = "Run and administer the conversational recruitment intake service",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Hold an interactive intake conversation in the terminal
    Chat(ChatArgs),
    /// Run a scripted end-to-end conversation against an in-memory store
    Demo(DemoArgs),
    /// Inspect or export submitted applications
    Applicants {
        #[command(subcommand)]
        command: ApplicantsCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ApplicantsCommand {
    /// Print submitted applications, newest first
    List(ApplicantsArgs),
    /// Write submitted applications as CSV
    Export(ExportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Chat(args) => run_chat(args),
        Command::Demo(args) => run_demo(args),
        Command::Applicants {
            command: ApplicantsCommand::List(args),
        } => run_list(args),
        Command::Applicants {
            command: ApplicantsCommand::Export(args),
        } => run_export(args),
    }
}
