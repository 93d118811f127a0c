use crate::demo::{run_demo, run_hash_password, DemoArgs, HashPasswordArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use complaint_desk::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Complaint Desk",
    about = "Run and demonstrate the complaint intake service from the command line",
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
    /// Walk a complaint through submission, review and deletion in memory
    Demo(DemoArgs),
    /// Print the stored secret for a password
    HashPassword(HashPasswordArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Create the demo admin and user accounts before accepting requests
    #[arg(long)]
    pub(crate) seed_demo_users: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Demo(args) => run_demo(args).await,
        Command::HashPassword(args) => run_hash_password(args),
    }
}
