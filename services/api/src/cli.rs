use crate::demo::{run_assess, run_batch, run_demo, AssessArgs, BatchArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use hepa_insight::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Hepa Insight",
    about = "Score liver panels against clinical patterns and fuse them with the risk model verdict",
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
    /// Assess a single lab panel from the command line
    Assess(AssessArgs),
    /// Evaluate a CSV of lab panels that already carry model verdicts
    Batch(BatchArgs),
    /// Walk through canned panels covering the main fusion outcomes
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the base URL of the risk model service
    #[arg(long)]
    pub(crate) prediction_url: Option<String>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Assess(args) => run_assess(args).await,
        Command::Batch(args) => run_batch(args),
        Command::Demo(args) => run_demo(args),
    }
}
