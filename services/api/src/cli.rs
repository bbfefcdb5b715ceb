use crate::commands::{run_analyze, run_import, run_report, AnalyzeArgs, ImportArgs, ReportArgs};
use crate::demo::{run_demo, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use insightme::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "InsightMe",
    about = "Score self-assessment questionnaires and serve the results over HTTP",
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
    /// Score a response file or the latest stored response set
    Analyze(AnalyzeArgs),
    /// Write the HTML report for a user's latest responses
    Report(ReportArgs),
    /// Store a CSV export of answers as a new response set
    Import(ImportArgs),
    /// Score a built-in sample against the standard catalog
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
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Analyze(args) => run_analyze(args),
        Command::Report(args) => run_report(args),
        Command::Import(args) => run_import(args),
        Command::Demo(args) => run_demo(args),
    }
}
