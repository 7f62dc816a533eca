//! Verdant CLI - database readiness check.

use clap::Parser;

use verdant_cli::cli::{Cli, Command};
use verdant_cli::commands;
use verdant_cli::error::CliResult;
use verdant_cli::output;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    verdant_probe::logging::init();

    if let Err(e) = run().await {
        output::blank();
        output::fail(&e.to_string());
        if let Some(hint) = e.hint() {
            output::help(&hint);
        }
        std::process::exit(e.outcome().exit_code());
    }
}

async fn run() -> CliResult<()> {
    let cli = Cli::parse();

    match cli.into_command() {
        Command::Check(args) => commands::check::run(args).await,
        Command::Parse(args) => commands::parse::run(args).await,
        Command::Version => commands::version::run().await,
    }
}
