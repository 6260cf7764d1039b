mod catalog;
mod cli;
mod host;
mod prompt;
mod runner;
mod session;
mod steps;
mod utils;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use host::HostContext;
use prompt::InquirePrompter;
use runner::ShellRunner;
use session::SessionError;

fn main() -> Result<()> {
    // Setup logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();

    // Set verbose logging if requested
    if cli.verbose {
        log::set_max_level(log::LevelFilter::Debug);
    }

    let host = HostContext::from_env()?;
    let mut prompter = InquirePrompter;
    let runner = ShellRunner::new();

    match session::run_session(&mut prompter, &runner, &host, cli.dry_run) {
        Ok(()) => {}
        Err(SessionError::Cancelled) => {
            println!("\nPrompt was closed. Exiting program...");
        }
        Err(SessionError::Failed(e)) => {
            // Reported, not re-raised: the session still ends normally.
            log::error!("Unexpected error: {:#}", e);
        }
    }

    Ok(())
}
