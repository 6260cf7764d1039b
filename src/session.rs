use colored::Colorize;
use thiserror::Error;

use crate::catalog::{MenuItem, PackageSource};
use crate::host::HostContext;
use crate::prompt::{PromptError, Prompter};
use crate::runner::CommandRunner;
use crate::steps::{self, Step};
use crate::utils;

/// Terminal outcome of a whole run.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The top-level selection prompt was dismissed.
    #[error("prompt was closed")]
    Cancelled,

    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

/// Drive one install session: select items, then per item confirm and run
/// its steps strictly in order. A failed item is logged and the loop moves
/// on to the next one.
pub fn run_session<P: Prompter, R: CommandRunner>(
    prompter: &mut P,
    runner: &R,
    host: &HostContext,
    dry_run: bool,
) -> Result<(), SessionError> {
    log::debug!("Bootstrapping workstation for {}", host.user);

    let selection = match prompter.select_items() {
        Ok(items) => items,
        Err(PromptError::Cancelled) => return Err(SessionError::Cancelled),
        Err(PromptError::Inquire(e)) => return Err(SessionError::Failed(e.into())),
    };

    if selection.is_empty() {
        println!("{}", "Nothing selected.".yellow());
        return Ok(());
    }

    warn_if_yay_missing(&selection, host);

    for item in selection {
        let confirmed = match prompter.confirm(item) {
            Ok(answer) => answer,
            Err(PromptError::Cancelled) => {
                println!("\n{}", "Prompt was closed. Skipping...".yellow());
                continue;
            }
            Err(PromptError::Inquire(e)) => return Err(SessionError::Failed(e.into())),
        };

        if !confirmed {
            log::info!("Skipping \"{}\"", item.label());
            continue;
        }

        println!("{}", format!("→ {}", item.label()).bright_cyan().bold());

        let item_steps = item.steps(host);
        match steps::execute_steps(&item_steps, runner, dry_run) {
            Ok(()) => {
                println!("  {} {} done", "✓".green(), item.label());
            }
            Err(e) => {
                // Partial application is accepted; remaining items still run.
                println!("  {} {:#}", "✗".red(), e);
                log::error!("\"{}\" aborted: {:#}", item.label(), e);
            }
        }
    }

    Ok(())
}

/// AUR installs go through yay; a missing helper will surface as a spawn
/// failure mid-item, so flag it up front.
fn warn_if_yay_missing(selection: &[MenuItem], host: &HostContext) {
    let needs_yay = selection.iter().any(|item| {
        item.steps(host).iter().any(|step| {
            matches!(step, Step::InstallPackage(pkg) if pkg.source == PackageSource::Yay)
        })
    });

    if needs_yay && !utils::command_exists("yay") {
        log::warn!("yay not found in PATH; AUR package installs will fail");
    }
}
